//! Translation error types.
//!
//! Every failure the core can raise is a variant of [`TranslateError`]. The
//! first group describes bad input (structural errors), the second group
//! describes misuse of the object model by calling code.

use miette::Diagnostic;
use thiserror::Error;

/// Result alias used across the core.
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Error raised while building or translating the abstract API model.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TranslateError {
    #[error("unknown C type `{0}`")]
    #[diagnostic(
        code(wrapgen::parse::unknown_type),
        help("Declare the type as an enum or class in the C project, or add it to `parser.base_types`")
    )]
    UnknownType(String),

    #[error("name equal to namespace `{0}`")]
    #[diagnostic(code(wrapgen::name::equal_to_namespace))]
    NameEqualToNamespace(String),

    #[error("`{0}` is not a camelCase identifier")]
    #[diagnostic(code(wrapgen::name::invalid_camel_case))]
    InvalidCamelCase(String),

    #[error("`{0}` is not a snake_case identifier")]
    #[diagnostic(code(wrapgen::name::invalid_snake_case))]
    InvalidSnakeCase(String),

    #[error("`{0}` list type without specified contained type")]
    #[diagnostic(code(wrapgen::parse::missing_contained_type))]
    MissingContainedType(String),

    #[error("`{decl}` C basic type has an invalid size ({size})")]
    #[diagnostic(
        code(wrapgen::parse::invalid_integer_size),
        help("Fixed-width integers must be 8, 16, 32 or 64 bits wide")
    )]
    InvalidIntegerSize { decl: String, size: u32 },

    #[error("could not find type in `{0}`")]
    #[diagnostic(code(wrapgen::parse::missing_base_type))]
    MissingBaseType(String),

    #[error("no common prefix `{0}`")]
    #[diagnostic(code(wrapgen::name::no_common_prefix))]
    NoCommonPrefix(String),

    #[error("`{0}` is referenced but was never built")]
    #[diagnostic(code(wrapgen::resolve::unresolved))]
    UnresolvedReference(String),

    #[error("{0} is not attached to a namespace object")]
    #[diagnostic(code(wrapgen::model::detached))]
    Detached(String),

    #[error("cannot attach a {child} to a {parent}")]
    #[diagnostic(code(wrapgen::model::wrong_kind))]
    WrongKind {
        parent: &'static str,
        child: &'static str,
    },

    #[error("{0} is already attached")]
    #[diagnostic(code(wrapgen::model::already_attached))]
    AlreadyAttached(String),

    #[error("cannot translate {0}")]
    #[diagnostic(code(wrapgen::translate::untranslatable))]
    Untranslatable(String),
}

impl TranslateError {
    /// Whether the error signals a contract violation by calling code rather
    /// than bad input.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            TranslateError::Detached(_)
                | TranslateError::WrongKind { .. }
                | TranslateError::AlreadyAttached(_)
                | TranslateError::Untranslatable(_)
        )
    }
}
