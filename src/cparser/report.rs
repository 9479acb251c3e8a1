//! Items left out of the tree during translation.

use std::fmt;

use crate::core::TranslateError;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Granularity at which a failure was contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Enum,
    EnumValue,
    Class,
    Property,
    Method,
    /// A method dropped because one of its types could not be resolved
    TypeResolution,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Enum => write!(f, "enum"),
            Scope::EnumValue => write!(f, "enum value"),
            Scope::Class => write!(f, "class"),
            Scope::Property => write!(f, "property"),
            Scope::Method => write!(f, "method"),
            Scope::TypeResolution => write!(f, "types of"),
        }
    }
}

/// One omitted item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub scope: Scope,
    /// Raw C spelling of the item
    pub item: String,
    /// Raw C spelling of the enclosing enum or class
    pub owner: Option<String>,
    pub cause: TranslateError,
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            Some(owner) => write!(
                f,
                "could not parse {} `{}` in `{}`: {}",
                self.scope, self.item, owner, self.cause
            ),
            None => write!(f, "could not parse {} `{}`: {}", self.scope, self.item, self.cause),
        }
    }
}

impl Skipped {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let message = match &self.owner {
            Some(owner) => format!("skipped {} `{}` of `{}`", self.scope, self.item, owner),
            None => format!("skipped {} `{}`", self.scope, self.item),
        };
        let diag = Diagnostic::warning(message).with_context(self.cause.to_string());

        match &self.cause {
            TranslateError::UnknownType(_) => diag.with_suggestion(suggestions::UNKNOWN_TYPE),
            TranslateError::NameEqualToNamespace(_) => {
                diag.with_suggestion(suggestions::NAME_EQUAL_TO_NAMESPACE)
            }
            TranslateError::MissingContainedType(_) => {
                diag.with_suggestion(suggestions::MISSING_CONTAINED_TYPE)
            }
            TranslateError::UnresolvedReference(_) => {
                diag.with_suggestion(suggestions::UNRESOLVED_REFERENCE)
            }
            _ => diag,
        }
    }
}

/// Every item omitted during one translation run, in the order met.
#[derive(Debug, Clone, Default)]
pub struct Report {
    skipped: Vec<Skipped>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an omitted item and log it.
    pub fn skip(
        &mut self,
        scope: Scope,
        item: impl Into<String>,
        owner: Option<&str>,
        cause: TranslateError,
    ) {
        let skipped = Skipped {
            scope,
            item: item.into(),
            owner: owner.map(String::from),
            cause,
        };
        tracing::warn!("{}", skipped);
        self.skipped.push(skipped);
    }

    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn len(&self) -> usize {
        self.skipped.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skipped> {
        self.skipped.iter()
    }

    /// Omitted items of the given scope.
    pub fn in_scope(&self, scope: Scope) -> impl Iterator<Item = &Skipped> {
        self.skipped.iter().filter(move |s| s.scope == scope)
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        self.skipped.iter().map(Skipped::to_diagnostic).collect()
    }
}
