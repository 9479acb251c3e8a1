//! C base type declarations.
//!
//! A declaration such as `const unsigned short int` is read token by token,
//! each token adding one attribute to the resulting [`BaseType`].

use std::sync::LazyLock;

use regex::Regex;

use crate::core::{BaseKind, BaseType, Result, TranslateError, Type, TypeKind, TypeSize};

/// `int32_t`, `uint8_t`, ...
static FIXED_SIZE_INTEGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(u?)int([0-9]?[0-9])_t$").expect("fixed-size integer regex is valid")
});

/// Whether `name` is spelled like a fixed-width integer type.
pub fn is_fixed_size_integer(name: &str) -> bool {
    FIXED_SIZE_INTEGER.is_match(name)
}

/// Parse a whitespace-separated C base type declaration.
///
/// `bool_type` is the library's spelling of booleans. A `const` after the
/// type name qualifies the pointee and is ignored.
pub fn parse_c_base_type(decl: &str, bool_type: &str) -> Result<Type> {
    let normalized = decl.replace('*', " * ");

    let mut kind: Option<BaseKind> = None;
    let mut size: Option<TypeSize> = None;
    let mut unsigned = false;
    let mut is_const = false;
    let mut is_ref = false;

    for token in normalized.split_whitespace() {
        match token {
            "const" => {
                if kind.is_none() {
                    is_const = true;
                }
            }
            "unsigned" => unsigned = true,
            "char" => kind = Some(BaseKind::Character),
            "void" => kind = Some(BaseKind::Void),
            t if t == bool_type => kind = Some(BaseKind::Boolean),
            "short" => size = Some(TypeSize::Short),
            "long" => size = Some(TypeSize::Long),
            "int" => kind = Some(BaseKind::Integer),
            "float" => {
                kind = Some(BaseKind::Floatant);
                size = Some(TypeSize::Float);
            }
            "size_t" => kind = Some(BaseKind::Size),
            "time_t" => kind = Some(BaseKind::Time),
            "double" => {
                kind = Some(BaseKind::Floatant);
                size = Some(if size == Some(TypeSize::Long) {
                    TypeSize::LongDouble
                } else {
                    TypeSize::Double
                });
            }
            "*" => match kind {
                Some(BaseKind::Character) => kind = Some(BaseKind::String),
                Some(_) => is_ref = true,
                None => {}
            },
            other => {
                if let Some(caps) = FIXED_SIZE_INTEGER.captures(other) {
                    kind = Some(BaseKind::Integer);
                    if caps.get(1).is_some_and(|m| m.as_str() == "u") {
                        unsigned = true;
                    }
                    let bits: u32 = caps
                        .get(2)
                        .map_or("", |m| m.as_str())
                        .parse()
                        .map_err(|_| TranslateError::MissingBaseType(decl.to_string()))?;
                    if !matches!(bits, 8 | 16 | 32 | 64) {
                        return Err(TranslateError::InvalidIntegerSize {
                            decl: decl.to_string(),
                            size: bits,
                        });
                    }
                    size = Some(TypeSize::Bits(bits as u8));
                }
            }
        }
    }

    let kind = kind.ok_or_else(|| TranslateError::MissingBaseType(decl.to_string()))?;

    Ok(Type::new(TypeKind::Base(BaseType {
        kind,
        size,
        unsigned,
    }))
    .with_const(is_const)
    .with_ref(is_ref))
}
