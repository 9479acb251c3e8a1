//! Type descriptors attached to methods and arguments.
//!
//! Enum, class and list types start out holding only the raw C spelling of
//! what they reference. Their descriptor is filled in once every enum and
//! class has been built.

use std::fmt;

use super::model::NodeId;

/// Semantic kind of a C base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseKind {
    Void,
    Boolean,
    Character,
    String,
    Integer,
    Size,
    Time,
    Floatant,
}

impl BaseKind {
    /// Get the display text for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseKind::Void => "void",
            BaseKind::Boolean => "boolean",
            BaseKind::Character => "character",
            BaseKind::String => "string",
            BaseKind::Integer => "integer",
            BaseKind::Size => "size",
            BaseKind::Time => "time",
            BaseKind::Floatant => "floatant",
        }
    }
}

impl fmt::Display for BaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size qualifier of a base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeSize {
    Short,
    Long,
    Float,
    Double,
    LongDouble,
    /// Fixed width in bits (8, 16, 32 or 64)
    Bits(u8),
}

impl fmt::Display for TypeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSize::Short => write!(f, "short"),
            TypeSize::Long => write!(f, "long"),
            TypeSize::Float => write!(f, "float"),
            TypeSize::Double => write!(f, "double"),
            TypeSize::LongDouble => write!(f, "long double"),
            TypeSize::Bits(bits) => write!(f, "{}", bits),
        }
    }
}

/// A C base type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseType {
    pub kind: BaseKind,
    pub size: Option<TypeSize>,
    pub unsigned: bool,
}

impl BaseType {
    /// Create a signed, unsized base type.
    pub fn new(kind: BaseKind) -> Self {
        BaseType {
            kind,
            size: None,
            unsigned: false,
        }
    }
}

/// Reference to an enum of the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    /// Raw C spelling of the enum
    pub name: String,
    /// The built enum, once resolved
    pub desc: Option<NodeId>,
}

/// Reference to a class of the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassType {
    /// Raw C spelling of the class
    pub name: String,
    /// The built class, once resolved
    pub desc: Option<NodeId>,
}

/// Homogeneous list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListType {
    /// Raw C spelling of the element type, when the declaration names one
    pub contained_name: Option<String>,
    /// Resolved element type
    pub contained_desc: Option<Box<Type>>,
}

/// Closed set of type kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Base(BaseType),
    Enum(EnumType),
    Class(ClassType),
    List(ListType),
}

/// A type with its const and reference qualifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub kind: TypeKind,
    pub is_const: bool,
    pub is_ref: bool,
}

impl Type {
    /// Create an unqualified type.
    pub fn new(kind: TypeKind) -> Self {
        Type {
            kind,
            is_const: false,
            is_ref: false,
        }
    }

    /// Set the const qualifier.
    pub fn with_const(mut self, is_const: bool) -> Self {
        self.is_const = is_const;
        self
    }

    /// Set the reference qualifier.
    pub fn with_ref(mut self, is_ref: bool) -> Self {
        self.is_ref = is_ref;
        self
    }

    /// Unresolved enum reference.
    pub fn enum_ref(name: impl Into<String>) -> Self {
        Type::new(TypeKind::Enum(EnumType {
            name: name.into(),
            desc: None,
        }))
    }

    /// Unresolved class reference.
    pub fn class_ref(name: impl Into<String>) -> Self {
        Type::new(TypeKind::Class(ClassType {
            name: name.into(),
            desc: None,
        }))
    }

    /// Unresolved list of `contained`.
    pub fn list_of(contained: Option<String>) -> Self {
        Type::new(TypeKind::List(ListType {
            contained_name: contained,
            contained_desc: None,
        }))
    }

    /// Name of the type: the base kind, the referenced C spelling, or `list`.
    pub fn name(&self) -> &str {
        match &self.kind {
            TypeKind::Base(base) => base.kind.as_str(),
            TypeKind::Enum(e) => &e.name,
            TypeKind::Class(c) => &c.name,
            TypeKind::List(_) => "list",
        }
    }

    /// Whether every descriptor reachable from this type is set.
    pub fn is_resolved(&self) -> bool {
        match &self.kind {
            TypeKind::Base(_) => true,
            TypeKind::Enum(e) => e.desc.is_some(),
            TypeKind::Class(c) => c.desc.is_some(),
            TypeKind::List(list) => list
                .contained_desc
                .as_deref()
                .is_some_and(Type::is_resolved),
        }
    }
}
