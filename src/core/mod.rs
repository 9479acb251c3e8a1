//! Core data model: identifiers, types and the abstract API tree.

pub mod errors;
pub mod model;
pub mod name;
pub mod types;

pub use errors::{Result, TranslateError};
pub use model::{
    Api, Argument, Class, Documentation, Enum, Method, MethodKind, Namespace, Node, NodeId,
    NodeKind, NodeTag, Property,
};
pub use name::{Name, NameKind};
pub use types::{BaseKind, BaseType, ClassType, EnumType, ListType, Type, TypeKind, TypeSize};
