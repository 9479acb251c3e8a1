//! Translation of C library metadata into the abstract API tree.
//!
//! [`project`] holds the raw declarations as produced by a C header scanner,
//! [`parser`] turns them into an [`Api`](crate::core::Api).

pub mod base_type;
pub mod parser;
pub mod project;
pub mod report;

pub use base_type::{is_fixed_size_integer, parse_c_base_type};
pub use parser::{CParser, Translation, TypeIndex};
pub use project::{CArgument, CClass, CEnum, CEnumValue, CFunction, CProject, CProperty};
pub use report::{Report, Scope, Skipped};
