//! Raw C metadata consumed by the translator.
//!
//! These types mirror what an upstream header extractor produces: enums and
//! classes with their functions, every argument carrying its C type
//! spelling. They are read-only input; the translator never mutates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::Documentation;
use crate::util::diagnostic::ProjectSyntaxError;

/// A whole C library surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CProject {
    /// Declared enums
    pub enums: Vec<CEnum>,

    /// Declared classes (opaque structs with their functions)
    pub classes: Vec<CClass>,
}

impl CProject {
    /// Create an empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a project from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read C project: {}", path.display()))?;

        serde_json::from_str(&contents)
            .map_err(|e| ProjectSyntaxError::from_json(&path.display().to_string(), &contents, &e))
            .with_context(|| format!("failed to parse C project: {}", path.display()))
    }

    /// Parse a project from JSON text.
    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Add an enum.
    pub fn with_enum(mut self, e: CEnum) -> Self {
        self.enums.push(e);
        self
    }

    /// Add a class.
    pub fn with_class(mut self, class: CClass) -> Self {
        self.classes.push(class);
        self
    }
}

/// A C enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CEnum {
    /// Enum tag name
    pub name: String,

    /// Name of the typedef declared along with the enum, if any
    #[serde(default)]
    pub associated_typedef: Option<String>,

    /// Enum values, in declaration order
    #[serde(default)]
    pub values: Vec<CEnumValue>,

    #[serde(flatten)]
    pub doc: Documentation,
}

impl CEnum {
    /// Create a new enum.
    pub fn new(name: impl Into<String>) -> Self {
        CEnum {
            name: name.into(),
            associated_typedef: None,
            values: Vec::new(),
            doc: Documentation::default(),
        }
    }

    /// Set the associated typedef.
    pub fn with_typedef(mut self, typedef: impl Into<String>) -> Self {
        self.associated_typedef = Some(typedef.into());
        self
    }

    /// Add a value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(CEnumValue::new(value));
        self
    }

    /// The spelling other declarations use to refer to this enum.
    pub fn type_name(&self) -> &str {
        self.associated_typedef.as_deref().unwrap_or(&self.name)
    }
}

/// An enum value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CEnumValue {
    pub name: String,

    #[serde(flatten)]
    pub doc: Documentation,
}

impl CEnumValue {
    /// Create a new value.
    pub fn new(name: impl Into<String>) -> Self {
        CEnumValue {
            name: name.into(),
            doc: Documentation::default(),
        }
    }
}

/// A C "class": an opaque type and the functions operating on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CClass {
    pub name: String,

    /// Properties, in declaration order
    #[serde(default)]
    pub properties: Vec<CProperty>,

    /// Functions taking the object as first argument
    #[serde(default)]
    pub instance_methods: Vec<CFunction>,

    /// Functions not bound to an instance
    #[serde(default)]
    pub class_methods: Vec<CFunction>,

    #[serde(flatten)]
    pub doc: Documentation,
}

impl CClass {
    /// Create a new class.
    pub fn new(name: impl Into<String>) -> Self {
        CClass {
            name: name.into(),
            properties: Vec::new(),
            instance_methods: Vec::new(),
            class_methods: Vec::new(),
            doc: Documentation::default(),
        }
    }

    /// Add a property.
    pub fn with_property(mut self, property: CProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Add an instance method.
    pub fn with_instance_method(mut self, function: CFunction) -> Self {
        self.instance_methods.push(function);
        self
    }

    /// Add a class method.
    pub fn with_class_method(mut self, function: CFunction) -> Self {
        self.class_methods.push(function);
        self
    }
}

/// A property backed by getter and/or setter functions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CProperty {
    pub name: String,

    #[serde(default)]
    pub getter: Option<CFunction>,

    #[serde(default)]
    pub setter: Option<CFunction>,
}

impl CProperty {
    /// Create a property without accessors.
    pub fn new(name: impl Into<String>) -> Self {
        CProperty {
            name: name.into(),
            getter: None,
            setter: None,
        }
    }

    /// Set the getter.
    pub fn with_getter(mut self, getter: CFunction) -> Self {
        self.getter = Some(getter);
        self
    }

    /// Set the setter.
    pub fn with_setter(mut self, setter: CFunction) -> Self {
        self.setter = Some(setter);
        self
    }
}

/// A C function declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CFunction {
    pub name: String,

    /// Arguments, receiver first for instance methods
    #[serde(default)]
    pub arguments: Vec<CArgument>,

    pub return_argument: CArgument,

    #[serde(flatten)]
    pub doc: Documentation,
}

impl CFunction {
    /// Create a new function returning `return_type`.
    pub fn new(name: impl Into<String>, return_type: CArgument) -> Self {
        CFunction {
            name: name.into(),
            arguments: Vec::new(),
            return_argument: return_type,
            doc: Documentation::default(),
        }
    }

    /// Add an argument.
    pub fn with_argument(mut self, argument: CArgument) -> Self {
        self.arguments.push(argument);
        self
    }
}

/// A function argument or return value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CArgument {
    /// Argument name (empty for return values)
    #[serde(default)]
    pub name: String,

    /// Bare type name, e.g. `char` or `LinphoneCore`
    pub ctype: String,

    /// Full declaration, e.g. `const char *`
    pub complete_type: String,

    /// Element type name for list containers
    #[serde(default)]
    pub contained_type: Option<String>,

    #[serde(flatten)]
    pub doc: Documentation,
}

impl CArgument {
    /// Create an argument whose full declaration is `complete_type` and whose
    /// bare type name is `ctype`.
    pub fn new(
        name: impl Into<String>,
        ctype: impl Into<String>,
        complete_type: impl Into<String>,
    ) -> Self {
        CArgument {
            name: name.into(),
            ctype: ctype.into(),
            complete_type: complete_type.into(),
            contained_type: None,
            doc: Documentation::default(),
        }
    }

    /// Create a return value.
    pub fn returning(ctype: impl Into<String>, complete_type: impl Into<String>) -> Self {
        CArgument::new("", ctype, complete_type)
    }

    /// Set the contained type of a list.
    pub fn with_contained_type(mut self, contained: impl Into<String>) -> Self {
        self.contained_type = Some(contained.into());
        self
    }
}
