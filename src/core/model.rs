//! Abstract API object model.
//!
//! The tree is stored in an arena ([`Api`]) and nodes refer to each other by
//! [`NodeId`]. Owning links go downward (namespace children, enum values,
//! class members, accessors, arguments); every attached node also records its
//! parent handle, set once when it is attached.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{Result, TranslateError};
use super::name::Name;
use super::types::Type;

/// Stable handle to a node of an [`Api`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Documentation copied verbatim from the C declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Documentation {
    pub brief_description: Option<String>,
    pub detailed_description: Option<String>,
    pub deprecated: bool,
}

/// Whether a method needs a receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MethodKind {
    #[default]
    Instance,
    Class,
}

#[derive(Debug, Clone, Default)]
pub struct Namespace {
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct Enum {
    pub values: Vec<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct Class {
    pub properties: Vec<NodeId>,
    pub instance_methods: Vec<NodeId>,
    pub class_methods: Vec<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct Property {
    pub getter: Option<NodeId>,
    pub setter: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct Method {
    pub kind: MethodKind,
    /// Receiver is const-qualified
    pub const_method: bool,
    pub args: Vec<NodeId>,
    pub return_type: Option<Type>,
}

#[derive(Debug, Clone)]
pub struct Argument {
    pub ty: Type,
    pub optional: bool,
    pub default: Option<String>,
}

impl Argument {
    /// Create a required argument of type `ty`.
    pub fn new(ty: Type) -> Self {
        Argument {
            ty,
            optional: false,
            default: None,
        }
    }
}

/// Closed set of node kinds.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Namespace(Namespace),
    Enum(Enum),
    EnumValue,
    Class(Class),
    Property(Property),
    Method(Method),
    Argument(Argument),
}

/// Data-less tag of a [`NodeKind`], used for typed searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Namespace,
    Enum,
    EnumValue,
    Class,
    Property,
    Method,
    Argument,
}

impl NodeTag {
    /// Get the display text for this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeTag::Namespace => "namespace",
            NodeTag::Enum => "enum",
            NodeTag::EnumValue => "enum value",
            NodeTag::Class => "class",
            NodeTag::Property => "property",
            NodeTag::Method => "method",
            NodeTag::Argument => "argument",
        }
    }

    /// Namespaces, enums and classes scope the names nested under them.
    pub fn is_namespace_like(&self) -> bool {
        matches!(self, NodeTag::Namespace | NodeTag::Enum | NodeTag::Class)
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NodeKind {
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::Namespace(_) => NodeTag::Namespace,
            NodeKind::Enum(_) => NodeTag::Enum,
            NodeKind::EnumValue => NodeTag::EnumValue,
            NodeKind::Class(_) => NodeTag::Class,
            NodeKind::Property(_) => NodeTag::Property,
            NodeKind::Method(_) => NodeTag::Method,
            NodeKind::Argument(_) => NodeTag::Argument,
        }
    }
}

/// A documentable node of the tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: Name,
    pub doc: Documentation,
    pub kind: NodeKind,
    parent: Option<NodeId>,
}

impl Node {
    /// Owning node, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn tag(&self) -> NodeTag {
        self.kind.tag()
    }
}

/// Arena holding a whole API tree, rooted at a single namespace.
#[derive(Debug, Clone)]
pub struct Api {
    nodes: Vec<Node>,
}

impl Api {
    /// Create a tree whose root namespace is named `namespace`.
    pub fn new(namespace: Name) -> Self {
        Api {
            nodes: vec![Node {
                name: namespace,
                doc: Documentation::default(),
                kind: NodeKind::Namespace(Namespace::default()),
                parent: None,
            }],
        }
    }

    /// The root namespace.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes ever created, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node. Handles are only minted by this arena, so they are always valid.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Get a node by position, for handles built from outside the arena.
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Nodes owned by `id`, in order.
    ///
    /// A property yields its setter before its getter; a method yields its
    /// arguments. Enum values and arguments own nothing.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match &self.node(id).kind {
            NodeKind::Namespace(ns) => ns.children.clone(),
            NodeKind::Enum(e) => e.values.clone(),
            NodeKind::Class(c) => c
                .properties
                .iter()
                .chain(&c.instance_methods)
                .chain(&c.class_methods)
                .copied()
                .collect(),
            NodeKind::Property(p) => p.setter.into_iter().chain(p.getter).collect(),
            NodeKind::Method(m) => m.args.clone(),
            NodeKind::EnumValue | NodeKind::Argument(_) => Vec::new(),
        }
    }

    /// Create an unattached node.
    pub fn create(&mut self, name: Name, doc: Documentation, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            doc,
            kind,
            parent: None,
        });
        id
    }

    /// Create an unattached method with no arguments and no return type yet.
    pub fn create_method(&mut self, name: Name, doc: Documentation, kind: MethodKind) -> NodeId {
        self.create(
            name,
            doc,
            NodeKind::Method(Method {
                kind,
                ..Method::default()
            }),
        )
    }

    fn claim(&self, parent: NodeId, child: NodeId, expected: Option<NodeTag>) -> Result<()> {
        let node = self.node(child);
        if node.parent.is_some() || child == self.root() {
            return Err(TranslateError::AlreadyAttached(format!(
                "{} `{}`",
                node.tag(),
                node.name
            )));
        }
        if let Some(expected) = expected {
            if node.tag() != expected {
                return Err(TranslateError::WrongKind {
                    parent: self.node(parent).tag().as_str(),
                    child: node.tag().as_str(),
                });
            }
        }
        Ok(())
    }

    fn wrong_parent(&self, parent: NodeId, child: NodeId) -> TranslateError {
        TranslateError::WrongKind {
            parent: self.node(parent).tag().as_str(),
            child: self.node(child).tag().as_str(),
        }
    }

    /// Append any node to a namespace.
    pub fn add_child(&mut self, namespace: NodeId, child: NodeId) -> Result<()> {
        self.claim(namespace, child, None)?;
        match &mut self.nodes[namespace.0].kind {
            NodeKind::Namespace(ns) => ns.children.push(child),
            _ => return Err(self.wrong_parent(namespace, child)),
        }
        self.nodes[child.0].parent = Some(namespace);
        Ok(())
    }

    /// Append a value to an enum.
    pub fn add_value(&mut self, enumeration: NodeId, value: NodeId) -> Result<()> {
        self.claim(enumeration, value, Some(NodeTag::EnumValue))?;
        match &mut self.nodes[enumeration.0].kind {
            NodeKind::Enum(e) => e.values.push(value),
            _ => return Err(self.wrong_parent(enumeration, value)),
        }
        self.nodes[value.0].parent = Some(enumeration);
        Ok(())
    }

    /// Append a property to a class.
    pub fn add_property(&mut self, class: NodeId, property: NodeId) -> Result<()> {
        self.claim(class, property, Some(NodeTag::Property))?;
        match &mut self.nodes[class.0].kind {
            NodeKind::Class(c) => c.properties.push(property),
            _ => return Err(self.wrong_parent(class, property)),
        }
        self.nodes[property.0].parent = Some(class);
        Ok(())
    }

    /// Append a method to a class's instance methods.
    pub fn add_instance_method(&mut self, class: NodeId, method: NodeId) -> Result<()> {
        self.claim(class, method, Some(NodeTag::Method))?;
        match &mut self.nodes[class.0].kind {
            NodeKind::Class(c) => c.instance_methods.push(method),
            _ => return Err(self.wrong_parent(class, method)),
        }
        self.nodes[method.0].parent = Some(class);
        Ok(())
    }

    /// Append a method to a class's class (static) methods.
    pub fn add_class_method(&mut self, class: NodeId, method: NodeId) -> Result<()> {
        self.claim(class, method, Some(NodeTag::Method))?;
        match &mut self.nodes[class.0].kind {
            NodeKind::Class(c) => c.class_methods.push(method),
            _ => return Err(self.wrong_parent(class, method)),
        }
        self.nodes[method.0].parent = Some(class);
        Ok(())
    }

    /// Give a property its getter.
    pub fn set_getter(&mut self, property: NodeId, method: NodeId) -> Result<()> {
        self.set_accessor(property, method, |p| &mut p.getter)
    }

    /// Give a property its setter.
    pub fn set_setter(&mut self, property: NodeId, method: NodeId) -> Result<()> {
        self.set_accessor(property, method, |p| &mut p.setter)
    }

    fn set_accessor(
        &mut self,
        property: NodeId,
        method: NodeId,
        slot: fn(&mut Property) -> &mut Option<NodeId>,
    ) -> Result<()> {
        self.claim(property, method, Some(NodeTag::Method))?;
        let wrong = self.wrong_parent(property, method);
        let NodeKind::Property(p) = &mut self.nodes[property.0].kind else {
            return Err(wrong);
        };
        let slot = slot(p);
        if slot.is_some() {
            return Err(TranslateError::AlreadyAttached(format!(
                "accessor of property `{}`",
                self.nodes[property.0].name
            )));
        }
        *slot = Some(method);
        self.nodes[method.0].parent = Some(property);
        Ok(())
    }

    /// Set the return type of a method.
    pub fn set_return_type(&mut self, method: NodeId, ty: Type) -> Result<()> {
        match &mut self.nodes[method.0].kind {
            NodeKind::Method(m) => {
                m.return_type = Some(ty);
                Ok(())
            }
            other => Err(TranslateError::WrongKind {
                parent: other.tag().as_str(),
                child: "return type",
            }),
        }
    }

    /// Append an argument to a method.
    pub fn add_argument(&mut self, method: NodeId, argument: NodeId) -> Result<()> {
        self.claim(method, argument, Some(NodeTag::Argument))?;
        match &mut self.nodes[method.0].kind {
            NodeKind::Method(m) => m.args.push(argument),
            _ => return Err(self.wrong_parent(method, argument)),
        }
        self.nodes[argument.0].parent = Some(method);
        Ok(())
    }

    /// Remove a node from its owner's sequence.
    ///
    /// The node keeps its parent handle but is no longer reachable from the
    /// root. Detaching a property removes its accessors along with it.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.0].parent else {
            return;
        };
        let keep = |other: &NodeId| *other != id;
        match &mut self.nodes[parent.0].kind {
            NodeKind::Namespace(ns) => ns.children.retain(keep),
            NodeKind::Enum(e) => e.values.retain(keep),
            NodeKind::Class(c) => {
                c.properties.retain(keep);
                c.instance_methods.retain(keep);
                c.class_methods.retain(keep);
            }
            NodeKind::Property(p) => {
                if p.getter == Some(id) {
                    p.getter = None;
                }
                if p.setter == Some(id) {
                    p.setter = None;
                }
            }
            NodeKind::Method(m) => m.args.retain(keep),
            NodeKind::EnumValue | NodeKind::Argument(_) => {}
        }
    }

    /// Nearest node, starting with `id` itself, that scopes nested names.
    pub fn get_namespace_object(&self, id: NodeId) -> Result<NodeId> {
        let mut current = id;
        loop {
            let node = self.node(current);
            if node.tag().is_namespace_like() {
                return Ok(current);
            }
            match node.parent {
                Some(parent) => current = parent,
                None => {
                    let node = self.node(id);
                    return Err(TranslateError::Detached(format!(
                        "{} `{}`",
                        node.tag(),
                        node.name
                    )));
                }
            }
        }
    }

    /// Nearest strict ancestor of kind `tag`.
    pub fn find_first_ancestor_by_type(&self, id: NodeId, tag: NodeTag) -> Option<NodeId> {
        let mut ancestor = self.node(id).parent;
        while let Some(current) = ancestor {
            if self.node(current).tag() == tag {
                return Some(current);
            }
            ancestor = self.node(current).parent;
        }
        None
    }

    pub fn namespace(&self, id: NodeId) -> Option<&Namespace> {
        match &self.node(id).kind {
            NodeKind::Namespace(ns) => Some(ns),
            _ => None,
        }
    }

    pub fn enumeration(&self, id: NodeId) -> Option<&Enum> {
        match &self.node(id).kind {
            NodeKind::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn class(&self, id: NodeId) -> Option<&Class> {
        match &self.node(id).kind {
            NodeKind::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn property(&self, id: NodeId) -> Option<&Property> {
        match &self.node(id).kind {
            NodeKind::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn method(&self, id: NodeId) -> Option<&Method> {
        match &self.node(id).kind {
            NodeKind::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn method_mut(&mut self, id: NodeId) -> Option<&mut Method> {
        match &mut self.node_mut(id).kind {
            NodeKind::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn argument(&self, id: NodeId) -> Option<&Argument> {
        match &self.node(id).kind {
            NodeKind::Argument(a) => Some(a),
            _ => None,
        }
    }

    pub fn argument_mut(&mut self, id: NodeId) -> Option<&mut Argument> {
        match &mut self.node_mut(id).kind {
            NodeKind::Argument(a) => Some(a),
            _ => None,
        }
    }

    /// Children of the root namespace with the given tag, in declaration order.
    fn top_level(&self, tag: NodeTag) -> Vec<NodeId> {
        self.namespace(self.root())
            .map(|ns| {
                ns.children
                    .iter()
                    .copied()
                    .filter(|child| self.node(*child).tag() == tag)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Enums attached to the root namespace.
    pub fn enums(&self) -> Vec<NodeId> {
        self.top_level(NodeTag::Enum)
    }

    /// Classes attached to the root namespace.
    pub fn classes(&self) -> Vec<NodeId> {
        self.top_level(NodeTag::Class)
    }

    /// Every method of a class: property setters and getters first, then
    /// instance methods, then class methods.
    pub fn all_methods(&self, class: NodeId) -> Vec<NodeId> {
        let Some(c) = self.class(class) else {
            return Vec::new();
        };
        let mut methods = Vec::new();
        for property in &c.properties {
            if let Some(p) = self.property(*property) {
                methods.extend(p.setter);
                methods.extend(p.getter);
            }
        }
        methods.extend(c.instance_methods.iter().copied());
        methods.extend(c.class_methods.iter().copied());
        methods
    }

    /// Return type followed by argument types of a method.
    pub fn method_types(&self, method: NodeId) -> Vec<&Type> {
        let Some(m) = self.method(method) else {
            return Vec::new();
        };
        m.return_type
            .iter()
            .chain(
                m.args
                    .iter()
                    .filter_map(|arg| self.argument(*arg).map(|a| &a.ty)),
            )
            .collect()
    }

    /// Every reachable method holding a type whose descriptor is still pending,
    /// with the pending type's name. The tree is complete when this is empty.
    pub fn unresolved_types(&self) -> Vec<(NodeId, String)> {
        self.classes()
            .into_iter()
            .flat_map(|class| self.all_methods(class))
            .flat_map(move |method| {
                self.method_types(method)
                    .into_iter()
                    .filter(|ty| !ty.is_resolved())
                    .map(move |ty| (method, ty.name().to_string()))
            })
            .collect()
    }
}
