//! Translation of raw C metadata into the abstract API tree.
//!
//! Translation runs in three passes over the project:
//! 1. enums, registered in the enum index as they are built
//! 2. classes with their properties and methods
//! 3. type resolution, which fills every enum/class/list descriptor left
//!    pending because the referenced declaration came later in the input
//!
//! A failure is contained at the smallest enclosing item (enum value,
//! property, method, class); the item is left out of the tree and recorded
//! in the [`Report`].

use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, info};

use super::base_type::{is_fixed_size_integer, parse_c_base_type};
use super::project::{CArgument, CClass, CEnum, CFunction, CProject};
use super::report::{Report, Scope};
use crate::core::{
    Api, Argument, Class, Documentation, Enum, MethodKind, Name, NameKind, NodeId, NodeKind,
    Property, Result, TranslateError, Type, TypeKind,
};
use crate::util::config::{ClassMethodPlacement, ParserConfig};
use crate::util::interning::Symbol;

/// Outcome of a translation run.
#[derive(Debug, Clone)]
pub struct Translation {
    /// The tree, rooted at the top namespace
    pub api: Api,
    /// Items left out of the tree
    pub report: Report,
}

impl Translation {
    /// Whether every type of the tree is resolved.
    pub fn is_complete(&self) -> bool {
        self.api.unresolved_types().is_empty()
    }
}

/// A method parsed from C but not yet inserted in the tree.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: Name,
    pub doc: Documentation,
    pub kind: MethodKind,
    pub const_method: bool,
    pub return_type: Type,
    pub args: Vec<ArgumentDecl>,
}

/// An argument parsed from C but not yet inserted in the tree.
#[derive(Debug, Clone)]
pub struct ArgumentDecl {
    pub name: Name,
    pub doc: Documentation,
    pub ty: Type,
}

/// Enums and classes by raw C spelling.
///
/// An entry is `None` from the moment the declaration is known until the
/// node is built. Entries only ever go from pending to built.
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    enums: HashMap<Symbol, Option<NodeId>>,
    classes: HashMap<Symbol, Option<NodeId>>,
}

impl TypeIndex {
    /// Record every enum and class declared by `project` as pending.
    pub fn seed(project: &CProject) -> Self {
        let mut index = TypeIndex::default();
        for e in &project.enums {
            index.enums.insert(Symbol::new(e.type_name()), None);
        }
        for class in &project.classes {
            index.classes.insert(Symbol::new(&class.name), None);
        }
        index
    }

    pub fn has_enum(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// The built enum for `name`, if any.
    pub fn enum_node(&self, name: &str) -> Option<NodeId> {
        self.enums.get(name).copied().flatten()
    }

    /// The built class for `name`, if any.
    pub fn class_node(&self, name: &str) -> Option<NodeId> {
        self.classes.get(name).copied().flatten()
    }

    fn register_enum(&mut self, keys: &[&str], id: NodeId) {
        for key in keys {
            self.enums.insert(Symbol::new(key), Some(id));
        }
    }

    fn register_class(&mut self, keys: &[&str], id: NodeId) {
        for key in keys {
            self.classes.insert(Symbol::new(key), Some(id));
        }
    }

    fn built_enum(&self, name: &str) -> Result<NodeId> {
        self.enum_node(name)
            .ok_or_else(|| TranslateError::UnresolvedReference(name.to_string()))
    }

    fn built_class(&self, name: &str) -> Result<NodeId> {
        self.class_node(name)
            .ok_or_else(|| TranslateError::UnresolvedReference(name.to_string()))
    }

    /// Fill the descriptor of `ty` if it is still pending.
    ///
    /// Types that are already resolved are left untouched.
    pub fn resolve(&self, ty: &mut Type, config: &ParserConfig) -> Result<()> {
        match &mut ty.kind {
            TypeKind::Enum(e) if e.desc.is_none() => {
                let id = self.built_enum(&e.name)?;
                e.desc = Some(id);
            }
            TypeKind::Class(c) if c.desc.is_none() => {
                let id = self.built_class(&c.name)?;
                c.desc = Some(id);
            }
            TypeKind::List(list) if list.contained_desc.is_none() => {
                let contained = list
                    .contained_name
                    .as_deref()
                    .ok_or_else(|| TranslateError::MissingContainedType(config.list_type.clone()))?;

                let desc = if self.has_class(contained) {
                    let mut ty = Type::class_ref(contained);
                    if let TypeKind::Class(c) = &mut ty.kind {
                        c.desc = Some(self.built_class(contained)?);
                    }
                    ty
                } else if self.has_enum(contained) {
                    let mut ty = Type::enum_ref(contained);
                    if let TypeKind::Enum(e) = &mut ty.kind {
                        e.desc = Some(self.built_enum(contained)?);
                    }
                    ty
                } else {
                    parse_c_base_type(contained, &config.bool_type)?
                };
                list.contained_desc = Some(Box::new(desc));
            }
            _ => {}
        }
        Ok(())
    }
}

/// Const and reference qualifiers of an enum, class or list declaration.
fn qualifiers(complete_type: &str, ctype: &str) -> (bool, bool) {
    let normalized = complete_type.replace('*', " * ");
    let mut seen_name = false;
    let mut is_const = false;
    let mut is_ref = false;
    for token in normalized.split_whitespace() {
        match token {
            "const" if !seen_name => is_const = true,
            "*" => is_ref = true,
            t if t == ctype => seen_name = true,
            _ => {}
        }
    }
    (is_const, is_ref)
}

/// Translator from a [`CProject`] to an [`Api`].
pub struct CParser<'a> {
    project: &'a CProject,
    config: ParserConfig,
    namespace: Rc<Name>,
    index: TypeIndex,
    api: Api,
    report: Report,
}

impl<'a> CParser<'a> {
    /// Create a parser over `project`, with every declaration pending.
    pub fn new(project: &'a CProject, config: ParserConfig) -> Self {
        let namespace = Name::namespace(config.namespace.split('_'));
        let api = Api::new(namespace.clone());
        CParser {
            project,
            namespace: Rc::new(namespace),
            index: TypeIndex::seed(project),
            config,
            api,
            report: Report::new(),
        }
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Run every pass and hand over the tree.
    pub fn parse_all(mut self) -> Translation {
        let project = self.project;

        for cenum in &project.enums {
            if let Err(e) = self.parse_enum(cenum) {
                self.report.skip(Scope::Enum, cenum.type_name(), None, e);
            }
        }
        info!("Translated {} of {} enums", self.api.enums().len(), project.enums.len());

        for cclass in &project.classes {
            if let Err(e) = self.parse_class(cclass) {
                self.report.skip(Scope::Class, &cclass.name, None, e);
            }
        }
        info!(
            "Translated {} of {} classes",
            self.api.classes().len(),
            project.classes.len()
        );

        self.fix_all_types();

        Translation {
            api: self.api,
            report: self.report,
        }
    }

    /// Classify a raw C type.
    pub fn parse_type(&self, raw: &CArgument) -> Result<Type> {
        let ctype = raw.ctype.as_str();

        if self.config.base_types.iter().any(|t| t == ctype) || is_fixed_size_integer(ctype) {
            return self.parse_c_base_type(&raw.complete_type);
        }

        let (is_const, is_ref) = qualifiers(&raw.complete_type, ctype);
        let ty = if self.index.has_enum(ctype) {
            let mut ty = Type::enum_ref(ctype);
            if let TypeKind::Enum(e) = &mut ty.kind {
                e.desc = self.index.enum_node(ctype);
            }
            ty
        } else if self.index.has_class(ctype) {
            let mut ty = Type::class_ref(ctype);
            if let TypeKind::Class(c) = &mut ty.kind {
                c.desc = self.index.class_node(ctype);
            }
            ty
        } else if ctype == self.config.list_type {
            Type::list_of(raw.contained_type.clone())
        } else {
            return Err(TranslateError::UnknownType(ctype.to_string()));
        };

        Ok(ty.with_const(is_const).with_ref(is_ref))
    }

    /// Parse a C base type declaration with this parser's boolean spelling.
    pub fn parse_c_base_type(&self, decl: &str) -> Result<Type> {
        parse_c_base_type(decl, &self.config.bool_type)
    }

    /// Build one enum and attach it to the top namespace.
    pub fn parse_enum(&mut self, cenum: &CEnum) -> Result<NodeId> {
        let raw_name = cenum.type_name();
        let name = Rc::new(Name::from_camel_case(
            NameKind::Enum,
            raw_name,
            false,
            Some(&self.namespace),
        )?);

        let mut values = Vec::with_capacity(cenum.values.len());
        for value in &cenum.values {
            match Name::from_camel_case(NameKind::EnumValue, &value.name, false, Some(&name)) {
                Ok(value_name) => values.push((value_name, value.doc.clone())),
                Err(e) => self
                    .report
                    .skip(Scope::EnumValue, &value.name, Some(raw_name), e),
            }
        }

        let id = self.api.create(
            (*name).clone(),
            cenum.doc.clone(),
            NodeKind::Enum(Enum::default()),
        );
        self.api.add_child(self.api.root(), id)?;
        for (value_name, doc) in values {
            let value = self.api.create(value_name, doc, NodeKind::EnumValue);
            self.api.add_value(id, value)?;
        }

        let rendered = name.to_camel_case(false, true);
        self.index.register_enum(&[raw_name, rendered.as_str()], id);
        debug!("Built enum {} ({} values)", rendered, cenum.values.len());
        Ok(id)
    }

    /// Build one class with its properties and methods and attach it to the
    /// top namespace.
    pub fn parse_class(&mut self, cclass: &CClass) -> Result<NodeId> {
        let name = Rc::new(Name::from_camel_case(
            NameKind::Class,
            &cclass.name,
            false,
            Some(&self.namespace),
        )?);

        let id = self.api.create(
            (*name).clone(),
            cclass.doc.clone(),
            NodeKind::Class(Class::default()),
        );
        self.api.add_child(self.api.root(), id)?;

        for property in &cclass.properties {
            let parsed = Name::from_snake_case(NameKind::Property, &property.name, None)
                .and_then(|pname| {
                    let setter = property
                        .setter
                        .as_ref()
                        .map(|f| self.parse_method(f, &name, MethodKind::Instance))
                        .transpose()?;
                    let getter = property
                        .getter
                        .as_ref()
                        .map(|f| self.parse_method(f, &name, MethodKind::Instance))
                        .transpose()?;
                    Ok((pname, setter, getter))
                });

            match parsed {
                Ok((pname, setter, getter)) => {
                    let pid = self.api.create(
                        pname,
                        Documentation::default(),
                        NodeKind::Property(Property::default()),
                    );
                    if let Some(setter) = setter {
                        let method = self.insert_method(setter)?;
                        self.api.set_setter(pid, method)?;
                    }
                    if let Some(getter) = getter {
                        let method = self.insert_method(getter)?;
                        self.api.set_getter(pid, method)?;
                    }
                    self.api.add_property(id, pid)?;
                }
                Err(e) => self
                    .report
                    .skip(Scope::Property, &property.name, Some(cclass.name.as_str()), e),
            }
        }

        for function in &cclass.instance_methods {
            match self.parse_method(function, &name, MethodKind::Instance) {
                Ok(decl) => {
                    let method = self.insert_method(decl)?;
                    self.api.add_instance_method(id, method)?;
                }
                Err(e) => self
                    .report
                    .skip(Scope::Method, &function.name, Some(cclass.name.as_str()), e),
            }
        }

        for function in &cclass.class_methods {
            let parsed = match self.config.class_methods {
                ClassMethodPlacement::Separate => {
                    self.parse_method(function, &name, MethodKind::Class)
                }
                ClassMethodPlacement::Instance => {
                    self.parse_method(function, &name, MethodKind::Instance)
                }
            };
            match parsed {
                Ok(decl) => {
                    let method = self.insert_method(decl)?;
                    match self.config.class_methods {
                        ClassMethodPlacement::Separate => self.api.add_class_method(id, method)?,
                        ClassMethodPlacement::Instance => {
                            self.api.add_instance_method(id, method)?
                        }
                    }
                }
                Err(e) => self
                    .report
                    .skip(Scope::Method, &function.name, Some(cclass.name.as_str()), e),
            }
        }

        let rendered = name.to_camel_case(false, true);
        self.index.register_class(&[cclass.name.as_str(), rendered.as_str()], id);
        debug!(
            "Built class {} ({} properties, {} methods)",
            rendered,
            cclass.properties.len(),
            cclass.instance_methods.len() + cclass.class_methods.len()
        );
        Ok(id)
    }

    /// Parse a C function as a method of the class named `namespace`.
    ///
    /// For instance methods, the first argument is the receiver: only its
    /// const qualifier is kept.
    pub fn parse_method(
        &self,
        function: &CFunction,
        namespace: &Rc<Name>,
        kind: MethodKind,
    ) -> Result<MethodDecl> {
        let name = Name::from_snake_case(NameKind::Method, &function.name, Some(namespace))?;
        let return_type = self.parse_type(&function.return_argument)?;

        let mut const_method = false;
        let mut args = Vec::with_capacity(function.arguments.len());
        for (i, arg) in function.arguments.iter().enumerate() {
            if kind == MethodKind::Instance && i == 0 {
                const_method = arg
                    .complete_type
                    .replace('*', " * ")
                    .split_whitespace()
                    .any(|t| t == "const");
                continue;
            }
            let ty = self.parse_type(arg)?;
            let arg_name = Name::from_snake_case(NameKind::Argument, &arg.name, None)?;
            args.push(ArgumentDecl {
                name: arg_name,
                doc: arg.doc.clone(),
                ty,
            });
        }

        Ok(MethodDecl {
            name,
            doc: function.doc.clone(),
            kind,
            const_method,
            return_type,
            args,
        })
    }

    fn insert_method(&mut self, decl: MethodDecl) -> Result<NodeId> {
        let method = self.api.create_method(decl.name, decl.doc, decl.kind);
        self.api.set_return_type(method, decl.return_type)?;
        if let Some(m) = self.api.method_mut(method) {
            m.const_method = decl.const_method;
        }
        for arg in decl.args {
            let arg_id = self
                .api
                .create(arg.name, arg.doc, NodeKind::Argument(Argument::new(arg.ty)));
            self.api.add_argument(method, arg_id)?;
        }
        Ok(method)
    }

    /// Resolve every pending type of every built class.
    ///
    /// A method whose types cannot all be resolved is detached from the tree
    /// (for an accessor, the whole property is), so what remains is complete.
    /// Running it again over a resolved tree changes nothing.
    pub fn fix_all_types(&mut self) {
        for class in self.api.classes() {
            let class_name = self.api.node(class).name.to_camel_case(false, true);
            let Some(c) = self.api.class(class).cloned() else {
                continue;
            };

            for property in c.properties {
                let Some(p) = self.api.property(property).cloned() else {
                    continue;
                };
                for accessor in p.setter.into_iter().chain(p.getter) {
                    if let Err(e) = self.fix_all_types_in_method(accessor) {
                        let item = self.api.node(accessor).name.to_snake_case(true);
                        self.report
                            .skip(Scope::TypeResolution, item, Some(class_name.as_str()), e);
                        self.api.detach(property);
                        break;
                    }
                }
            }

            for method in c.instance_methods.into_iter().chain(c.class_methods) {
                if let Err(e) = self.fix_all_types_in_method(method) {
                    let item = self.api.node(method).name.to_snake_case(true);
                    self.report
                        .skip(Scope::TypeResolution, item, Some(class_name.as_str()), e);
                    self.api.detach(method);
                }
            }
        }
    }

    fn fix_all_types_in_method(&mut self, method: NodeId) -> Result<()> {
        let index = &self.index;
        let config = &self.config;

        let args = match self.api.method_mut(method) {
            Some(m) => {
                if let Some(return_type) = m.return_type.as_mut() {
                    index.resolve(return_type, config)?;
                }
                m.args.clone()
            }
            None => return Ok(()),
        };

        for arg in args {
            if let Some(a) = self.api.argument_mut(arg) {
                index.resolve(&mut a.ty, config)?;
            }
        }
        Ok(())
    }
}
