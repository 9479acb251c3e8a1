//! Indented text outline of a tree.
//!
//! ```text
//! namespace linphone
//!   enum CallState
//!     Idle
//!   class Core
//!     property mtu
//!       set: fn setMtu(mtu: integer) -> void
//!       get: fn getMtu() -> integer const
//!     static fn new(configPath: const string) -> Core*
//! ```

use crate::core::{
    Api, BaseType, ClassType, EnumType, ListType, MethodKind, Name, NodeId, Result,
    TranslateError, Type,
};

use super::{NameParams, Translatable, Translator};

const INDENT: &str = "  ";

/// Backend rendering a tree as an outline.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    /// Render enum and class references with their full name
    pub full_type_names: bool,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the whole tree, root namespace first.
    pub fn render(&mut self, api: &Api) -> Result<String> {
        let root = api.root();
        let mut out = format!(
            "namespace {}\n",
            self.translate_name(&api.node(root).name, &NameParams::full())?
        );
        for child in api.children(root) {
            let rendered = self.translate(api, Translatable::Object(child))?;
            push_indented(&mut out, &rendered);
        }
        Ok(out)
    }

    fn local_name(&mut self, api: &Api, id: NodeId) -> Result<String> {
        self.translate_name(&api.node(id).name, &NameParams::local())
    }

    fn reference(&mut self, api: &Api, raw: &str, desc: Option<NodeId>) -> Result<String> {
        let Some(id) = desc else {
            return Err(TranslateError::UnresolvedReference(raw.to_string()));
        };
        let params = if self.full_type_names {
            NameParams::full()
        } else {
            NameParams::local()
        };
        self.translate_name(&api.node(id).name, &params)
    }
}

/// Append every line of `block` to `out`, one level deeper.
fn push_indented(out: &mut String, block: &str) {
    for line in block.lines() {
        out.push_str(INDENT);
        out.push_str(line);
        out.push('\n');
    }
}

fn qualify(ty: &Type, rendered: String) -> String {
    let mut out = String::new();
    if ty.is_const {
        out.push_str("const ");
    }
    out.push_str(&rendered);
    if ty.is_ref {
        out.push('*');
    }
    out
}

fn camel(name: &Name, lower: bool, params: &NameParams) -> Result<String> {
    Ok(params.apply(name)?.to_camel_case(lower, params.full))
}

fn snake(name: &Name, params: &NameParams) -> Result<String> {
    Ok(params.apply(name)?.to_snake_case(params.full))
}

impl Translator for Outline {
    type Output = String;

    fn translate_enum(&mut self, api: &Api, id: NodeId) -> Result<String> {
        let mut out = format!("enum {}\n", self.local_name(api, id)?);
        for value in api.children(id) {
            let rendered = self.translate(api, Translatable::Object(value))?;
            push_indented(&mut out, &rendered);
        }
        Ok(out)
    }

    fn translate_enum_value(&mut self, api: &Api, id: NodeId) -> Result<String> {
        self.local_name(api, id)
    }

    fn translate_class(&mut self, api: &Api, id: NodeId) -> Result<String> {
        let mut out = format!("class {}\n", self.local_name(api, id)?);
        for member in api.children(id) {
            let rendered = self.translate(api, Translatable::Object(member))?;
            push_indented(&mut out, &rendered);
        }
        Ok(out)
    }

    fn translate_method(&mut self, api: &Api, id: NodeId) -> Result<String> {
        let Some(method) = api.method(id) else {
            return Err(TranslateError::WrongKind {
                parent: "outline",
                child: api.node(id).tag().as_str(),
            });
        };

        let mut args = Vec::with_capacity(method.args.len());
        for arg in &method.args {
            args.push(self.translate(api, Translatable::Object(*arg))?);
        }
        let ret = match &method.return_type {
            Some(ty) => self.translate(api, Translatable::Type(ty))?,
            None => "void".to_string(),
        };

        let name = self.translate_name(&api.node(id).name, &NameParams::local())?;
        let prefix = match method.kind {
            MethodKind::Instance => "fn",
            MethodKind::Class => "static fn",
        };
        let suffix = if method.const_method { " const" } else { "" };
        Ok(format!("{} {}({}) -> {}{}", prefix, name, args.join(", "), ret, suffix))
    }

    fn translate_argument(&mut self, api: &Api, id: NodeId) -> Result<String> {
        let name = self.local_name(api, id)?;
        let ty = match api.argument(id) {
            Some(arg) => self.translate(api, Translatable::Type(&arg.ty))?,
            None => {
                return Err(TranslateError::WrongKind {
                    parent: "outline",
                    child: api.node(id).tag().as_str(),
                })
            }
        };
        Ok(format!("{}: {}", name, ty))
    }

    fn translate_property(&mut self, api: &Api, id: NodeId) -> Result<String> {
        let mut out = format!("property {}\n", self.local_name(api, id)?);
        if let Some(property) = api.property(id) {
            if let Some(setter) = property.setter {
                let rendered = self.translate(api, Translatable::Object(setter))?;
                push_indented(&mut out, &format!("set: {}", rendered));
            }
            if let Some(getter) = property.getter {
                let rendered = self.translate(api, Translatable::Object(getter))?;
                push_indented(&mut out, &format!("get: {}", rendered));
            }
        }
        Ok(out)
    }

    fn translate_base_type(&mut self, _: &Api, ty: &Type, base: &BaseType) -> Result<String> {
        let mut words = Vec::new();
        if base.unsigned {
            words.push("unsigned".to_string());
        }
        if let Some(size) = base.size {
            words.push(size.to_string());
        }
        words.push(base.kind.to_string());
        Ok(qualify(ty, words.join(" ")))
    }

    fn translate_enum_type(&mut self, api: &Api, ty: &Type, e: &EnumType) -> Result<String> {
        let name = self.reference(api, &e.name, e.desc)?;
        Ok(qualify(ty, name))
    }

    fn translate_class_type(&mut self, api: &Api, ty: &Type, c: &ClassType) -> Result<String> {
        let name = self.reference(api, &c.name, c.desc)?;
        Ok(qualify(ty, name))
    }

    fn translate_list_type(&mut self, api: &Api, ty: &Type, list: &ListType) -> Result<String> {
        let contained = list.contained_desc.as_deref().ok_or_else(|| {
            TranslateError::UnresolvedReference(
                list.contained_name.clone().unwrap_or_else(|| "list".to_string()),
            )
        })?;
        let inner = self.translate(api, Translatable::Type(contained))?;
        Ok(qualify(ty, format!("list<{}>", inner)))
    }

    fn translate_namespace_name(&mut self, name: &Name, params: &NameParams) -> Result<String> {
        snake(name, params)
    }

    fn translate_class_name(&mut self, name: &Name, params: &NameParams) -> Result<String> {
        camel(name, false, params)
    }

    fn translate_enum_name(&mut self, name: &Name, params: &NameParams) -> Result<String> {
        camel(name, false, params)
    }

    fn translate_enum_value_name(&mut self, name: &Name, params: &NameParams) -> Result<String> {
        camel(name, false, params)
    }

    fn translate_method_name(&mut self, name: &Name, params: &NameParams) -> Result<String> {
        camel(name, true, params)
    }

    fn translate_argument_name(&mut self, name: &Name, params: &NameParams) -> Result<String> {
        camel(name, true, params)
    }

    fn translate_property_name(&mut self, name: &Name, params: &NameParams) -> Result<String> {
        snake(name, params)
    }
}
