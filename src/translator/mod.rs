//! Contract between the abstract API tree and language backends.
//!
//! A backend implements one handler per concrete kind of object, type and
//! name. [`Translator::translate`] routes any [`Translatable`] to exactly one
//! of them: first by category, then by kind. Both levels are exhaustive
//! matches over closed enums, so a kind added to the model cannot be
//! forgotten here.

pub mod outline;

use std::rc::Rc;

use crate::core::{
    Api, BaseType, ClassType, EnumType, ListType, Name, NameKind, NodeId, NodeKind, Result,
    TranslateError, Type, TypeKind,
};

pub use outline::Outline;

/// Anything a backend can be asked to translate.
#[derive(Debug, Clone, Copy)]
pub enum Translatable<'t> {
    /// A node of the tree
    Object(NodeId),
    Type(&'t Type),
    /// An identifier, with rendering parameters
    Name(&'t Name, &'t NameParams),
}

/// Rendering parameters of a name.
#[derive(Debug, Clone, Default)]
pub struct NameParams {
    /// Render every ancestor down from the root (or from `top_ancestor`)
    pub full: bool,
    /// Drop this ancestor and everything above it before rendering
    pub top_ancestor: Option<Rc<Name>>,
}

impl NameParams {
    /// Local rendering.
    pub fn local() -> Self {
        NameParams::default()
    }

    /// Full rendering.
    pub fn full() -> Self {
        NameParams {
            full: true,
            top_ancestor: None,
        }
    }

    /// Full rendering below `ancestor`.
    pub fn relative_to(ancestor: Rc<Name>) -> Self {
        NameParams {
            full: true,
            top_ancestor: Some(ancestor),
        }
    }

    /// The name to render: `name` itself, or a copy cut below `top_ancestor`.
    pub fn apply(&self, name: &Name) -> Result<Name> {
        let mut name = name.clone();
        if let Some(ancestor) = &self.top_ancestor {
            name.delete_prefix(ancestor)?;
        }
        Ok(name)
    }
}

/// A language backend.
///
/// Handlers receive the tree so they can follow handles and recurse through
/// [`Translator::translate`].
pub trait Translator {
    type Output;

    fn translate_enum(&mut self, api: &Api, id: NodeId) -> Result<Self::Output>;
    fn translate_enum_value(&mut self, api: &Api, id: NodeId) -> Result<Self::Output>;
    fn translate_class(&mut self, api: &Api, id: NodeId) -> Result<Self::Output>;
    fn translate_method(&mut self, api: &Api, id: NodeId) -> Result<Self::Output>;
    fn translate_argument(&mut self, api: &Api, id: NodeId) -> Result<Self::Output>;
    fn translate_property(&mut self, api: &Api, id: NodeId) -> Result<Self::Output>;

    fn translate_base_type(&mut self, api: &Api, ty: &Type, base: &BaseType)
        -> Result<Self::Output>;
    fn translate_enum_type(&mut self, api: &Api, ty: &Type, e: &EnumType) -> Result<Self::Output>;
    fn translate_class_type(&mut self, api: &Api, ty: &Type, c: &ClassType)
        -> Result<Self::Output>;
    fn translate_list_type(&mut self, api: &Api, ty: &Type, list: &ListType)
        -> Result<Self::Output>;

    fn translate_namespace_name(&mut self, name: &Name, params: &NameParams)
        -> Result<Self::Output>;
    fn translate_class_name(&mut self, name: &Name, params: &NameParams) -> Result<Self::Output>;
    fn translate_enum_name(&mut self, name: &Name, params: &NameParams) -> Result<Self::Output>;
    fn translate_enum_value_name(&mut self, name: &Name, params: &NameParams)
        -> Result<Self::Output>;
    fn translate_method_name(&mut self, name: &Name, params: &NameParams) -> Result<Self::Output>;
    fn translate_argument_name(&mut self, name: &Name, params: &NameParams)
        -> Result<Self::Output>;
    fn translate_property_name(&mut self, name: &Name, params: &NameParams)
        -> Result<Self::Output>;

    /// Route `item` to its handler.
    fn translate(&mut self, api: &Api, item: Translatable<'_>) -> Result<Self::Output> {
        match item {
            Translatable::Object(id) => self.translate_object(api, id),
            Translatable::Type(ty) => self.translate_type(api, ty),
            Translatable::Name(name, params) => self.translate_name(name, params),
        }
    }

    /// Route a node to its handler. Namespaces have none.
    fn translate_object(&mut self, api: &Api, id: NodeId) -> Result<Self::Output> {
        match &api.node(id).kind {
            NodeKind::Enum(_) => self.translate_enum(api, id),
            NodeKind::EnumValue => self.translate_enum_value(api, id),
            NodeKind::Class(_) => self.translate_class(api, id),
            NodeKind::Method(_) => self.translate_method(api, id),
            NodeKind::Argument(_) => self.translate_argument(api, id),
            NodeKind::Property(_) => self.translate_property(api, id),
            NodeKind::Namespace(_) => Err(TranslateError::Untranslatable(format!(
                "namespace `{}`",
                api.node(id).name
            ))),
        }
    }

    fn translate_type(&mut self, api: &Api, ty: &Type) -> Result<Self::Output> {
        match &ty.kind {
            TypeKind::Base(base) => self.translate_base_type(api, ty, base),
            TypeKind::Enum(e) => self.translate_enum_type(api, ty, e),
            TypeKind::Class(c) => self.translate_class_type(api, ty, c),
            TypeKind::List(list) => self.translate_list_type(api, ty, list),
        }
    }

    fn translate_name(&mut self, name: &Name, params: &NameParams) -> Result<Self::Output> {
        match name.kind() {
            NameKind::Namespace => self.translate_namespace_name(name, params),
            NameKind::Class => self.translate_class_name(name, params),
            NameKind::Enum => self.translate_enum_name(name, params),
            NameKind::EnumValue => self.translate_enum_value_name(name, params),
            NameKind::Method => self.translate_method_name(name, params),
            NameKind::Argument => self.translate_argument_name(name, params),
            NameKind::Property => self.translate_property_name(name, params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Class, Documentation, MethodKind, NodeTag};

    /// Records which handler each item reached.
    #[derive(Default)]
    struct Probe;

    impl Translator for Probe {
        type Output = &'static str;

        fn translate_enum(&mut self, _: &Api, _: NodeId) -> Result<&'static str> {
            Ok("enum")
        }
        fn translate_enum_value(&mut self, _: &Api, _: NodeId) -> Result<&'static str> {
            Ok("enum value")
        }
        fn translate_class(&mut self, _: &Api, _: NodeId) -> Result<&'static str> {
            Ok("class")
        }
        fn translate_method(&mut self, _: &Api, _: NodeId) -> Result<&'static str> {
            Ok("method")
        }
        fn translate_argument(&mut self, _: &Api, _: NodeId) -> Result<&'static str> {
            Ok("argument")
        }
        fn translate_property(&mut self, _: &Api, _: NodeId) -> Result<&'static str> {
            Ok("property")
        }
        fn translate_base_type(&mut self, _: &Api, _: &Type, _: &BaseType) -> Result<&'static str> {
            Ok("base type")
        }
        fn translate_enum_type(&mut self, _: &Api, _: &Type, _: &EnumType) -> Result<&'static str> {
            Ok("enum type")
        }
        fn translate_class_type(
            &mut self,
            _: &Api,
            _: &Type,
            _: &ClassType,
        ) -> Result<&'static str> {
            Ok("class type")
        }
        fn translate_list_type(&mut self, _: &Api, _: &Type, _: &ListType) -> Result<&'static str> {
            Ok("list type")
        }
        fn translate_namespace_name(&mut self, _: &Name, _: &NameParams) -> Result<&'static str> {
            Ok("namespace name")
        }
        fn translate_class_name(&mut self, _: &Name, _: &NameParams) -> Result<&'static str> {
            Ok("class name")
        }
        fn translate_enum_name(&mut self, _: &Name, _: &NameParams) -> Result<&'static str> {
            Ok("enum name")
        }
        fn translate_enum_value_name(&mut self, _: &Name, _: &NameParams) -> Result<&'static str> {
            Ok("enum value name")
        }
        fn translate_method_name(&mut self, _: &Name, _: &NameParams) -> Result<&'static str> {
            Ok("method name")
        }
        fn translate_argument_name(&mut self, _: &Name, _: &NameParams) -> Result<&'static str> {
            Ok("argument name")
        }
        fn translate_property_name(&mut self, _: &Name, _: &NameParams) -> Result<&'static str> {
            Ok("property name")
        }
    }

    #[test]
    fn test_objects_reach_their_handler() {
        let mut api = Api::new(Name::namespace(["linphone"]));
        let class = api.create(
            Name::new(NameKind::Class, ["core"]),
            Documentation::default(),
            NodeKind::Class(Class::default()),
        );
        let method = api.create_method(
            Name::new(NameKind::Method, ["stop"]),
            Documentation::default(),
            MethodKind::Instance,
        );

        let mut probe = Probe;
        assert_eq!(probe.translate(&api, Translatable::Object(class)), Ok("class"));
        assert_eq!(probe.translate(&api, Translatable::Object(method)), Ok("method"));
        assert_eq!(api.node(api.root()).tag(), NodeTag::Namespace);
    }

    #[test]
    fn test_namespace_object_is_untranslatable() {
        let api = Api::new(Name::namespace(["linphone"]));
        let err = Probe.translate(&api, Translatable::Object(api.root())).unwrap_err();
        assert!(err.is_invariant_violation());
        assert_eq!(err.to_string(), "cannot translate namespace `linphone`");
    }

    #[test]
    fn test_types_and_names_reach_their_handler() {
        let api = Api::new(Name::namespace(["linphone"]));
        let mut probe = Probe;

        let list = Type::list_of(Some("LinphoneCall".to_string()));
        assert_eq!(probe.translate(&api, Translatable::Type(&list)), Ok("list type"));
        let class = Type::class_ref("LinphoneCall");
        assert_eq!(probe.translate(&api, Translatable::Type(&class)), Ok("class type"));

        let params = NameParams::local();
        let value = Name::new(NameKind::EnumValue, ["idle"]);
        assert_eq!(
            probe.translate(&api, Translatable::Name(&value, &params)),
            Ok("enum value name")
        );
        let ns = Name::namespace(["linphone"]);
        assert_eq!(
            probe.translate(&api, Translatable::Name(&ns, &params)),
            Ok("namespace name")
        );
    }

    #[test]
    fn test_relative_params_cut_the_chain() {
        let ns = Rc::new(Name::namespace(["linphone"]));
        let class = Rc::new(
            Name::from_camel_case(NameKind::Class, "LinphoneCore", false, Some(&ns)).unwrap(),
        );
        let method =
            Name::from_snake_case(NameKind::Method, "linphone_core_stop", Some(&class)).unwrap();

        let name = NameParams::relative_to(ns).apply(&method).unwrap();
        assert_eq!(name.to_snake_case(true), "core_stop");
        // the input name keeps its chain
        assert_eq!(method.to_snake_case(true), "linphone_core_stop");

        let name = NameParams::full().apply(&method).unwrap();
        assert_eq!(name.to_snake_case(true), "linphone_core_stop");
    }
}
