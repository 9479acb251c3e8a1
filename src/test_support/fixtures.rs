//! Test fixtures for common test scenarios.
//!
//! This module provides pre-built C projects modelled on a small slice of
//! liblinphone, plus builders for the functions they declare.

use crate::cparser::project::{CArgument, CClass, CEnum, CFunction, CProject, CProperty};

/// A function with the given return value and arguments, receiver included.
pub fn method(name: &str, ret: CArgument, args: &[CArgument]) -> CFunction {
    args.iter()
        .cloned()
        .fold(CFunction::new(name, ret), CFunction::with_argument)
}

/// An instance method of `class`, with a receiver of type `class *`
/// (`const class *` when `is_const`) prepended to `args`.
pub fn instance_method(
    class: &str,
    is_const: bool,
    name: &str,
    ret: CArgument,
    args: &[CArgument],
) -> CFunction {
    let receiver = if is_const {
        format!("const {} *", class)
    } else {
        format!("{} *", class)
    };
    let mut all = vec![CArgument::new("obj", class, receiver)];
    all.extend(args.iter().cloned());
    method(name, ret, &all)
}

/// `void`
pub fn void() -> CArgument {
    CArgument::returning("void", "void")
}

/// `LinphoneCallState` with three values.
pub fn call_state_enum() -> CEnum {
    CEnum::new("_LinphoneCallState")
        .with_typedef("LinphoneCallState")
        .with_value("LinphoneCallStateIdle")
        .with_value("LinphoneCallStateConnected")
        .with_value("LinphoneCallStateEnd")
}

/// `LinphoneCore`, declared before the `LinphoneCall` it refers to.
///
/// The `sound_daemon` property has a getter returning an undeclared type.
pub fn core_class() -> CClass {
    const CORE: &str = "LinphoneCore";

    CClass::new(CORE)
        .with_property(
            CProperty::new("mtu")
                .with_getter(instance_method(
                    CORE,
                    true,
                    "linphone_core_get_mtu",
                    CArgument::returning("int", "int"),
                    &[],
                ))
                .with_setter(instance_method(
                    CORE,
                    false,
                    "linphone_core_set_mtu",
                    void(),
                    &[CArgument::new("mtu", "int", "int")],
                )),
        )
        .with_property(CProperty::new("sound_daemon").with_getter(instance_method(
            CORE,
            true,
            "linphone_core_get_sound_daemon",
            CArgument::returning("LinphoneSoundDaemon", "LinphoneSoundDaemon *"),
            &[],
        )))
        .with_instance_method(instance_method(CORE, false, "linphone_core_stop", void(), &[]))
        .with_instance_method(instance_method(
            CORE,
            true,
            "linphone_core_find_call_from_uri",
            CArgument::returning("LinphoneCall", "LinphoneCall *"),
            &[CArgument::new("uri", "char", "const char *")],
        ))
        .with_instance_method(instance_method(
            CORE,
            true,
            "linphone_core_get_calls",
            CArgument::returning("bctbx_list_t", "const bctbx_list_t *")
                .with_contained_type("LinphoneCall"),
            &[],
        ))
        .with_class_method(method(
            "linphone_core_new",
            CArgument::returning(CORE, "LinphoneCore *"),
            &[CArgument::new("config_path", "char", "const char *")],
        ))
}

/// `LinphoneCall`, holding a `LinphoneCallState`.
pub fn call_class() -> CClass {
    const CALL: &str = "LinphoneCall";

    CClass::new(CALL)
        .with_instance_method(instance_method(
            CALL,
            true,
            "linphone_call_get_state",
            CArgument::returning("LinphoneCallState", "LinphoneCallState"),
            &[],
        ))
        .with_instance_method(instance_method(
            CALL,
            false,
            "linphone_call_set_speaker_volume_gain",
            void(),
            &[CArgument::new("volume", "float", "float")],
        ))
}

/// One enum and two classes, with a forward reference and one broken property.
pub fn linphone_project() -> CProject {
    CProject::new()
        .with_enum(call_state_enum())
        .with_class(core_class())
        .with_class(call_class())
}
