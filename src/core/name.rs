//! Hierarchical, case-convention-aware identifiers.
//!
//! A [`Name`] is an ordered list of lowercase words plus an optional parent
//! name. Parsing strips the parent's words from the front of the spelling, so
//! `linphone_core_get_version` under the `linphone_core` class becomes the
//! local name `get_version` while the full rendering is unchanged.
//!
//! Ancestors are shared through `Rc`: cloning a name is cheap and keeps
//! ancestor identity, which is what [`Name::find_common_parent`] compares.
//! [`Name::deep_copy`] builds an independent chain.

use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;

use super::errors::{Result, TranslateError};

/// A capital letter followed by any number of lowercase letters.
static CAMEL_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z]*").expect("camelCase word regex is valid"));

/// Leading lowercase word of a lower camelCase spelling, then the rest.
static LOWER_CAMEL_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]+)(.*)$").expect("lower camelCase regex is valid"));

/// Role of an identifier in the API tree.
///
/// The role adds no data; backends use it to pick rendering rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    Namespace,
    Class,
    Enum,
    EnumValue,
    Method,
    Argument,
    Property,
}

impl NameKind {
    /// Get the display text for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            NameKind::Namespace => "namespace",
            NameKind::Class => "class",
            NameKind::Enum => "enum",
            NameKind::EnumValue => "enum value",
            NameKind::Method => "method",
            NameKind::Argument => "argument",
            NameKind::Property => "property",
        }
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A namespaced identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    kind: NameKind,
    words: Vec<String>,
    prev: Option<Rc<Name>>,
}

impl Name {
    /// Create a parentless name from already split words.
    pub fn new<I, S>(kind: NameKind, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Name {
            kind,
            words: words.into_iter().map(Into::into).collect(),
            prev: None,
        }
    }

    /// Create a namespace name from its words.
    pub fn namespace<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Name::new(NameKind::Namespace, words)
    }

    /// Parse a snake_case spelling, stripping `namespace` as a leading prefix.
    ///
    /// Empty segments (`__`, leading or trailing `_`) are not words.
    pub fn from_snake_case(
        kind: NameKind,
        raw: &str,
        namespace: Option<&Rc<Name>>,
    ) -> Result<Self> {
        let mut name = Name::new(kind, raw.split('_').filter(|word| !word.is_empty()));
        if name.words.is_empty() {
            return Err(TranslateError::InvalidSnakeCase(raw.to_string()));
        }
        name.set_namespace(namespace)?;
        Ok(name)
    }

    /// Parse a camelCase spelling, stripping `namespace` as a leading prefix.
    ///
    /// With `lowercased_first`, the spelling starts with a lowercase word
    /// (`getProxyConfig`) that is split off before the capital-letter rule is
    /// applied to the remainder.
    pub fn from_camel_case(
        kind: NameKind,
        raw: &str,
        lowercased_first: bool,
        namespace: Option<&Rc<Name>>,
    ) -> Result<Self> {
        let words: Vec<String> = if lowercased_first {
            let caps = LOWER_CAMEL_HEAD
                .captures(raw)
                .ok_or_else(|| TranslateError::InvalidCamelCase(raw.to_string()))?;
            let head = caps.get(1).map_or("", |m| m.as_str());
            let rest = caps.get(2).map_or("", |m| m.as_str());
            std::iter::once(head)
                .chain(CAMEL_WORD.find_iter(rest).map(|m| m.as_str()))
                .map(str::to_lowercase)
                .collect()
        } else {
            CAMEL_WORD
                .find_iter(raw)
                .map(|m| m.as_str().to_lowercase())
                .collect()
        };

        if words.is_empty() {
            return Err(TranslateError::InvalidCamelCase(raw.to_string()));
        }

        let mut name = Name {
            kind,
            words,
            prev: None,
        };
        name.set_namespace(namespace)?;
        Ok(name)
    }

    fn set_namespace(&mut self, namespace: Option<&Rc<Name>>) -> Result<()> {
        let Some(namespace) = namespace else {
            self.prev = None;
            return Ok(());
        };

        let prefix = namespace.to_word_list();
        let common = self
            .words
            .iter()
            .zip(prefix.iter())
            .take_while(|(word, ns_word)| word == ns_word)
            .count();

        if common == self.words.len() {
            return Err(TranslateError::NameEqualToNamespace(self.words.join("_")));
        }

        self.words.drain(..common);
        self.prev = Some(Rc::clone(namespace));
        Ok(())
    }

    /// Role of this name.
    pub fn kind(&self) -> NameKind {
        self.kind
    }

    /// Own words, without ancestors.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Parent name, if any.
    pub fn parent(&self) -> Option<&Rc<Name>> {
        self.prev.as_ref()
    }

    /// Ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &Rc<Name>> {
        std::iter::successors(self.prev.as_ref(), |name| name.prev.as_ref())
    }

    /// Copy this name together with a fresh copy of its ancestor chain.
    pub fn deep_copy(&self) -> Self {
        Name {
            kind: self.kind,
            words: self.words.clone(),
            prev: self.prev.as_ref().map(|prev| Rc::new(prev.deep_copy())),
        }
    }

    /// Render as snake_case. `full` prepends every ancestor.
    pub fn to_snake_case(&self, full: bool) -> String {
        let local = self.words.join("_");
        match &self.prev {
            Some(prev) if full => format!("{}_{}", prev.to_snake_case(true), local),
            _ => local,
        }
    }

    /// Render as camelCase.
    ///
    /// `lower` lowercases the very first word only: with `full`, the decision
    /// is carried to the root segment and every inner segment is title-cased.
    pub fn to_camel_case(&self, lower: bool, full: bool) -> String {
        match &self.prev {
            Some(prev) if full => {
                format!("{}{}", prev.to_camel_case(lower, true), self.to_camel_case(false, false))
            }
            _ => self
                .words
                .iter()
                .enumerate()
                .map(|(i, word)| {
                    if i == 0 && lower {
                        word.clone()
                    } else {
                        title_case(word)
                    }
                })
                .collect(),
        }
    }

    /// Concatenate the words without separator, optionally uppercased.
    pub fn concatenate(&self, upper: bool, full: bool) -> String {
        let local: String = self
            .words
            .iter()
            .map(|word| if upper { word.to_uppercase() } else { word.clone() })
            .collect();
        match &self.prev {
            Some(prev) if full => format!("{}{}", prev.concatenate(upper, true), local),
            _ => local,
        }
    }

    /// Every word of the full name, root first.
    pub fn to_word_list(&self) -> Vec<String> {
        let mut words = match &self.prev {
            Some(prev) => prev.to_word_list(),
            None => Vec::new(),
        };
        words.extend(self.words.iter().cloned());
        words
    }

    /// Cut `prefix` and everything above it off the ancestor chain.
    ///
    /// The ancestor just below `prefix` becomes the new root. Fails when no
    /// ancestor carries `prefix`'s words, or when the matching ancestor does
    /// not have the same full name as `prefix`.
    pub fn delete_prefix(&mut self, prefix: &Name) -> Result<()> {
        let no_prefix = || TranslateError::NoCommonPrefix(prefix.to_snake_case(true));

        if self.words == prefix.words {
            return if self.to_word_list() == prefix.to_word_list() {
                Ok(())
            } else {
                Err(no_prefix())
            };
        }

        let rebuilt = {
            let mut below: Vec<&Name> = Vec::new();
            let mut it = self.prev.as_deref();
            loop {
                match it {
                    None => return Err(no_prefix()),
                    Some(ancestor) if ancestor.words == prefix.words => {
                        if ancestor.to_word_list() != prefix.to_word_list() {
                            return Err(no_prefix());
                        }
                        break;
                    }
                    Some(ancestor) => {
                        below.push(ancestor);
                        it = ancestor.prev.as_deref();
                    }
                }
            }

            below.iter().rev().fold(None, |prev, ancestor| {
                Some(Rc::new(Name {
                    kind: ancestor.kind,
                    words: ancestor.words.clone(),
                    prev,
                }))
            })
        };

        self.prev = rebuilt;
        Ok(())
    }

    /// Nearest ancestor shared by `a` and `b`, compared by identity.
    ///
    /// Returns `None` when either name is a root or the chains never meet.
    pub fn find_common_parent(a: &Name, b: &Name) -> Option<Rc<Name>> {
        a.ancestors()
            .find(|candidate| b.ancestors().any(|other| Rc::ptr_eq(candidate, other)))
            .cloned()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_snake_case(true))
    }
}

/// Uppercase every letter that follows a non-letter, lowercase the others.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut after_letter = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linphone() -> Rc<Name> {
        Rc::new(Name::namespace(["linphone"]))
    }

    #[test]
    fn test_snake_case_round_trip() {
        let name = Name::from_snake_case(NameKind::Method, "get_proxy_config", None).unwrap();
        assert_eq!(name.words(), ["get", "proxy", "config"]);
        assert_eq!(name.to_snake_case(false), "get_proxy_config");
        assert!(name.parent().is_none());
    }

    #[test]
    fn test_snake_case_strips_namespace_prefix() {
        let class = Rc::new(
            Name::from_camel_case(NameKind::Class, "LinphoneCore", false, Some(&linphone()))
                .unwrap(),
        );
        let method = Name::from_snake_case(
            NameKind::Method,
            "linphone_core_get_version",
            Some(&class),
        )
        .unwrap();

        assert_eq!(method.to_snake_case(false), "get_version");
        assert_eq!(method.to_snake_case(true), "linphone_core_get_version");
    }

    #[test]
    fn test_suffix_shared_with_namespace_is_kept() {
        let ns = Rc::new(Name::namespace(["call", "log"]));
        let name = Name::from_snake_case(NameKind::Method, "get_call_log", Some(&ns)).unwrap();
        assert_eq!(name.words(), ["get", "call", "log"]);
    }

    #[test]
    fn test_name_equal_to_namespace_fails() {
        let err = Name::from_snake_case(NameKind::Class, "linphone", Some(&linphone()));
        assert_eq!(
            err,
            Err(TranslateError::NameEqualToNamespace("linphone".to_string()))
        );
    }

    #[test]
    fn test_camel_case_parsing() {
        let name = Name::from_camel_case(NameKind::Class, "LinphoneProxyConfig", false, None)
            .unwrap();
        assert_eq!(name.words(), ["linphone", "proxy", "config"]);

        let name =
            Name::from_camel_case(NameKind::Method, "getProxyConfig", true, None).unwrap();
        assert_eq!(name.words(), ["get", "proxy", "config"]);
    }

    #[test]
    fn test_lower_camel_case_requires_lowercase_head() {
        let err = Name::from_camel_case(NameKind::Method, "GetValue", true, None);
        assert!(matches!(err, Err(TranslateError::InvalidCamelCase(_))));
    }

    #[test]
    fn test_camel_case_without_words_fails() {
        let err = Name::from_camel_case(NameKind::Class, "lowercase", false, None);
        assert!(matches!(err, Err(TranslateError::InvalidCamelCase(_))));
    }

    #[test]
    fn test_enum_value_strips_enum_words() {
        let enum_name = Rc::new(
            Name::from_camel_case(NameKind::Enum, "LinphoneCallState", false, Some(&linphone()))
                .unwrap(),
        );
        let value = Name::from_camel_case(
            NameKind::EnumValue,
            "LinphoneCallStateConnected",
            false,
            Some(&enum_name),
        )
        .unwrap();

        assert_eq!(value.to_snake_case(false), "connected");
        assert_eq!(value.to_snake_case(true), "linphone_call_state_connected");
        assert_eq!(enum_name.to_camel_case(false, true), "LinphoneCallState");
    }

    #[test]
    fn test_camel_case_rendering() {
        let class = Rc::new(
            Name::from_camel_case(NameKind::Class, "LinphoneProxyConfig", false, Some(&linphone()))
                .unwrap(),
        );
        assert_eq!(class.to_camel_case(false, false), "ProxyConfig");
        assert_eq!(class.to_camel_case(true, false), "proxyConfig");
        assert_eq!(class.to_camel_case(true, true), "linphoneProxyConfig");
        assert_eq!(class.to_camel_case(false, true), "LinphoneProxyConfig");

        let method = Name::from_snake_case(
            NameKind::Method,
            "linphone_proxy_config_get_identity",
            Some(&class),
        )
        .unwrap();
        assert_eq!(method.to_camel_case(true, false), "getIdentity");
        assert_eq!(method.to_camel_case(true, true), "linphoneProxyConfigGetIdentity");
    }

    #[test]
    fn test_title_case_after_digits() {
        assert_eq!(title_case("x264ab"), "X264Ab");
        assert_eq!(title_case("SIP"), "Sip");
    }

    #[test]
    fn test_concatenate() {
        let class = Rc::new(
            Name::from_camel_case(NameKind::Class, "LinphoneCore", false, Some(&linphone()))
                .unwrap(),
        );
        assert_eq!(class.concatenate(false, false), "core");
        assert_eq!(class.concatenate(true, true), "LINPHONECORE");

        let method =
            Name::from_snake_case(NameKind::Method, "linphone_core_set_mtu", Some(&class)).unwrap();
        assert_eq!(method.concatenate(false, true), "linphonecoresetmtu");
    }

    #[test]
    fn test_full_flat_rendering_is_namespace_then_own_words() {
        let ns = Rc::new(Name::namespace(["linphone", "call"]));
        for raw in ["linphone_call_params", "terminate", "linphone_core_stop"] {
            let name = Name::from_snake_case(NameKind::Method, raw, Some(&ns)).unwrap();
            let expected = format!("{}{}", ns.concatenate(false, true), name.words().concat());
            assert_eq!(name.concatenate(false, true), expected);
        }

        let ns = linphone();
        for raw in ["LinphoneCore", "Core", "LinphoneLinphoneX"] {
            let name = Name::from_camel_case(NameKind::Class, raw, false, Some(&ns)).unwrap();
            let expected = format!("{}{}", ns.concatenate(false, true), name.words().concat());
            assert_eq!(name.concatenate(false, true), expected);
        }
        let core = Name::from_camel_case(NameKind::Class, "Core", false, Some(&ns)).unwrap();
        assert_eq!(core.concatenate(false, true), "linphonecore");
        let twice =
            Name::from_camel_case(NameKind::Class, "LinphoneLinphoneX", false, Some(&ns)).unwrap();
        assert_eq!(twice.words(), ["linphone", "x"]);
        assert_eq!(twice.concatenate(false, true), "linphonelinphonex");
    }

    #[test]
    fn test_snake_case_skips_empty_segments() {
        let name =
            Name::from_snake_case(NameKind::Method, "linphone__x", Some(&linphone())).unwrap();
        assert_eq!(name.words(), ["x"]);

        let name = Name::from_snake_case(NameKind::Argument, "_lc_", None).unwrap();
        assert_eq!(name.words(), ["lc"]);

        for raw in ["", "__"] {
            assert_eq!(
                Name::from_snake_case(NameKind::Argument, raw, None),
                Err(TranslateError::InvalidSnakeCase(raw.to_string()))
            );
        }
    }

    #[test]
    fn test_word_list() {
        let enum_name = Rc::new(
            Name::from_camel_case(NameKind::Enum, "LinphoneReason", false, Some(&linphone()))
                .unwrap(),
        );
        let value = Name::from_camel_case(
            NameKind::EnumValue,
            "LinphoneReasonBusy",
            false,
            Some(&enum_name),
        )
        .unwrap();
        assert_eq!(value.to_word_list(), ["linphone", "reason", "busy"]);
    }

    #[test]
    fn test_delete_prefix() {
        let root = linphone();
        let class = Rc::new(
            Name::from_camel_case(NameKind::Class, "LinphoneCore", false, Some(&root)).unwrap(),
        );
        let mut method =
            Name::from_snake_case(NameKind::Method, "linphone_core_stop", Some(&class)).unwrap();

        method.delete_prefix(&root).unwrap();
        assert_eq!(method.to_snake_case(true), "core_stop");
        assert!(method.parent().unwrap().parent().is_none());

        // the shared chain is untouched
        assert_eq!(class.to_snake_case(true), "linphone_core");
    }

    #[test]
    fn test_delete_prefix_without_match_fails() {
        let mut method = Name::from_snake_case(
            NameKind::Method,
            "linphone_core_stop",
            Some(&linphone()),
        )
        .unwrap();
        let other = Name::namespace(["belcard"]);
        assert!(matches!(
            method.delete_prefix(&other),
            Err(TranslateError::NoCommonPrefix(_))
        ));
    }

    #[test]
    fn test_delete_prefix_requires_same_full_name() {
        let root = linphone();
        let class = Rc::new(
            Name::from_camel_case(NameKind::Class, "LinphoneCore", false, Some(&root)).unwrap(),
        );
        let mut method =
            Name::from_snake_case(NameKind::Method, "linphone_core_stop", Some(&class)).unwrap();

        // same words, different ancestry
        let impostor = Name::new(NameKind::Class, ["core"]);
        assert!(method.delete_prefix(&impostor).is_err());
    }

    #[test]
    fn test_find_common_parent() {
        let root = linphone();
        let core = Rc::new(
            Name::from_camel_case(NameKind::Class, "LinphoneCore", false, Some(&root)).unwrap(),
        );
        let call = Rc::new(
            Name::from_camel_case(NameKind::Class, "LinphoneCall", false, Some(&root)).unwrap(),
        );
        let stop = Name::from_snake_case(NameKind::Method, "linphone_core_stop", Some(&core))
            .unwrap();
        let accept = Name::from_snake_case(NameKind::Method, "linphone_call_accept", Some(&call))
            .unwrap();
        let start = Name::from_snake_case(NameKind::Method, "linphone_core_start", Some(&core))
            .unwrap();

        let common = Name::find_common_parent(&stop, &accept).unwrap();
        assert!(Rc::ptr_eq(&common, &root));

        let common = Name::find_common_parent(&stop, &start).unwrap();
        assert!(Rc::ptr_eq(&common, &core));

        // symmetric
        let reverse = Name::find_common_parent(&accept, &stop).unwrap();
        assert!(Rc::ptr_eq(&reverse, &root));

        // mixed depths
        let a = Name::find_common_parent(&stop, &call).unwrap();
        let b = Name::find_common_parent(&call, &stop).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_find_common_parent_of_root_is_none() {
        let root = linphone();
        let core =
            Name::from_camel_case(NameKind::Class, "LinphoneCore", false, Some(&root)).unwrap();
        assert!(Name::find_common_parent(&root, &core).is_none());
        assert!(Name::find_common_parent(&core, &root).is_none());
    }

    #[test]
    fn test_deep_copy_breaks_identity() {
        let root = linphone();
        let core =
            Name::from_camel_case(NameKind::Class, "LinphoneCore", false, Some(&root)).unwrap();
        let copy = core.deep_copy();

        assert_eq!(copy, core);
        assert!(!Rc::ptr_eq(copy.parent().unwrap(), core.parent().unwrap()));
        assert!(Rc::ptr_eq(core.clone().parent().unwrap(), &root));
    }

    #[test]
    fn test_display_is_full_snake_case() {
        let core = Name::from_camel_case(NameKind::Class, "LinphoneCore", false, Some(&linphone()))
            .unwrap();
        assert_eq!(core.to_string(), "linphone_core");
        assert_eq!(core.kind(), NameKind::Class);
    }
}
