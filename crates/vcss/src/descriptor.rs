//! Style descriptors: the authored, nested form of a style block.
//!
//! A [`StyleRule`] is built with chained methods and keeps every map in the
//! order it was written:
//!
//! ```rust
//! use vcss::StyleRule;
//!
//! let button = StyleRule::new()
//!     .prop("color", "white")
//!     .prop("padding", 8)
//!     .pseudo(":hover", StyleRule::new().prop("color", "yellow"))
//!     .selector(".dark &", StyleRule::new().prop("color", "black"))
//!     .media("(min-width: 768px)", StyleRule::new().prop("padding", 12));
//! assert!(!button.is_empty());
//! ```

use crate::rule::Condition;
use crate::theme::{VarRef, VarsFragment};
use crate::value::Value;

/// The key of a nested selector block.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectorKey {
    /// A pseudo-class or pseudo-element such as `:hover`, applied to `&`.
    Pseudo(String),
    /// A full selector that must target `&`, such as `.parent &`.
    Selector(String),
}

/// The target of a variable assignment.
#[derive(Clone, Debug, PartialEq)]
pub enum VarKey {
    Ref(VarRef),
    /// A hand-written custom property name. Not checked against any contract.
    Raw(String),
}

impl VarKey {
    pub fn name(&self) -> &str {
        match self {
            Self::Ref(var) => var.name(),
            Self::Raw(name) => name,
        }
    }
}

/// A nested style descriptor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleRule {
    pub(crate) declarations: Vec<(String, Value)>,
    pub(crate) vars: Vec<(VarKey, Value)>,
    pub(crate) selectors: Vec<(SelectorKey, StyleRule)>,
    pub(crate) conditions: Vec<(Condition, StyleRule)>,
    pub(crate) keyframes: Option<Keyframes>,
}

impl StyleRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property. Keys may be kebab-case or camelCase; setting the same
    /// key again replaces the value without moving it.
    pub fn prop(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        let property = property.into();
        let value = value.into();
        match self.declarations.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.declarations.push((property, value)),
        }
        self
    }

    /// Assigns a contract or `create_var` variable.
    pub fn var(self, var: &VarRef, value: impl Into<Value>) -> Self {
        self.assign(VarKey::Ref(var.clone()), value.into())
    }

    /// Assigns a custom property by name. A missing `--` prefix is added.
    pub fn custom_property(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let name = if name.starts_with("--") {
            name
        } else {
            format!("--{name}")
        };
        self.assign(VarKey::Raw(name), value.into())
    }

    /// Merges a fragment produced by [`assign_vars`](crate::assign_vars).
    pub fn vars(mut self, fragment: VarsFragment) -> Self {
        for (var, value) in fragment {
            self = self.assign(VarKey::Ref(var), value);
        }
        self
    }

    fn assign(mut self, key: VarKey, value: Value) -> Self {
        match self
            .vars
            .iter_mut()
            .find(|(k, _)| k.name() == key.name())
        {
            Some(slot) => slot.1 = value,
            None => self.vars.push((key, value)),
        }
        self
    }

    /// Adds a block for a pseudo-class or pseudo-element of the owner,
    /// shorthand for `selector("&:hover", ...)`.
    pub fn pseudo(mut self, pseudo: impl Into<String>, rule: StyleRule) -> Self {
        self.selectors.push((SelectorKey::Pseudo(pseudo.into()), rule));
        self
    }

    /// Adds a nested selector block. `&` stands for the owner's selector and
    /// must appear in the part of the selector that is styled.
    pub fn selector(mut self, selector: impl Into<String>, rule: StyleRule) -> Self {
        self.selectors
            .push((SelectorKey::Selector(selector.into()), rule));
        self
    }

    /// Adds an `@media` block for the same selector.
    pub fn media(mut self, query: impl Into<String>, rule: StyleRule) -> Self {
        self.conditions.push((Condition::Media(query.into()), rule));
        self
    }

    /// Adds an `@supports` block for the same selector.
    pub fn supports(mut self, query: impl Into<String>, rule: StyleRule) -> Self {
        self.conditions
            .push((Condition::Supports(query.into()), rule));
        self
    }

    /// Adds an `@container` block for the same selector.
    pub fn container(mut self, query: impl Into<String>, rule: StyleRule) -> Self {
        self.conditions
            .push((Condition::Container(query.into()), rule));
        self
    }

    /// Attaches an animation. Its generated name replaces the `@keyframes`
    /// token in this block's values and in nested blocks.
    pub fn keyframes(mut self, keyframes: Keyframes) -> Self {
        self.keyframes = Some(keyframes);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
            && self.vars.is_empty()
            && self.selectors.is_empty()
            && self.conditions.is_empty()
            && self.keyframes.is_none()
    }
}

/// The offsets of an animation. Only the flat declarations and variable
/// assignments of each offset's [`StyleRule`] are used.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keyframes {
    pub(crate) frames: Vec<(String, StyleRule)>,
}

impl Keyframes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add an offset such as `from`, `to` or `50%`.
    pub fn frame(mut self, offset: impl Into<String>, rule: StyleRule) -> Self {
        self.frames.push((offset.into(), rule));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
