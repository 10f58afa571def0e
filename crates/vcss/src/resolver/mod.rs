//! Descriptor resolution.
//!
//! The [`Resolver`] walks a [`StyleRule`] and produces flat [`Rule`]s, the
//! same way a nested stylesheet is flattened for the cascade:
//!
//! ```text
//! .btn { color: white;
//!   :hover { color: yellow; }
//!   @media print { color: black; }
//! }
//! ```
//!
//! becomes
//!
//! ```text
//! .btn { color: white; }
//! .btn:hover { color: yellow; }
//! @media print { .btn { color: black; } }
//! ```
//!
//! ## Traversal order
//!
//! For every block: its own declarations, then nested selectors, then
//! conditional blocks, then keyframe offsets. Each branch recurses with the
//! selector and condition chain it inherited, so a `@media` block inside a
//! `:hover` block is emitted for the hover selector inside the media query.

pub mod selectors;

use std::collections::HashSet;

use crate::config::UnitPolicy;
use crate::descriptor::{Keyframes, SelectorKey, StyleRule, VarKey};
use crate::error::{Result, VcssError};
use crate::ident::FileScope;
use crate::rule::{Condition, Declaration, Rule};
use crate::value::Value;

/// The set of variables a build has declared.
///
/// A typed [`VarRef`](crate::VarRef) that is not in scope either came from a
/// different build or was never created, and resolving it fails.
pub trait VarScope {
    fn contains_var(&self, name: &str) -> bool;
}

impl VarScope for HashSet<String> {
    fn contains_var(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// Flattens descriptors into rules.
pub struct Resolver<'a> {
    units: &'a UnitPolicy,
    vars: &'a dyn VarScope,
}

impl<'a> Resolver<'a> {
    pub fn new(units: &'a UnitPolicy, vars: &'a dyn VarScope) -> Self {
        Self { units, vars }
    }

    /// Resolves `descriptor` for the owner `selector` (`.ident` for scoped
    /// styles, any selector for global ones). Keyframe names are allocated
    /// from `scope`.
    pub fn resolve(
        &self,
        descriptor: &StyleRule,
        selector: &str,
        scope: &mut FileScope,
    ) -> Result<Vec<Rule>> {
        let mut out = Vec::new();
        self.resolve_block(descriptor, selector, &[], None, scope, &mut out)?;
        Ok(out)
    }

    /// Resolves the offsets of an animation named `name`.
    pub fn resolve_keyframes(&self, keyframes: &Keyframes, name: &str) -> Result<Vec<Rule>> {
        keyframes
            .frames
            .iter()
            .map(|(offset, frame)| {
                let declarations = self.declarations(frame, None)?;
                Ok(Rule::new(offset.clone(), declarations).in_keyframes(name))
            })
            .collect()
    }

    fn resolve_block(
        &self,
        block: &StyleRule,
        selector: &str,
        conditions: &[Condition],
        animation: Option<&str>,
        scope: &mut FileScope,
        out: &mut Vec<Rule>,
    ) -> Result<()> {
        let own_animation = block
            .keyframes
            .as_ref()
            .map(|_| scope.allocate("keyframes").to_string());
        let animation = own_animation.as_deref().or(animation);

        let declarations = self.declarations(block, animation)?;
        if !declarations.is_empty() {
            log::trace!(
                "resolved {} declarations for `{}` under {:?}",
                declarations.len(),
                selector,
                conditions
            );
            out.push(Rule::new(selector, declarations).with_conditions(conditions.to_vec()));
        }

        for (key, nested) in &block.selectors {
            let nested_selector = match key {
                SelectorKey::Pseudo(pseudo) => selectors::pseudo_selector(pseudo)?,
                SelectorKey::Selector(raw) => {
                    selectors::validate_nested(raw)?;
                    raw.clone()
                }
            };
            let composed = selectors::compose(selector, &nested_selector);
            self.resolve_block(nested, &composed, conditions, animation, scope, out)?;
        }

        for (condition, nested) in &block.conditions {
            let mut chain = conditions.to_vec();
            chain.push(condition.clone());
            self.resolve_block(nested, selector, &chain, animation, scope, out)?;
        }

        if let (Some(keyframes), Some(name)) = (&block.keyframes, &own_animation) {
            out.extend(self.resolve_keyframes(keyframes, name)?);
        }
        Ok(())
    }

    /// Renders a block's own variable assignments followed by its
    /// properties.
    pub(crate) fn declarations(
        &self,
        block: &StyleRule,
        animation: Option<&str>,
    ) -> Result<Vec<Declaration>> {
        let mut declarations = Vec::with_capacity(block.vars.len() + block.declarations.len());

        for (key, value) in &block.vars {
            if let VarKey::Ref(var) = key {
                self.check_var(var.name())?;
            }
            declarations.push(Declaration::new(key.name(), self.render(key.name(), value, None)?));
        }

        for (property, value) in &block.declarations {
            let property = property_name(property);
            let rendered = self.render(&property, value, animation)?;
            declarations.push(Declaration::new(property, rendered));
        }
        Ok(declarations)
    }

    fn render(&self, property: &str, value: &Value, animation: Option<&str>) -> Result<String> {
        for name in value.referenced_vars() {
            self.check_var(name)?;
        }
        let rendered = value.render(property, self.units);
        match (value, animation) {
            (Value::Literal(_), Some(name)) if rendered.contains("@keyframes") => {
                Ok(rendered.replace("@keyframes", name))
            }
            _ => Ok(rendered),
        }
    }

    fn check_var(&self, name: &str) -> Result<()> {
        if self.vars.contains_var(name) {
            Ok(())
        } else {
            Err(VcssError::UnresolvedVariableReference(name.to_string()))
        }
    }
}

/// Converts camelCase descriptor keys to CSS property names:
/// `backgroundColor` to `background-color`, `WebkitLineClamp` to
/// `-webkit-line-clamp`, `msFlex` to `-ms-flex`. Kebab-case keys and custom
/// properties pass through.
pub fn property_name(key: &str) -> String {
    if key.starts_with("--") || !key.chars().any(|c| c.is_ascii_uppercase()) {
        return key.to_string();
    }

    let mut out = String::with_capacity(key.len() + 4);
    if key.starts_with("ms") && key[2..].starts_with(|c: char| c.is_ascii_uppercase()) {
        out.push('-');
    }
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn resolve(rule: &StyleRule) -> Result<Vec<Rule>> {
        let units = UnitPolicy::default();
        let vars = HashSet::new();
        let mut scope = FileScope::new("test.css.rs", &Config::default());
        Resolver::new(&units, &vars).resolve(rule, ".x", &mut scope)
    }

    #[test]
    fn test_property_name_conversion() {
        assert_eq!(property_name("backgroundColor"), "background-color");
        assert_eq!(property_name("WebkitLineClamp"), "-webkit-line-clamp");
        assert_eq!(property_name("msFlex"), "-ms-flex");
        assert_eq!(property_name("margin-top"), "margin-top");
        assert_eq!(property_name("--brandColor"), "--brandColor");
    }

    #[test]
    fn test_empty_block_emits_nothing() {
        assert!(resolve(&StyleRule::new()).unwrap().is_empty());
    }

    #[test]
    fn test_nested_blocks_without_own_declarations() {
        let rule = StyleRule::new().pseudo(":hover", StyleRule::new().prop("color", "red"));
        let rules = resolve(&rule).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector, ".x:hover");
    }

    #[test]
    fn test_media_inside_selector_keeps_selector() {
        let rule = StyleRule::new().pseudo(
            ":hover",
            StyleRule::new().media("print", StyleRule::new().prop("color", "black")),
        );
        let rules = resolve(&rule).unwrap();
        assert_eq!(rules[0].selector, ".x:hover");
        assert_eq!(rules[0].conditions, vec![Condition::Media("print".into())]);
    }

    #[test]
    fn test_numbers_get_units() {
        let rule = StyleRule::new()
            .prop("marginTop", 4)
            .prop("opacity", 0.5)
            .prop("zIndex", 2);
        let rules = resolve(&rule).unwrap();
        let values: Vec<_> = rules[0]
            .declarations
            .iter()
            .map(|d| format!("{}: {}", d.property, d.value))
            .collect();
        assert_eq!(values, ["margin-top: 4px", "opacity: 0.5", "z-index: 2"]);
    }

    #[test]
    fn test_raw_custom_property_is_not_checked() {
        let rule = StyleRule::new()
            .custom_property("gap", "4px")
            .prop("padding", "var(--unknown)");
        let rules = resolve(&rule).unwrap();
        assert_eq!(rules[0].declarations[0], Declaration::new("--gap", "4px"));
        assert_eq!(
            rules[0].declarations[1],
            Declaration::new("padding", "var(--unknown)")
        );
    }

    #[test]
    fn test_keyframes_name_substitution() {
        let rule = StyleRule::new()
            .prop("animation", "@keyframes 1s linear infinite")
            .keyframes(
                Keyframes::new()
                    .frame("from", StyleRule::new().prop("opacity", 0))
                    .frame("to", StyleRule::new().prop("opacity", 1)),
            );
        let rules = resolve(&rule).unwrap();
        assert_eq!(rules.len(), 3);

        let name = rules[1].keyframes.clone().unwrap();
        assert!(name.starts_with("keyframes__"));
        assert_eq!(
            rules[0].declarations[0].value,
            format!("{name} 1s linear infinite")
        );
        assert_eq!(rules[1].selector, "from");
        assert_eq!(rules[2].selector, "to");
    }
}
