//! Theme contracts and completeness validation.
//!
//! A [`ThemeContract`] fixes a set of variable paths. Every set of values
//! applied to it, whether through a theme class, a global theme,
//! [`assign_vars`] or [`inline_theme`], must cover exactly those paths:
//!
//! ```text
//! contract      { color: { brand, text }, radius }
//! values        { color: { brand },       radius, shadow }
//! violation     missing color.text; unexpected shadow
//! ```
//!
//! The check runs when the values are applied, so an incomplete theme never
//! reaches the stylesheet.

mod contract;
mod tokens;

pub use contract::{ContractNode, ThemeContract, VarRef};
pub use tokens::{Token, Tokens};

use crate::config::UnitPolicy;
use crate::error::{Result, VcssError};
use crate::value::Value;

/// Builds a contract with the shape of `tokens`, naming each leaf through
/// `name_for`. Values in `tokens` are ignored.
pub(crate) fn build_contract(
    tokens: &Tokens,
    name_for: &mut dyn FnMut(&[String], Option<&Value>) -> String,
) -> ThemeContract {
    let mut path = Vec::new();
    build_group(tokens, &mut path, name_for)
}

fn build_group(
    tokens: &Tokens,
    path: &mut Vec<String>,
    name_for: &mut dyn FnMut(&[String], Option<&Value>) -> String,
) -> ThemeContract {
    let mut contract = ThemeContract::default();
    for (key, token) in tokens.entries() {
        path.push(key.to_string());
        let node = match token {
            Token::Value(value) => {
                ContractNode::Var(VarRef::new(name_for(path, Some(value)), path.clone()))
            }
            Token::Unset => ContractNode::Var(VarRef::new(name_for(path, None), path.clone())),
            Token::Group(group) => ContractNode::Group(build_group(group, path, name_for)),
        };
        contract.push(key.to_string(), node);
        path.pop();
    }
    contract
}

/// A set of variable assignments, ready to be merged into a descriptor's
/// `vars`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VarsFragment {
    assignments: Vec<(VarRef, Value)>,
}

impl VarsFragment {
    pub fn iter(&self) -> impl Iterator<Item = (&VarRef, &Value)> {
        self.assignments.iter().map(|(var, value)| (var, value))
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl IntoIterator for VarsFragment {
    type Item = (VarRef, Value);
    type IntoIter = std::vec::IntoIter<(VarRef, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.into_iter()
    }
}

/// Checks that `values` supplies exactly the leaves of `contract` and pairs
/// each leaf with its value, in contract order.
pub(crate) fn validate(contract: &ThemeContract, values: &Tokens) -> Result<VarsFragment> {
    let expected = contract.segment_leaves();
    let supplied = values.segment_leaves();

    let missing: Vec<String> = expected
        .iter()
        .filter(|(path, _)| {
            !supplied
                .iter()
                .any(|(p, value)| p == path && value.is_some())
        })
        .map(|(path, _)| path.join("."))
        .collect();
    let unexpected: Vec<String> = supplied
        .iter()
        .filter(|(path, _)| !expected.iter().any(|(p, _)| p == path))
        .map(|(path, _)| path.join("."))
        .collect();

    if !missing.is_empty() || !unexpected.is_empty() {
        log::debug!(
            "contract violation: missing={:?} unexpected={:?}",
            missing,
            unexpected
        );
        return Err(VcssError::ContractViolation {
            missing,
            unexpected,
        });
    }

    let assignments = expected
        .into_iter()
        .filter_map(|(path, var)| {
            supplied
                .iter()
                .find(|(p, _)| *p == path)
                .and_then(|(_, value)| value.map(|value| (var.clone(), value.clone())))
        })
        .collect();
    Ok(VarsFragment { assignments })
}

/// Assigns values to every variable of `contract`, which may be a subtree of
/// a larger contract. The result goes into
/// [`StyleRule::vars`](crate::StyleRule::vars) of any block, including
/// conditional ones.
///
/// ```rust
/// use vcss::{Registry, StyleRule, Tokens, assign_vars};
///
/// let registry = Registry::default();
/// let mut file = registry.file("theme.css.rs");
/// let vars = file.create_theme_vars(
///     &Tokens::new().group("space", Tokens::new().unset("sm").unset("lg")),
/// );
///
/// let roomy = assign_vars(
///     vars.subtree("space").unwrap(),
///     &Tokens::new().value("sm", "8px").value("lg", "32px"),
/// )
/// .unwrap();
///
/// file.style("root", StyleRule::new().media("(min-width: 800px)", StyleRule::new().vars(roomy)))
///     .unwrap();
///
/// let css = registry.css();
/// assert!(css.contains("@media (min-width: 800px)"));
/// assert!(css.contains(&format!("{}: 8px;", vars["space.sm"].name())));
/// ```
pub fn assign_vars(contract: &ThemeContract, values: &Tokens) -> Result<VarsFragment> {
    validate(contract, values)
}

/// Renders a complete assignment as an inline declaration string for a
/// runtime element, e.g. `--a: 1px; --b: red;`. Nothing is registered.
pub fn inline_theme(contract: &ThemeContract, values: &Tokens) -> Result<String> {
    let fragment = validate(contract, values)?;
    let units = UnitPolicy::default();
    let declarations: Vec<String> = fragment
        .iter()
        .map(|(var, value)| format!("{}: {};", var.name(), value.render(var.name(), &units)))
        .collect();
    Ok(declarations.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> ThemeContract {
        let tokens = Tokens::new()
            .group("color", Tokens::new().unset("brand").unset("text"))
            .unset("radius");
        build_contract(&tokens, &mut |path, _| path.join("-"))
    }

    #[test]
    fn test_build_contract_names_leaves_by_path() {
        let contract = contract();
        assert_eq!(contract["color.brand"].name(), "--color-brand");
        assert_eq!(contract["radius"].path(), ["radius".to_string()]);
        assert!(contract.get("color").is_none());
        assert!(contract.subtree("color").is_some());
    }

    #[test]
    fn test_validate_reports_missing_and_unexpected() {
        let values = Tokens::new()
            .group("color", Tokens::new().value("brand", "red"))
            .value("radius", "2px")
            .value("shadow", "none");

        let err = validate(&contract(), &values).unwrap_err();
        assert_eq!(
            err,
            VcssError::ContractViolation {
                missing: vec!["color.text".into()],
                unexpected: vec!["shadow".into()],
            }
        );
    }

    #[test]
    fn test_validate_treats_unset_value_as_missing() {
        let values = Tokens::new()
            .group("color", Tokens::new().value("brand", "red").unset("text"))
            .value("radius", "2px");

        let err = validate(&contract(), &values).unwrap_err();
        assert!(matches!(
            err,
            VcssError::ContractViolation { ref missing, .. } if missing == &["color.text".to_string()]
        ));
    }

    #[test]
    fn test_validate_compares_segments_not_dotted_text() {
        let values = Tokens::new()
            .value("color.brand", "red")
            .value("color.text", "#111")
            .value("radius", "2px");

        let err = validate(&contract(), &values).unwrap_err();
        assert_eq!(
            err,
            VcssError::ContractViolation {
                missing: vec!["color.brand".into(), "color.text".into()],
                unexpected: vec!["color.brand".into(), "color.text".into()],
            }
        );
    }

    #[test]
    fn test_validate_orders_assignments_by_contract() {
        let values = Tokens::new()
            .value("radius", "2px")
            .group("color", Tokens::new().value("text", "#111").value("brand", "red"));

        let fragment = validate(&contract(), &values).unwrap();
        let names: Vec<_> = fragment.iter().map(|(var, _)| var.name()).collect();
        assert_eq!(names, ["--color-brand", "--color-text", "--radius"]);
    }

    #[test]
    fn test_inline_theme_renders_declarations() {
        let values = Tokens::new()
            .group("color", Tokens::new().value("brand", "red").value("text", "#111"))
            .value("radius", 4);

        let inline = inline_theme(&contract(), &values).unwrap();
        assert_eq!(
            inline,
            "--color-brand: red; --color-text: #111; --radius: 4;"
        );
    }
}
