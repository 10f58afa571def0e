//! Resolved rules and their serialization.
//!
//! A [`Rule`] is the flat output of the resolver: one selector, its
//! declarations, the chain of conditions it sits in and, for keyframe
//! offsets, the name of the animation it belongs to.
//!
//! ## Output layout
//!
//! [`to_css`] writes unconditioned rules first, then one wrapper per distinct
//! condition chain in order of first appearance:
//!
//! ```css
//! .a { color: red; }
//! @keyframes spin__x1 { from { ... } to { ... } }
//! @media (min-width: 600px) {
//!   .a { color: blue; }
//!   .b { color: green; }
//! }
//! ```

use std::fmt::Write;

/// A single `property: value` pair, already rendered.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// An at-rule condition wrapping a rule. The query text is never validated.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    Media(String),
    Supports(String),
    Container(String),
}

impl Condition {
    /// The opening line of the at-rule, without the brace.
    pub fn prelude(&self) -> String {
        match self {
            Self::Media(query) => format!("@media {query}"),
            Self::Supports(query) => format!("@supports {query}"),
            Self::Container(query) => format!("@container {query}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
    /// Outermost condition first.
    pub conditions: Vec<Condition>,
    /// Set on keyframe offsets; `selector` is then the offset (`from`, `50%`).
    pub keyframes: Option<String>,
}

impl Rule {
    pub fn new(selector: impl Into<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            selector: selector.into(),
            declarations,
            conditions: Vec::new(),
            keyframes: None,
        }
    }

    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn in_keyframes(mut self, name: impl Into<String>) -> Self {
        self.keyframes = Some(name.into());
        self
    }

    pub fn is_conditioned(&self) -> bool {
        !self.conditions.is_empty()
    }

    fn write_block(&self, out: &mut String, depth: usize) {
        let pad = "  ".repeat(depth);
        let _ = writeln!(out, "{pad}{} {{", self.selector);
        for declaration in &self.declarations {
            let _ = writeln!(
                out,
                "{pad}  {}: {};",
                declaration.property, declaration.value
            );
        }
        let _ = writeln!(out, "{pad}}}");
    }
}

/// Serializes rules into stylesheet text.
///
/// Relative order is preserved inside the unconditioned section and inside
/// each condition group.
pub fn to_css<'a>(rules: impl IntoIterator<Item = &'a Rule>) -> String {
    write_css(rules.into_iter().map(|rule| (0, rule)))
}

/// Like [`to_css`], for rules coming from separate registrations. Keyframe
/// offsets are only folded into one `@keyframes` block when they come from
/// the same registration, so two animations sharing a name stay apart.
pub fn to_css_grouped<'a>(groups: impl IntoIterator<Item = &'a [Rule]>) -> String {
    write_css(
        groups
            .into_iter()
            .enumerate()
            .flat_map(|(group, rules)| rules.iter().map(move |rule| (group, rule))),
    )
}

type Tagged<'a> = (usize, &'a Rule);

fn write_css<'a>(rules: impl Iterator<Item = Tagged<'a>>) -> String {
    let mut plain: Vec<Tagged<'a>> = Vec::new();
    let mut groups: Vec<(&[Condition], Vec<Tagged<'a>>)> = Vec::new();

    for tagged in rules {
        let rule = tagged.1;
        if !rule.is_conditioned() {
            plain.push(tagged);
        } else if let Some((_, members)) = groups
            .iter_mut()
            .find(|(conditions, _)| *conditions == rule.conditions.as_slice())
        {
            members.push(tagged);
        } else {
            groups.push((rule.conditions.as_slice(), vec![tagged]));
        }
    }

    let mut out = String::new();
    write_rules(&mut out, &plain, 0);
    for (conditions, members) in &groups {
        for (depth, condition) in conditions.iter().enumerate() {
            let _ = writeln!(out, "{}{} {{", "  ".repeat(depth), condition.prelude());
        }
        write_rules(&mut out, members, conditions.len());
        for depth in (0..conditions.len()).rev() {
            let _ = writeln!(out, "{}}}", "  ".repeat(depth));
        }
    }
    out
}

/// Writes rules at `depth`, folding consecutive offsets of one animation
/// from one registration into a single `@keyframes` block.
fn write_rules(out: &mut String, rules: &[Tagged<'_>], depth: usize) {
    let mut i = 0;
    while i < rules.len() {
        let (group, rule) = rules[i];
        match &rule.keyframes {
            Some(name) => {
                let pad = "  ".repeat(depth);
                let _ = writeln!(out, "{pad}@keyframes {name} {{");
                while i < rules.len()
                    && rules[i].0 == group
                    && rules[i].1.keyframes.as_ref() == Some(name)
                {
                    rules[i].1.write_block(out, depth + 1);
                    i += 1;
                }
                let _ = writeln!(out, "{pad}}}");
            }
            None => {
                rule.write_block(out, depth);
                i += 1;
            }
        }
    }
}
