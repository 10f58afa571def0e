use std::fmt;
use std::ops::Index;

use vcss_calc::CalcExpr;

/// A reference to one custom property.
///
/// Renders as `var(--name)` wherever it is used as a value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VarRef {
    name: String,
    path: Vec<String>,
}

impl VarRef {
    pub(crate) fn new(name: impl Into<String>, path: Vec<String>) -> Self {
        let name = name.into();
        let name = if name.starts_with("--") {
            name
        } else {
            format!("--{name}")
        };
        Self { name, path }
    }

    /// The custom property name, including the leading `--`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of this variable inside its contract; empty for variables
    /// made by `create_var`.
    pub fn path(&self) -> &[String] {
        &self.path
    }
}

impl fmt::Display for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "var({})", self.name)
    }
}

impl From<&VarRef> for CalcExpr {
    fn from(value: &VarRef) -> Self {
        CalcExpr::Var(value.name.clone())
    }
}

impl From<VarRef> for CalcExpr {
    fn from(value: VarRef) -> Self {
        CalcExpr::Var(value.name)
    }
}

/// A node of a [`ThemeContract`].
#[derive(Clone, Debug, PartialEq)]
pub enum ContractNode {
    Var(VarRef),
    Group(ThemeContract),
}

/// The declared shape of a set of theme variables.
///
/// Every leaf is a [`VarRef`]; themes bound to the contract must assign a
/// value to each one of them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThemeContract {
    entries: Vec<(String, ContractNode)>,
}

impl ThemeContract {
    pub(crate) fn push(&mut self, key: String, node: ContractNode) {
        self.entries.push((key, node));
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ContractNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    fn node(&self, path: &str) -> Option<&ContractNode> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut node = self
            .entries
            .iter()
            .find(|(key, _)| key == first)
            .map(|(_, node)| node)?;
        for segment in segments {
            let ContractNode::Group(group) = node else {
                return None;
            };
            node = group
                .entries
                .iter()
                .find(|(key, _)| key == segment)
                .map(|(_, node)| node)?;
        }
        Some(node)
    }

    /// The variable at a dotted path such as `"color.brand"`.
    pub fn get(&self, path: &str) -> Option<&VarRef> {
        match self.node(path)? {
            ContractNode::Var(var) => Some(var),
            ContractNode::Group(_) => None,
        }
    }

    /// The group at a dotted path, for use with
    /// [`assign_vars`](crate::assign_vars).
    pub fn subtree(&self, path: &str) -> Option<&ThemeContract> {
        match self.node(path)? {
            ContractNode::Group(group) => Some(group),
            ContractNode::Var(_) => None,
        }
    }

    /// Every leaf with its dotted path relative to this contract, in
    /// declaration order.
    pub fn leaves(&self) -> Vec<(String, &VarRef)> {
        self.segment_leaves()
            .into_iter()
            .map(|(path, var)| (path.join("."), var))
            .collect()
    }

    /// Like [`leaves`](Self::leaves), with each path kept as separate keys.
    pub(crate) fn segment_leaves(&self) -> Vec<(Vec<String>, &VarRef)> {
        let mut out = Vec::new();
        self.collect_leaves(&mut Vec::new(), &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, prefix: &mut Vec<String>, out: &mut Vec<(Vec<String>, &'a VarRef)>) {
        for (key, node) in &self.entries {
            prefix.push(key.clone());
            match node {
                ContractNode::Var(var) => out.push((prefix.clone(), var)),
                ContractNode::Group(group) => group.collect_leaves(prefix, out),
            }
            prefix.pop();
        }
    }
}

impl Index<&str> for ThemeContract {
    type Output = VarRef;

    /// # Panics
    ///
    /// Panics if no variable exists at `path`.
    fn index(&self, path: &str) -> &VarRef {
        match self.get(path) {
            Some(var) => var,
            None => panic!("no theme variable at path `{path}`"),
        }
    }
}
