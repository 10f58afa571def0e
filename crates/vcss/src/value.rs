//! Declaration values.

use vcss_calc::{Calc, CalcExpr};

use crate::config::UnitPolicy;
use crate::theme::VarRef;

/// The right-hand side of a declaration or variable assignment.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Text emitted verbatim. The token `@keyframes` is replaced by the
    /// enclosing descriptor's animation name.
    Literal(String),
    /// A bare number; the property decides its unit.
    Number(f64),
    /// `var(--name)`
    Var(VarRef),
    /// `var(--a, var(--b, fallback))`
    Fallback {
        vars: Vec<VarRef>,
        fallback: Option<Box<Value>>,
    },
    Calc(CalcExpr),
}

impl Value {
    /// Renders the value for `property`.
    pub fn render(&self, property: &str, units: &UnitPolicy) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::Number(n) => units.render_number(property, *n),
            Self::Var(var) => var.to_string(),
            Self::Fallback { vars, fallback } => {
                let mut out = fallback
                    .as_ref()
                    .map(|value| value.render(property, units));
                for var in vars.iter().rev() {
                    out = Some(match out {
                        Some(inner) => format!("var({}, {inner})", var.name()),
                        None => var.to_string(),
                    });
                }
                out.unwrap_or_default()
            }
            Self::Calc(CalcExpr::Number(n)) => units.render_number(property, *n),
            Self::Calc(expr) => expr.to_string(),
        }
    }

    /// Names of every custom property this value reads through a typed
    /// reference. Literal `var(--x)` text is opaque and not reported.
    pub fn referenced_vars(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_vars(&mut names);
        names
    }

    fn collect_vars<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Var(var) => names.push(var.name()),
            Self::Fallback { vars, fallback } => {
                names.extend(vars.iter().map(VarRef::name));
                if let Some(fallback) = fallback {
                    fallback.collect_vars(names);
                }
            }
            Self::Calc(expr) => expr.for_each_var(&mut |name| names.push(name)),
            Self::Literal(_) | Self::Number(_) => {}
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<VarRef> for Value {
    fn from(value: VarRef) -> Self {
        Self::Var(value)
    }
}

impl From<&VarRef> for Value {
    fn from(value: &VarRef) -> Self {
        Self::Var(value.clone())
    }
}

impl From<CalcExpr> for Value {
    fn from(value: CalcExpr) -> Self {
        Self::Calc(value)
    }
}

impl From<Calc> for Value {
    fn from(value: Calc) -> Self {
        Self::Calc(value.into_expr())
    }
}

/// Reads the first variable that is set, falling back to the next one and
/// finally to `fallback`.
///
/// ```rust
/// use vcss::{Registry, fallback_var};
///
/// let registry = Registry::default();
/// let mut file = registry.file("vars.css.rs");
/// let accent = file.create_var("accent");
/// let brand = file.create_var("brand");
///
/// let value = fallback_var(&[&accent, &brand], "blue");
/// let rendered = value.render("color", &Default::default());
/// assert_eq!(
///     rendered,
///     format!("var({}, var({}, blue))", accent.name(), brand.name())
/// );
/// ```
pub fn fallback_var(vars: &[&VarRef], fallback: impl Into<Value>) -> Value {
    Value::Fallback {
        vars: vars.iter().map(|var| (*var).clone()).collect(),
        fallback: Some(Box::new(fallback.into())),
    }
}
