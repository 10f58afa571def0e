//! The calc expression tree and its standalone operator functions.

use std::fmt;

use crate::error::CalcError;
use crate::parse::parse_operand;

/// A binary or n-ary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// The CSS symbol for this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        };
        f.write_str(name)
    }
}

/// What is statically known about the unit of an expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    /// A plain number such as `2`.
    Dimensionless,
    /// A value carrying a unit such as `10px` or `50%`.
    Dimensioned,
    /// A variable or opaque value whose unit cannot be known at build time.
    Unknown,
}

/// A node of a calc expression.
///
/// Expressions are immutable values: combining two expressions builds a new
/// node that owns copies of its operands, so an expression can be reused as an
/// operand any number of times.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcExpr {
    /// A dimensionless number.
    Number(f64),
    /// A number with a unit, e.g. `10px`.
    Quantity { value: f64, unit: String },
    /// A reference to a custom property, stored with its leading `--`.
    Var(String),
    /// Any other value, rendered verbatim (`var(--x)`, `100vh`, `env(...)`).
    Raw(String),
    /// An operator applied left-to-right over two or more operands.
    Op {
        op: Operator,
        operands: Vec<CalcExpr>,
    },
    /// Arithmetic negation of the operand.
    Negate(Box<CalcExpr>),
}

impl CalcExpr {
    /// A typed custom-property reference. `name` may be given with or without
    /// its leading `--`.
    pub fn var(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        if name.starts_with("--") {
            Self::Var(name.to_string())
        } else {
            Self::Var(format!("--{name}"))
        }
    }

    pub fn is_atomic(&self) -> bool {
        !matches!(self, Self::Op { .. } | Self::Negate(_))
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Self::Number(_) => Dimension::Dimensionless,
            Self::Quantity { .. } => Dimension::Dimensioned,
            Self::Var(_) | Self::Raw(_) => Dimension::Unknown,
            Self::Negate(inner) => inner.dimension(),
            Self::Op {
                op: Operator::Divide,
                operands,
            } => operands
                .first()
                .map_or(Dimension::Dimensionless, Self::dimension),
            Self::Op { operands, .. } => combine_dimensions(operands),
        }
    }

    /// Visits every typed variable reference in the tree, in rendering order.
    pub fn for_each_var<'a>(&'a self, f: &mut dyn FnMut(&'a str)) {
        match self {
            Self::Var(name) => f(name),
            Self::Negate(inner) => inner.for_each_var(f),
            Self::Op { operands, .. } => {
                for operand in operands {
                    operand.for_each_var(f);
                }
            }
            Self::Number(_) | Self::Quantity { .. } | Self::Raw(_) => {}
        }
    }

    fn write_atom(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Quantity { value, unit } => write!(f, "{value}{unit}"),
            Self::Var(name) => write!(f, "var({name})"),
            Self::Raw(raw) => f.write_str(raw),
            Self::Op { .. } | Self::Negate(_) => self.write_inner(f),
        }
    }

    /// Writes the expression without the outer `calc(...)`.
    fn write_inner(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Op { op, operands } => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", op.symbol())?;
                    }
                    operand.write_operand(f)?;
                }
                Ok(())
            }
            Self::Negate(inner) => {
                f.write_str("-1 * ")?;
                inner.write_operand(f)
            }
            _ => self.write_atom(f),
        }
    }

    fn write_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_atomic() {
            self.write_atom(f)
        } else {
            f.write_str("(")?;
            self.write_inner(f)?;
            f.write_str(")")
        }
    }
}

/// Renders atoms verbatim and compound expressions as `calc(...)`.
impl fmt::Display for CalcExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_atomic() {
            self.write_atom(f)
        } else {
            f.write_str("calc(")?;
            self.write_inner(f)?;
            f.write_str(")")
        }
    }
}

fn combine_dimensions(operands: &[CalcExpr]) -> Dimension {
    let mut result = Dimension::Dimensionless;
    for operand in operands {
        match operand.dimension() {
            Dimension::Dimensioned => return Dimension::Dimensioned,
            Dimension::Unknown => result = Dimension::Unknown,
            Dimension::Dimensionless => {}
        }
    }
    result
}

impl From<f64> for CalcExpr {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for CalcExpr {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for CalcExpr {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for CalcExpr {
    fn from(value: &str) -> Self {
        parse_operand(value)
    }
}

impl From<String> for CalcExpr {
    fn from(value: String) -> Self {
        parse_operand(&value)
    }
}

impl From<&CalcExpr> for CalcExpr {
    fn from(value: &CalcExpr) -> Self {
        value.clone()
    }
}

fn collect_operands<I, T>(op: Operator, operands: I) -> Result<Vec<CalcExpr>, CalcError>
where
    I: IntoIterator<Item = T>,
    T: Into<CalcExpr>,
{
    let operands: Vec<CalcExpr> = operands.into_iter().map(Into::into).collect();
    if operands.len() < 2 {
        return Err(CalcError::TooFewOperands {
            op,
            found: operands.len(),
        });
    }
    Ok(operands)
}

fn join_operands(operands: &[CalcExpr]) -> String {
    operands
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `a + b + ...`
pub fn add<I, T>(operands: I) -> Result<CalcExpr, CalcError>
where
    I: IntoIterator<Item = T>,
    T: Into<CalcExpr>,
{
    let operands = collect_operands(Operator::Add, operands)?;
    Ok(CalcExpr::Op {
        op: Operator::Add,
        operands,
    })
}

/// `a - b - ...`
pub fn subtract<I, T>(operands: I) -> Result<CalcExpr, CalcError>
where
    I: IntoIterator<Item = T>,
    T: Into<CalcExpr>,
{
    let operands = collect_operands(Operator::Subtract, operands)?;
    Ok(CalcExpr::Op {
        op: Operator::Subtract,
        operands,
    })
}

/// `a * b * ...`
///
/// At least one operand must be dimensionless and at most one may carry a
/// unit.
pub fn multiply<I, T>(operands: I) -> Result<CalcExpr, CalcError>
where
    I: IntoIterator<Item = T>,
    T: Into<CalcExpr>,
{
    let operands = collect_operands(Operator::Multiply, operands)?;

    let mut dimensioned = operands
        .iter()
        .filter(|o| o.dimension() == Dimension::Dimensioned);
    if let (Some(left), Some(right)) = (dimensioned.next(), dimensioned.next()) {
        return Err(CalcError::DimensionMismatch {
            left: left.to_string(),
            right: right.to_string(),
        });
    }
    if !operands
        .iter()
        .any(|o| o.dimension() == Dimension::Dimensionless)
    {
        return Err(CalcError::NoDimensionlessOperand {
            operands: join_operands(&operands),
        });
    }

    Ok(CalcExpr::Op {
        op: Operator::Multiply,
        operands,
    })
}

/// `a / b / ...`
///
/// Every divisor must be a bare number.
pub fn divide<I, T>(operands: I) -> Result<CalcExpr, CalcError>
where
    I: IntoIterator<Item = T>,
    T: Into<CalcExpr>,
{
    let operands = collect_operands(Operator::Divide, operands)?;
    if let Some(divisor) = operands
        .iter()
        .skip(1)
        .find(|o| !matches!(o, CalcExpr::Number(_)))
    {
        return Err(CalcError::NonNumericDivisor {
            divisor: divisor.to_string(),
        });
    }
    Ok(CalcExpr::Op {
        op: Operator::Divide,
        operands,
    })
}

/// `-1 * operand`
pub fn negate(operand: impl Into<CalcExpr>) -> CalcExpr {
    CalcExpr::Negate(Box::new(operand.into()))
}
