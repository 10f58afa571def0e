//! Chainable calc builder.

use std::fmt;

use crate::error::CalcError;
use crate::expr::{self, CalcExpr};

/// A calc expression under construction.
///
/// Each method consumes the builder and returns a new one whose root wraps the
/// previous root, so operations accumulate left-to-right:
///
/// ```rust
/// use vcss_calc::calc;
///
/// let width = calc("100%").subtract("2rem").divide(2).unwrap();
/// assert_eq!(width.to_string(), "calc((100% - 2rem) / 2)");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Calc {
    expr: CalcExpr,
}

/// Starts a chain from `seed`.
pub fn calc(seed: impl Into<CalcExpr>) -> Calc {
    Calc { expr: seed.into() }
}

impl Calc {
    pub fn add(self, operand: impl Into<CalcExpr>) -> Self {
        Self {
            expr: CalcExpr::Op {
                op: expr::Operator::Add,
                operands: vec![self.expr, operand.into()],
            },
        }
    }

    pub fn subtract(self, operand: impl Into<CalcExpr>) -> Self {
        Self {
            expr: CalcExpr::Op {
                op: expr::Operator::Subtract,
                operands: vec![self.expr, operand.into()],
            },
        }
    }

    pub fn multiply(self, operand: impl Into<CalcExpr>) -> Result<Self, CalcError> {
        let expr = expr::multiply([self.expr, operand.into()])?;
        Ok(Self { expr })
    }

    pub fn divide(self, operand: impl Into<CalcExpr>) -> Result<Self, CalcError> {
        let expr = expr::divide([self.expr, operand.into()])?;
        Ok(Self { expr })
    }

    pub fn negate(self) -> Self {
        Self {
            expr: expr::negate(self.expr),
        }
    }

    pub fn expr(&self) -> &CalcExpr {
        &self.expr
    }

    pub fn into_expr(self) -> CalcExpr {
        self.expr
    }
}

impl From<Calc> for CalcExpr {
    fn from(value: Calc) -> Self {
        value.expr
    }
}

impl fmt::Display for Calc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.expr.fmt(f)
    }
}
