//! Error types for calc expression building.

use thiserror::Error;

use crate::expr::Operator;

/// Errors raised while building a calc expression.
///
/// Every error is reported at the call that builds the offending node, never
/// when the expression is later rendered.
///
/// # Examples
///
/// ```rust
/// use vcss_calc::{CalcError, add};
///
/// let err = add(["10px"]).unwrap_err();
/// assert!(matches!(err, CalcError::TooFewOperands { found: 1, .. }));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalcError {
    /// An n-ary operator received fewer than two operands.
    #[error("{op} needs at least 2 operands, got {found}")]
    TooFewOperands { op: Operator, found: usize },

    /// Two dimensioned operands were multiplied together.
    #[error("cannot multiply two dimensioned values `{left}` and `{right}`")]
    DimensionMismatch { left: String, right: String },

    /// A multiplication had no dimensionless operand at all.
    #[error("multiply needs at least one dimensionless operand, got `{operands}`")]
    NoDimensionlessOperand { operands: String },

    /// A divisor was something other than a bare number.
    #[error("divisor must be a bare number, got `{divisor}`")]
    NonNumericDivisor { divisor: String },
}
