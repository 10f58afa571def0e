//! # vcss-calc - calc() expression builder
//!
//! Builds CSS `calc()` values as immutable expression trees. Operands can be
//! numbers, unit-carrying strings (`"10px"`), custom-property references, or
//! other expressions; the rendered output is fully parenthesized so nesting
//! never depends on operator precedence.
//!
//! ## Quick Start
//!
//! ```rust
//! use vcss_calc::{CalcExpr, calc, divide, multiply, negate};
//!
//! let half = divide([CalcExpr::from("var(--x)"), 2.into()]).unwrap();
//! let scaled = multiply([half, 4.into()]).unwrap();
//! assert_eq!(scaled.to_string(), "calc((var(--x) / 2) * 4)");
//!
//! let offset = negate(calc("var(--y)").divide(2).unwrap());
//! assert_eq!(offset.to_string(), "calc(-1 * (var(--y) / 2))");
//! ```
//!
//! ## Validation
//!
//! Operands are checked when a node is built:
//!
//! - every operator needs at least two operands
//! - `multiply` needs a dimensionless operand and rejects two units
//! - `divide` only accepts bare numbers as divisors

pub mod builder;
pub mod error;
pub mod expr;
pub mod parse;

pub use builder::{Calc, calc};
pub use error::CalcError;
pub use expr::{CalcExpr, Dimension, Operator, add, divide, multiply, negate, subtract};
