//! Error types for style resolution and registration.
//!
//! Every error describes a mistake in authored style definitions. They are
//! raised synchronously by the call that detects them and abort the current
//! build pass; none of them is transient.

use thiserror::Error;
use vcss_calc::CalcError;

/// Errors raised while defining, resolving or registering styles.
///
/// # Examples
///
/// ```rust
/// use vcss::{Registry, Tokens, VcssError};
///
/// let registry = Registry::default();
/// let mut file = registry.file("src/theme.css.rs");
/// let contract = file.create_theme_vars(&Tokens::new().unset("a").unset("b"));
///
/// let err = file
///     .create_theme_variant("light", &contract, &Tokens::new().value("a", "1"))
///     .unwrap_err();
/// assert!(matches!(err, VcssError::ContractViolation { .. }));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VcssError {
    /// A set of theme values did not match the leaf paths of its contract.
    #[error("theme contract violation: {}", describe_paths(.missing, .unexpected))]
    ContractViolation {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// The same identifier was registered twice with different rules.
    ///
    /// This points at a non-deterministic definition or two definitions
    /// colliding on one name.
    #[error("identifier `{0}` was registered twice with different rules")]
    IdentifierConflict(String),

    /// A variable was used that no contract or `create_var` call in this build
    /// declared.
    #[error("unresolved variable reference `{0}`")]
    UnresolvedVariableReference(String),

    /// A calc expression was built from invalid operands.
    #[error("invalid calc operands: {0}")]
    InvalidCalcOperands(#[from] CalcError),

    /// A nested selector could not be parsed or does not target `&`.
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A pseudo shorthand key does not start with `:`.
    #[error("invalid pseudo selector `{0}`, expected `:name` or `::name`")]
    InvalidPseudo(String),
}

fn describe_paths(missing: &[String], unexpected: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing {}", missing.join(", ")));
    }
    if !unexpected.is_empty() {
        parts.push(format!("unexpected {}", unexpected.join(", ")));
    }
    parts.join("; ")
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VcssError>;
