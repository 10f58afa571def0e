//! Build-time style sheets from structured descriptors.
//!
//! Styles are written as nested [`StyleRule`] descriptors and compiled into
//! static CSS plus the generated names that refer to it. A build pass looks
//! like this:
//!
//! ```rust
//! use vcss::{Registry, StyleRule, Tokens, calc};
//!
//! let registry = Registry::default();
//! let mut file = registry.file("src/button.css.rs");
//!
//! let vars = file.create_theme_vars(&Tokens::new().unset("accent").unset("space"));
//! let light = file
//!     .create_theme_variant(
//!         "light",
//!         &vars,
//!         &Tokens::new().value("accent", "#06c").value("space", "4px"),
//!     )
//!     .unwrap();
//!
//! let button = file
//!     .style(
//!         "button",
//!         StyleRule::new()
//!             .prop("color", &vars["accent"])
//!             .prop("padding", calc(&vars["space"]).multiply(2).unwrap())
//!             .pseudo(":hover", StyleRule::new().prop("opacity", 0.8))
//!             .media("(min-width: 768px)", StyleRule::new().prop("fontSize", 18)),
//!     )
//!     .unwrap();
//!
//! let css = registry.finalize();
//! assert!(css.contains(&light.selector()));
//! assert!(css.contains(&format!("{}:hover", button.selector())));
//! assert!(css.contains("font-size: 18px;"));
//! ```
//!
//! ## Modules
//!
//! - [`ident`]: deterministic identifiers scoped to a definition file
//! - [`theme`]: contracts, tokens and completeness checks
//! - [`descriptor`]: the nested input format
//! - [`resolver`]: flattening descriptors into [`Rule`]s
//! - [`registry`]: collecting rules and writing the stylesheet
//! - [`file`]: the per-file definition API

pub mod config;
pub mod descriptor;
pub mod error;
pub mod file;
pub mod ident;
pub mod registry;
pub mod resolver;
pub mod rule;
pub mod theme;
pub mod value;

pub use config::{Config, IdentifierStyle, UnitPolicy};
pub use descriptor::{Keyframes, SelectorKey, StyleRule, VarKey};
pub use error::{Result, VcssError};
pub use file::{StyleFile, StyleVariants};
pub use ident::{FileScope, Identifier};
pub use registry::{RegistrationKey, Registry, RuleOwner};
pub use resolver::{Resolver, VarScope, property_name};
pub use rule::{Condition, Declaration, Rule, to_css, to_css_grouped};
pub use theme::{
    ContractNode, ThemeContract, Token, Tokens, VarRef, VarsFragment, assign_vars, inline_theme,
};
pub use value::{Value, fallback_var};

pub use vcss_calc::{Calc, CalcError, CalcExpr, add, calc, divide, multiply, negate, subtract};
