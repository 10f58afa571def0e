//! Build configuration.
//!
//! A [`Config`] is fixed for the lifetime of a [`Registry`](crate::Registry)
//! and controls how identifiers are spelled and how bare numbers are turned
//! into CSS values.

use std::collections::HashMap;

use phf::phf_set;

/// Properties whose numeric values are emitted without a unit.
///
/// Names are kebab-case; camelCase descriptor keys are converted before the
/// lookup.
static UNITLESS_PROPERTIES: phf::Set<&'static str> = phf_set! {
    "animation-iteration-count",
    "aspect-ratio",
    "border-image-outset",
    "border-image-slice",
    "border-image-width",
    "box-flex",
    "box-flex-group",
    "box-ordinal-group",
    "column-count",
    "columns",
    "fill-opacity",
    "flex",
    "flex-grow",
    "flex-negative",
    "flex-order",
    "flex-positive",
    "flex-shrink",
    "flood-opacity",
    "font-weight",
    "grid-area",
    "grid-column",
    "grid-column-end",
    "grid-column-span",
    "grid-column-start",
    "grid-row",
    "grid-row-end",
    "grid-row-span",
    "grid-row-start",
    "initial-letter",
    "line-clamp",
    "line-height",
    "mask-border-outset",
    "mask-border-slice",
    "mask-border-width",
    "opacity",
    "order",
    "orphans",
    "scale",
    "shape-image-threshold",
    "stop-opacity",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "tab-size",
    "widows",
    "z-index",
    "zoom",
};

/// How generated identifiers are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierStyle {
    /// `{binding}__{hash}{sequence}`, readable in dev tools.
    #[default]
    Debug,
    /// `{hash}{sequence}` only.
    Short,
}

/// Decides which unit, if any, a bare number receives for a given property.
///
/// Custom properties (`--name`) never receive a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPolicy {
    default_unit: String,
    overrides: HashMap<String, Option<String>>,
}

impl Default for UnitPolicy {
    fn default() -> Self {
        Self {
            default_unit: "px".to_string(),
            overrides: HashMap::new(),
        }
    }
}

impl UnitPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to change the unit used for length-like properties.
    pub fn with_default_unit(mut self, unit: impl Into<String>) -> Self {
        self.default_unit = unit.into();
        self
    }

    /// Builder method to give `property` a specific unit.
    pub fn with_unit(mut self, property: impl Into<String>, unit: impl Into<String>) -> Self {
        self.overrides.insert(property.into(), Some(unit.into()));
        self
    }

    /// Builder method to emit numbers for `property` without a unit.
    pub fn with_unitless(mut self, property: impl Into<String>) -> Self {
        self.overrides.insert(property.into(), None);
        self
    }

    /// Returns the unit appended to a number for `property`, or `None` when the
    /// number is emitted as-is.
    pub fn unit_for(&self, property: &str) -> Option<&str> {
        if property.starts_with("--") {
            return None;
        }
        if let Some(unit) = self.overrides.get(property) {
            return unit.as_deref();
        }
        if UNITLESS_PROPERTIES.contains(property) {
            None
        } else {
            Some(&self.default_unit)
        }
    }

    /// Renders a number for `property`. Zero never receives a unit.
    pub fn render_number(&self, property: &str, value: f64) -> String {
        match self.unit_for(property) {
            Some(unit) if value != 0.0 => format!("{value}{unit}"),
            _ => format!("{value}"),
        }
    }
}

/// Settings shared by every file processed in one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub identifiers: IdentifierStyle,
    /// Mixed into every file-scope hash so that two packages with identical
    /// file layouts never collide.
    pub package: Option<String>,
    pub units: UnitPolicy,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the identifier style.
    pub fn with_identifiers(mut self, style: IdentifierStyle) -> Self {
        self.identifiers = style;
        self
    }

    /// Builder method to set the package name.
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Builder method to replace the unit policy.
    pub fn with_units(mut self, units: UnitPolicy) -> Self {
        self.units = units;
        self
    }
}
