//! The per-file definition API.
//!
//! Every definition file gets a [`StyleFile`] from
//! [`Registry::file`](crate::Registry::file). Each call allocates identifiers
//! from the file's scope, resolves the descriptor and registers the result:
//!
//! ```rust
//! use vcss::{Registry, StyleRule, Tokens};
//!
//! let registry = Registry::default();
//! let mut file = registry.file("src/app.css.rs");
//!
//! let (theme, vars) = file
//!     .create_theme(
//!         "theme",
//!         &Tokens::new().group("color", Tokens::new().value("brand", "#0a7")),
//!     )
//!     .unwrap();
//!
//! let link = file
//!     .style(
//!         "link",
//!         StyleRule::new()
//!             .prop("color", &vars["color.brand"])
//!             .pseudo(":hover", StyleRule::new().prop("textDecoration", "underline")),
//!     )
//!     .unwrap();
//!
//! let css = registry.finalize();
//! assert!(css.contains(&theme.selector()));
//! assert!(css.contains(&format!("{}:hover", link.selector())));
//! ```

use std::ops::Index;

use crate::descriptor::{Keyframes, StyleRule};
use crate::error::Result;
use crate::ident::{FileScope, Identifier};
use crate::registry::{RegistrationKey, Registry, RuleOwner};
use crate::resolver::Resolver;
use crate::rule::{Declaration, Rule};
use crate::theme::{ThemeContract, Tokens, VarRef, build_contract, validate};
use crate::value::Value;

/// Definition API bound to one file of one build pass.
#[derive(Debug)]
pub struct StyleFile<'r> {
    registry: &'r Registry,
    scope: FileScope,
}

impl<'r> StyleFile<'r> {
    pub(crate) fn new(registry: &'r Registry, scope: FileScope) -> Self {
        Self { registry, scope }
    }

    pub fn path(&self) -> &str {
        self.scope.path()
    }

    fn next_key(&mut self) -> RegistrationKey {
        let sequence = self.scope.next_registration();
        RegistrationKey::new(self.scope.path(), sequence)
    }

    fn resolve(&mut self, rule: &StyleRule, selector: &str) -> Result<Vec<Rule>> {
        let registry = self.registry;
        Resolver::new(&registry.config().units, registry).resolve(rule, selector, &mut self.scope)
    }

    fn register_scoped(&mut self, ident: &Identifier, rule: &StyleRule) -> Result<()> {
        let key = self.next_key();
        let rules = self.resolve(rule, &ident.selector())?;
        self.registry
            .register(RuleOwner::Scoped(ident.clone()), key, rules)
    }

    fn register_global(&mut self, selector: &str, rule: &StyleRule) -> Result<()> {
        let key = self.next_key();
        let rules = self.resolve(rule, selector)?;
        let owner = RuleOwner::Global {
            file: key.file.clone(),
            sequence: key.sequence,
        };
        self.registry.register(owner, key, rules)
    }

    /// Registers a scoped style and returns its class name.
    pub fn style(&mut self, name: &str, rule: StyleRule) -> Result<Identifier> {
        let ident = self.scope.allocate(name);
        self.register_scoped(&ident, &rule)?;
        Ok(ident)
    }

    /// Registers a style for a caller-chosen selector. Nested selectors and
    /// conditions work as in [`style`](Self::style).
    pub fn global_style(&mut self, selector: &str, rule: StyleRule) -> Result<()> {
        self.register_global(selector, &rule)
    }

    /// Declares a standalone custom property.
    pub fn create_var(&mut self, name: &str) -> VarRef {
        let ident = self.scope.allocate(name);
        let var = VarRef::new(ident.custom_property(), Vec::new());
        self.registry.declare_var(var.name());
        var
    }

    fn declare_contract(&self, contract: &ThemeContract) {
        for (_, var) in contract.leaves() {
            self.registry.declare_var(var.name());
        }
    }

    /// Declares one generated variable per leaf of `shape`. Values in `shape`
    /// are ignored and leaves may be [`Tokens::unset`].
    pub fn create_theme_vars(&mut self, shape: &Tokens) -> ThemeContract {
        let scope = &mut self.scope;
        let contract = build_contract(shape, &mut |path, _| {
            scope.allocate(&path.join("-")).custom_property()
        });
        self.declare_contract(&contract);
        log::debug!(
            "{}: declared {} theme variables",
            self.scope.path(),
            contract.leaves().len()
        );
        contract
    }

    /// Declares a contract whose custom-property names are chosen by
    /// `name_for(value, path)` instead of generated. A missing `--` prefix is
    /// added.
    ///
    /// ```rust
    /// use vcss::{Registry, Tokens};
    ///
    /// let registry = Registry::default();
    /// let mut file = registry.file("theme.css.rs");
    /// let vars = file.create_global_theme_contract(
    ///     &Tokens::new().group("color", Tokens::new().value("brand", "brand-color")),
    ///     |value, path| match value {
    ///         Some(value) => format!("app-{}", value.render("", &Default::default())),
    ///         None => path.join("-"),
    ///     },
    /// );
    /// assert_eq!(vars["color.brand"].name(), "--app-brand-color");
    /// ```
    pub fn create_global_theme_contract<F>(&mut self, shape: &Tokens, mut name_for: F) -> ThemeContract
    where
        F: FnMut(Option<&Value>, &[String]) -> String,
    {
        let contract = build_contract(shape, &mut |path, value| name_for(value, path));
        self.declare_contract(&contract);
        contract
    }

    /// Creates a contract from the shape of `values` and a theme class that
    /// assigns them. Every leaf must have a value.
    pub fn create_theme(&mut self, name: &str, values: &Tokens) -> Result<(Identifier, ThemeContract)> {
        let ident = self.scope.allocate(name);
        let contract = self.create_theme_vars(values);
        let fragment = validate(&contract, values)?;
        self.register_scoped(&ident, &StyleRule::new().vars(fragment))?;
        log::debug!("{}: created theme {}", self.scope.path(), ident);
        Ok((ident, contract))
    }

    /// Creates another theme class for an existing contract. `values` must
    /// supply exactly the contract's leaves.
    pub fn create_theme_variant(
        &mut self,
        name: &str,
        contract: &ThemeContract,
        values: &Tokens,
    ) -> Result<Identifier> {
        let fragment = validate(contract, values)?;
        let ident = self.scope.allocate(name);
        self.register_scoped(&ident, &StyleRule::new().vars(fragment))?;
        log::debug!("{}: created theme variant {}", self.scope.path(), ident);
        Ok(ident)
    }

    /// Like [`create_theme`](Self::create_theme), but the assignments are
    /// attached to `selector` (`:root`, `[data-theme]`, ...).
    pub fn create_global_theme(&mut self, selector: &str, values: &Tokens) -> Result<ThemeContract> {
        let contract = self.create_theme_vars(values);
        let fragment = validate(&contract, values)?;
        self.register_global(selector, &StyleRule::new().vars(fragment))?;
        Ok(contract)
    }

    /// Assigns a complete set of values for `contract` under `selector`.
    pub fn create_global_theme_variant(
        &mut self,
        selector: &str,
        contract: &ThemeContract,
        values: &Tokens,
    ) -> Result<()> {
        let fragment = validate(contract, values)?;
        self.register_global(selector, &StyleRule::new().vars(fragment))
    }

    /// Registers an animation under a generated name.
    pub fn keyframes(&mut self, name: &str, keyframes: Keyframes) -> Result<Identifier> {
        let ident = self.scope.allocate(name);
        let key = self.next_key();
        let registry = self.registry;
        let rules = Resolver::new(&registry.config().units, registry)
            .resolve_keyframes(&keyframes, ident.as_str())?;
        registry.register(RuleOwner::Scoped(ident.clone()), key, rules)?;
        Ok(ident)
    }

    /// Registers an animation under `name` exactly as given.
    pub fn global_keyframes(&mut self, name: &str, keyframes: Keyframes) -> Result<()> {
        let key = self.next_key();
        let registry = self.registry;
        let rules = Resolver::new(&registry.config().units, registry)
            .resolve_keyframes(&keyframes, name)?;
        let owner = RuleOwner::Global {
            file: key.file.clone(),
            sequence: key.sequence,
        };
        registry.register(owner, key, rules)
    }

    /// Registers an `@font-face` rule under a generated family name and
    /// returns the quoted name for use in `font-family`. Only the flat
    /// declarations of `rule` are used; a `font-family` in it is replaced.
    pub fn font_face(&mut self, name: &str, rule: StyleRule) -> Result<String> {
        let ident = self.scope.allocate(name);
        let family = format!("\"{ident}\"");
        let key = self.next_key();
        let registry = self.registry;

        let mut declarations = vec![Declaration::new("font-family", family.as_str())];
        for declaration in
            Resolver::new(&registry.config().units, registry).declarations(&rule, None)?
        {
            if declaration.property == "font-family" {
                log::warn!(
                    "{}: ignoring font-family of font face {}",
                    self.scope.path(),
                    ident
                );
                continue;
            }
            declarations.push(declaration);
        }

        let rules = vec![Rule::new("@font-face", declarations)];
        registry.register(RuleOwner::Scoped(ident), key, rules)?;
        Ok(family)
    }

    /// Registers one style per entry, named `{name}_{key}`.
    pub fn map_to_styles<K, I>(&mut self, name: &str, entries: I) -> Result<StyleVariants>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, StyleRule)>,
    {
        self.map_to_styles_with(name, entries, |rule, _| rule)
    }

    /// Registers one style per entry, building each descriptor with
    /// `to_rule(value, key)`.
    ///
    /// ```rust
    /// use vcss::{Registry, StyleRule};
    ///
    /// let registry = Registry::default();
    /// let mut file = registry.file("space.css.rs");
    /// let padding = file
    ///     .map_to_styles_with("padding", [("sm", 4), ("lg", 16)], |size, _| {
    ///         StyleRule::new().prop("padding", size)
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(padding.len(), 2);
    /// assert!(padding["sm"].as_str().starts_with("padding_sm__"));
    /// ```
    pub fn map_to_styles_with<K, V, I, F>(
        &mut self,
        name: &str,
        entries: I,
        mut to_rule: F,
    ) -> Result<StyleVariants>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        F: FnMut(V, &str) -> StyleRule,
    {
        let mut variants = StyleVariants::default();
        for (key, value) in entries {
            let key = key.into();
            let rule = to_rule(value, &key);
            let ident = self.style(&format!("{name}_{key}"), rule)?;
            variants.entries.push((key, ident));
        }
        Ok(variants)
    }
}

/// Identifiers produced by [`StyleFile::map_to_styles`], keyed by entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleVariants {
    entries: Vec<(String, Identifier)>,
}

impl StyleVariants {
    pub fn get(&self, key: &str) -> Option<&Identifier> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, ident)| ident)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Identifier)> {
        self.entries.iter().map(|(key, ident)| (key.as_str(), ident))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&str> for StyleVariants {
    type Output = Identifier;

    fn index(&self, key: &str) -> &Identifier {
        match self.get(key) {
            Some(ident) => ident,
            None => panic!("no style variant `{key}`"),
        }
    }
}
