//! The per-build accumulator of resolved rules.
//!
//! A [`Registry`] lives for one build pass. Definition files register their
//! rules through a [`StyleFile`], possibly from several threads at once, and
//! the pass ends with [`Registry::finalize`], which serializes everything
//! into a single stylesheet.
//!
//! Output order never depends on which thread registered first: every entry
//! carries a [`RegistrationKey`] made of its file path and the position of
//! the registration inside that file, and entries are written sorted by it.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use xxhash_rust::xxh3::xxh3_64;

use crate::config::Config;
use crate::error::{Result, VcssError};
use crate::file::StyleFile;
use crate::ident::{FileScope, Identifier};
use crate::resolver::VarScope;
use crate::rule::{Rule, to_css, to_css_grouped};

/// What a set of registered rules belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RuleOwner {
    /// A generated class, theme, keyframes or font-face name.
    Scoped(Identifier),
    /// A caller-chosen selector, identified by where it was registered.
    Global { file: String, sequence: u64 },
}

impl RuleOwner {
    fn describe(&self) -> String {
        match self {
            Self::Scoped(ident) => ident.to_string(),
            Self::Global { file, sequence } => format!("{file}#{sequence}"),
        }
    }
}

/// Position of a registration in the final stylesheet.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationKey {
    pub file: String,
    pub sequence: u64,
}

impl RegistrationKey {
    pub fn new(file: impl Into<String>, sequence: u64) -> Self {
        Self {
            file: file.into(),
            sequence,
        }
    }
}

#[derive(Debug)]
struct Entry {
    key: RegistrationKey,
    digest: u64,
    rules: Vec<Rule>,
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<RuleOwner, Entry>,
    vars: HashSet<String>,
}

impl State {
    fn sorted(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }

    fn css(&self) -> String {
        to_css_grouped(self.sorted().into_iter().map(|entry| entry.rules.as_slice()))
    }
}

/// Collects the rules of one build pass.
///
/// ```rust
/// use vcss::{Registry, StyleRule};
///
/// let registry = Registry::default();
/// let mut file = registry.file("button.css.rs");
/// let button = file
///     .style("button", StyleRule::new().prop("color", "red"))
///     .unwrap();
///
/// let css = registry.finalize();
/// assert!(css.starts_with(&format!("{} {{", button.selector())));
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    config: Config,
    state: Mutex<State>,
}

impl Registry {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: Mutex::new(State::default()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Starts processing a definition file. Every call restarts the file's
    /// identifier sequence, so processing the same file twice yields the same
    /// identifiers.
    pub fn file(&self, path: impl Into<String>) -> StyleFile<'_> {
        StyleFile::new(self, FileScope::new(path, &self.config))
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records `rules` for `owner`.
    ///
    /// Registering the same rules for the same owner again is a no-op and
    /// keeps the original position. Registering different rules fails with
    /// [`VcssError::IdentifierConflict`].
    pub fn register(&self, owner: RuleOwner, key: RegistrationKey, rules: Vec<Rule>) -> Result<()> {
        let digest = xxh3_64(to_css(&rules).as_bytes());
        let mut state = self.lock();

        if let Some(existing) = state.entries.get(&owner) {
            if existing.digest == digest {
                log::trace!("re-registered {} with identical rules", owner.describe());
                return Ok(());
            }
            log::warn!(
                "conflicting registration for {} from {}#{} (first seen at {}#{})",
                owner.describe(),
                key.file,
                key.sequence,
                existing.key.file,
                existing.key.sequence
            );
            return Err(VcssError::IdentifierConflict(owner.describe()));
        }

        log::debug!(
            "registered {} ({} rules) at {}#{}",
            owner.describe(),
            rules.len(),
            key.file,
            key.sequence
        );
        state.entries.insert(owner, Entry { key, digest, rules });
        Ok(())
    }

    pub(crate) fn declare_var(&self, name: &str) {
        self.lock().vars.insert(name.to_string());
    }

    /// Serializes the current contents without ending the pass.
    pub fn css(&self) -> String {
        self.lock().css()
    }

    /// Ends the pass and returns its stylesheet.
    pub fn finalize(self) -> String {
        let state = self.state.into_inner().unwrap_or_else(PoisonError::into_inner);
        log::debug!("finalizing {} registrations", state.entries.len());
        state.css()
    }

    /// Discards everything registered so far, e.g. after a failed pass.
    pub fn reset(&self) {
        let mut state = self.lock();
        log::debug!("resetting registry with {} registrations", state.entries.len());
        state.entries.clear();
        state.vars.clear();
    }

    /// Number of registered owners.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VarScope for Registry {
    fn contains_var(&self, name: &str) -> bool {
        self.lock().vars.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Declaration;

    fn rule(selector: &str, color: &str) -> Vec<Rule> {
        vec![Rule::new(selector, vec![Declaration::new("color", color)])]
    }

    fn owner(name: &str) -> RuleOwner {
        RuleOwner::Scoped(Identifier::new(name))
    }

    #[test]
    fn test_identical_registration_is_idempotent() {
        let registry = Registry::default();
        let key = RegistrationKey::new("a.css.rs", 0);
        registry
            .register(owner("a"), key.clone(), rule(".a", "red"))
            .unwrap();
        registry
            .register(owner("a"), key, rule(".a", "red"))
            .unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_different_rules_conflict() {
        let registry = Registry::default();
        registry
            .register(owner("a"), RegistrationKey::new("a.css.rs", 0), rule(".a", "red"))
            .unwrap();
        let err = registry
            .register(owner("a"), RegistrationKey::new("b.css.rs", 0), rule(".a", "blue"))
            .unwrap_err();
        assert_eq!(err, VcssError::IdentifierConflict("a".into()));
    }

    #[test]
    fn test_output_is_sorted_by_registration_key() {
        let registry = Registry::default();
        registry
            .register(owner("b"), RegistrationKey::new("b.css.rs", 0), rule(".b", "blue"))
            .unwrap();
        registry
            .register(owner("a1"), RegistrationKey::new("a.css.rs", 1), rule(".a1", "red"))
            .unwrap();
        registry
            .register(owner("a0"), RegistrationKey::new("a.css.rs", 0), rule(".a0", "red"))
            .unwrap();

        let css = registry.finalize();
        let a0 = css.find(".a0").unwrap();
        let a1 = css.find(".a1").unwrap();
        let b = css.find(".b").unwrap();
        assert!(a0 < a1 && a1 < b);
    }

    #[test]
    fn test_reset_discards_rules_and_vars() {
        let registry = Registry::default();
        registry.declare_var("--x");
        registry
            .register(owner("a"), RegistrationKey::new("a.css.rs", 0), rule(".a", "red"))
            .unwrap();

        registry.reset();
        assert!(registry.is_empty());
        assert!(!registry.contains_var("--x"));
        assert_eq!(registry.css(), "");
    }
}
