//! Deterministic identifier generation.
//!
//! Identifiers are derived from the file that defines a style, a per-file
//! sequence number and, in debug mode, the binding name:
//!
//! ```text
//! button__1k3x9q20rmf4a0
//! ^^^^^^  ^^^^^^^^^^^^^^
//! |       |            ^ sequence (0-based, per file)
//! |       ^ base36 of the 64-bit hash of package + file path, 13 chars
//! ^ sanitized binding name
//! ```
//!
//! Nothing in an identifier depends on registry state, so rebuilding an
//! unchanged file always produces the same names.

use std::fmt;

use xxhash_rust::xxh3::xxh3_64;

use crate::config::{Config, IdentifierStyle};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
// Digits needed for u64::MAX in base36.
const HASH_WIDTH: usize = 13;

/// A generated name used as a class name or custom-property name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `.{identifier}`
    pub fn selector(&self) -> String {
        format!(".{}", self.0)
    }

    /// `--{identifier}`
    pub fn custom_property(&self) -> String {
        format!("--{}", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier allocation state for one definition file.
///
/// A scope is created each time a file is processed; its counters restart at
/// zero so the Nth allocation always receives the same suffix.
#[derive(Debug, Clone)]
pub struct FileScope {
    path: String,
    hash: String,
    style: IdentifierStyle,
    next_identifier: u64,
    next_registration: u64,
}

impl FileScope {
    pub fn new(path: impl Into<String>, config: &Config) -> Self {
        let path = path.into();
        let hash = file_hash(config.package.as_deref(), &path);
        Self {
            path,
            hash,
            style: config.identifiers,
            next_identifier: 0,
            next_registration: 0,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Allocates the next identifier of this file. `binding` is only used as
    /// a readable prefix in [`IdentifierStyle::Debug`] and may be empty.
    pub fn allocate(&mut self, binding: &str) -> Identifier {
        let sequence = self.next_identifier;
        self.next_identifier += 1;

        let mut raw = format!("{}{}", self.hash, sequence);
        if self.style == IdentifierStyle::Debug {
            let debug = sanitize(binding);
            if !debug.is_empty() {
                raw = format!("{debug}__{raw}");
            }
        }
        if raw.starts_with(|c: char| c.is_ascii_digit()) {
            raw.insert(0, '_');
        }
        Identifier::new(raw)
    }

    /// Position of the next registration made from this file. Registrations
    /// are ordered by `(path, sequence)` when the stylesheet is serialized.
    pub(crate) fn next_registration(&mut self) -> u64 {
        let sequence = self.next_registration;
        self.next_registration += 1;
        sequence
    }
}

fn file_hash(package: Option<&str>, path: &str) -> String {
    let mut key = String::with_capacity(path.len() + 16);
    if let Some(package) = package {
        key.push_str(package);
        key.push('/');
    }
    key.push_str(path);
    base36(xxh3_64(key.as_bytes()), HASH_WIDTH)
}

fn base36(mut value: u64, width: usize) -> String {
    let mut digits = Vec::with_capacity(width);
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    while digits.len() < width {
        digits.push(b'0');
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Keeps characters valid in a CSS identifier and replaces the rest with `_`.
fn sanitize(binding: &str) -> String {
    binding
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
