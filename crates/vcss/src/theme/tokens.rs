use crate::value::Value;

/// One entry of a [`Tokens`] tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Value(Value),
    /// Declared without a value. Only meaningful for
    /// [`create_theme_vars`](crate::StyleFile::create_theme_vars).
    Unset,
    Group(Tokens),
}

/// A nested, ordered map of theme tokens.
///
/// Used both to declare the shape of a contract and to supply the values of
/// a theme:
///
/// ```rust
/// use vcss::Tokens;
///
/// let tokens = Tokens::new()
///     .group("color", Tokens::new().value("brand", "#0a7").value("text", "#222"))
///     .value("radius", "4px");
///
/// let paths: Vec<_> = tokens.leaves().into_iter().map(|(path, _)| path).collect();
/// assert_eq!(paths, ["color.brand", "color.text", "radius"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tokens {
    entries: Vec<(String, Token)>,
}

impl Tokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set a valued leaf.
    pub fn value(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key.into(), Token::Value(value.into()))
    }

    /// Builder method to declare a leaf without a value.
    pub fn unset(self, key: impl Into<String>) -> Self {
        self.insert(key.into(), Token::Unset)
    }

    /// Builder method to add a nested group.
    pub fn group(self, key: impl Into<String>, tokens: Tokens) -> Self {
        self.insert(key.into(), Token::Group(tokens))
    }

    /// Re-setting a key replaces its token in place.
    fn insert(mut self, key: String, token: Token) -> Self {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = token;
        } else {
            self.entries.push((key, token));
        }
        self
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Token)> {
        self.entries.iter().map(|(key, token)| (key.as_str(), token))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every leaf with its dotted path, in insertion order. Unset leaves have
    /// no value.
    pub fn leaves(&self) -> Vec<(String, Option<&Value>)> {
        self.segment_leaves()
            .into_iter()
            .map(|(path, value)| (path.join("."), value))
            .collect()
    }

    /// Every leaf with its path as separate keys, so a key that itself
    /// contains `.` never matches a nested group.
    pub(crate) fn segment_leaves(&self) -> Vec<(Vec<String>, Option<&Value>)> {
        let mut out = Vec::new();
        self.collect_leaves(&mut Vec::new(), &mut out);
        out
    }

    fn collect_leaves<'a>(
        &'a self,
        prefix: &mut Vec<String>,
        out: &mut Vec<(Vec<String>, Option<&'a Value>)>,
    ) {
        for (key, token) in &self.entries {
            prefix.push(key.clone());
            match token {
                Token::Value(value) => out.push((prefix.clone(), Some(value))),
                Token::Unset => out.push((prefix.clone(), None)),
                Token::Group(group) => group.collect_leaves(prefix, out),
            }
            prefix.pop();
        }
    }
}
