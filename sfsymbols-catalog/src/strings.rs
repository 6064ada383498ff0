//! Parser for `.strings` alias tables.
//!
//! Every non-blank line has the form `"key" = "value";` where both sides are
//! made of word characters and dots. Anything else is a hard error.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::resources::ResourceError;

static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^"([\w.]+)" = "([\w.]+)";$"#).expect("static pattern")
});

/// An ordered key/value table read from a `.strings` file.
///
/// Entries keep the position of the first occurrence of their key. A key that
/// appears again replaces the earlier value.
#[derive(Debug, Clone, Default)]
pub struct StringsTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl StringsTable {
    /// Parse the contents of a strings file. `origin` names the source in
    /// error messages and warnings.
    pub fn parse(text: &str, origin: &str) -> Result<Self, ResourceError> {
        let mut table = Self::default();

        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let caps = LINE_PATTERN
                .captures(line)
                .ok_or_else(|| ResourceError::MalformedLine {
                    path: origin.to_string(),
                    line: i + 1,
                    content: line.to_string(),
                })?;

            let key = &caps[1];
            let value = &caps[2];
            if table.insert(key, value).is_some() {
                log::warn!(
                    "Duplicate key '{}' at line {} in {}; using the later value '{}'",
                    key,
                    i + 1,
                    origin,
                    value,
                );
            }
        }

        Ok(table)
    }

    /// Insert or replace an entry, returning the previous value if any.
    fn insert(&mut self, key: &str, value: &str) -> Option<String> {
        match self.index.get(key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value.to_string())),
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), value.to_string()));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_in_order() {
        let text = "\"a.b\" = \"c.d\";\n\n  \"e\" = \"f\";  \n";
        let table = StringsTable::parse(text, "test.strings").unwrap();
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs, vec![("a.b", "c.d"), ("e", "f")]);
    }

    #[test]
    fn duplicate_key_keeps_position_and_takes_later_value() {
        let text = "\"a\" = \"one\";\n\"b\" = \"two\";\n\"a\" = \"three\";\n";
        let table = StringsTable::parse(text, "test.strings").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("a"), Some("three"));
        let keys: Vec<_> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn rejects_trailing_content() {
        let text = "\"a\" = \"b\"; // comment\n";
        let err = StringsTable::parse(text, "test.strings").unwrap_err();
        match err {
            ResourceError::MalformedLine { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other}"),
        }
    }
}
