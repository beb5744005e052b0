//! Form-pair encoding helpers enforcing the daemon's wire invariants.
//!
//! Invariants:
//! - optional fields are omitted entirely when unset; an empty value is a
//!   distinct, incorrect wire state from omission
//! - optional booleans serialize to the literal strings `true`/`false`
//! - hash lists join with `|`, name/source lists with newlines

/// Ordered form pairs for a request body or query string.
#[derive(Debug, Clone, Default)]
pub struct FormPairs {
    pairs: Vec<(String, String)>,
}

impl FormPairs {
    /// Empty pair set.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a required field.
    pub fn field(&mut self, name: &str, value: impl Into<String>) {
        self.pairs.push((name.to_string(), value.into()));
    }

    /// Append an optional field, omitting `None` and empty values.
    pub fn opt_field(&mut self, name: &str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            let value = value.into();
            if !value.is_empty() {
                self.pairs.push((name.to_string(), value));
            }
        }
    }

    /// Append an optional boolean as `true`/`false`, omitting `None`.
    pub fn flag(&mut self, name: &str, value: Option<bool>) {
        if let Some(value) = value {
            self.pairs.push((name.to_string(), bool_str(value).to_string()));
        }
    }

    /// Append an optional numeric field, omitting `None`.
    pub fn opt_number<T: ToString>(&mut self, name: &str, value: Option<T>) {
        if let Some(value) = value {
            self.pairs.push((name.to_string(), value.to_string()));
        }
    }

    /// Consume the builder into its ordered pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

/// Join torrent hashes with the daemon's `|` separator.
#[must_use]
pub fn join_hashes(hashes: &[String]) -> String {
    hashes.join("|")
}

/// Join multi-line list fields (category names, plugin names/sources) with
/// newlines.
#[must_use]
pub fn join_lines(items: &[String]) -> String {
    items.join("\n")
}

/// Literal wire form of a boolean flag.
#[must_use]
pub const fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_join_with_pipe() {
        let hashes = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(join_hashes(&hashes), "a|b|c");
    }

    #[test]
    fn single_hash_stays_unchanged() {
        assert_eq!(join_hashes(&["abc123".to_string()]), "abc123");
    }

    #[test]
    fn lists_join_with_newlines() {
        let names = vec!["movies".to_string(), "music".to_string()];
        assert_eq!(join_lines(&names), "movies\nmusic");
    }

    #[test]
    fn unset_optionals_are_omitted() {
        let mut pairs = FormPairs::new();
        pairs.field("urls", "magnet:?xt=urn:btih:abc");
        pairs.flag("paused", Some(true));
        pairs.flag("skip_checking", None);
        pairs.opt_field("category", None::<String>);
        pairs.opt_number("upLimit", None::<i64>);
        let encoded = pairs.into_pairs();
        assert_eq!(
            encoded,
            vec![
                ("urls".to_string(), "magnet:?xt=urn:btih:abc".to_string()),
                ("paused".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn empty_optional_values_are_filtered() {
        let mut pairs = FormPairs::new();
        pairs.opt_field("savepath", Some(String::new()));
        pairs.opt_field("rename", Some("show.mkv".to_string()));
        assert_eq!(
            pairs.into_pairs(),
            vec![("rename".to_string(), "show.mkv".to_string())]
        );
    }

    #[test]
    fn flags_use_literal_strings() {
        let mut pairs = FormPairs::new();
        pairs.flag("sequentialDownload", Some(false));
        assert_eq!(
            pairs.into_pairs(),
            vec![("sequentialDownload".to_string(), "false".to_string())]
        );
    }
}
