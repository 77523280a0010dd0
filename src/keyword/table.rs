//! Keyword table (component B): maps every recognized alias of a logical
//! keyword to the same rendered value.

use rustc_hash::FxHashMap;

use super::value::{render, RevisionMetadata, ID_FORMAT};

/// The five logical keywords this crate recognizes, and the format used to
/// render each one's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Logical {
    Revision,
    Date,
    Author,
    Url,
    Id,
}

impl Logical {
    fn format(self) -> &'static str {
        match self {
            Logical::Revision => "%r",
            Logical::Date => "%d",
            Logical::Author => "%a",
            Logical::Url => "%u",
            Logical::Id => ID_FORMAT,
        }
    }

    /// Every alias this logical keyword is recognized under, paired with
    /// whether the match is case-sensitive.
    fn aliases(self) -> &'static [(&'static str, bool)] {
        match self {
            Logical::Revision => &[("Revision", true), ("LastChangedRevision", true), ("Rev", false)],
            Logical::Date => &[("Date", true), ("LastChangedDate", false)],
            Logical::Author => &[("Author", true), ("LastChangedBy", false)],
            Logical::Url => &[("HeadURL", true), ("URL", false)],
            Logical::Id => &[("Id", false)],
        }
    }

    const ALL: [Logical; 5] = [
        Logical::Revision,
        Logical::Date,
        Logical::Author,
        Logical::Url,
        Logical::Id,
    ];

    /// Resolve a token from a `svn:keywords`-style spec string to the
    /// logical keyword it names, if any.
    fn match_token(token: &str) -> Option<Logical> {
        for logical in Self::ALL {
            for (alias, case_sensitive) in logical.aliases() {
                let matches = if *case_sensitive {
                    token == *alias
                } else {
                    token.eq_ignore_ascii_case(alias)
                };
                if matches {
                    return Some(logical);
                }
            }
        }
        None
    }
}

/// A mapping from every recognized alias name to its rendered value.
///
/// Multiple aliases of the same logical keyword always carry the same
/// value — the table stores one entry per alias, not per logical keyword,
/// so lookup during rewriting stays a single hash access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTable {
    entries: FxHashMap<String, Vec<u8>>,
}

impl KeywordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &[u8]) -> Option<&[u8]> {
        let name = std::str::from_utf8(name).ok()?;
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Present logical keys, used by [`crate::keyword::equality`].
    pub(crate) fn present_logical_keys(&self) -> [bool; 5] {
        let mut present = [false; 5];
        for (i, logical) in Logical::ALL.iter().enumerate() {
            present[i] = logical
                .aliases()
                .iter()
                .any(|(alias, _)| self.entries.contains_key(*alias));
        }
        present
    }

    fn insert_logical(&mut self, logical: Logical, value: Vec<u8>) {
        for (alias, _) in logical.aliases() {
            self.entries.insert((*alias).to_string(), value.clone());
        }
    }

    /// Build a table from a whitespace-separated `svn:keywords`-style spec
    /// string, e.g. `"Id Rev Date"`. Unrecognized tokens are silently
    /// ignored; each logical keyword present is rendered once and shared
    /// across all of its aliases.
    pub fn build(spec: &str, meta: &RevisionMetadata<'_>) -> Self {
        let mut table = Self::new();
        let mut seen = std::collections::HashSet::new();

        for token in spec.split(is_keyword_whitespace).filter(|t| !t.is_empty()) {
            let Some(logical) = Logical::match_token(token) else {
                continue;
            };
            if !seen.insert(logical) {
                continue;
            }
            let value = render(logical.format(), meta).into_bytes();
            table.insert_logical(logical, value);
        }

        table
    }
}

/// ASCII whitespace set used to split a keywords spec string: space, tab,
/// vertical tab, newline, backspace, carriage return, form-feed.
fn is_keyword_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0b' | '\n' | '\x08' | '\r' | '\x0c')
}
