//! Fixed-field façade over [`KeywordTable`] for the five canonical
//! keywords callers most often want individually, rather than through the
//! generic name→value mapping.

use super::table::KeywordTable;

/// Rendered values for the canonical keywords, read back out of a
/// [`KeywordTable`]. `None` means that keyword's alias was never
/// requested when the table was built; a keyword that was requested but
/// whose input datum was absent still appears here as `Some(b"")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordValues {
    pub revision: Option<Vec<u8>>,
    pub date: Option<Vec<u8>>,
    pub author: Option<Vec<u8>>,
    pub url: Option<Vec<u8>>,
    pub id: Option<Vec<u8>>,
}

impl KeywordValues {
    pub fn from_table(table: &KeywordTable) -> Self {
        Self {
            revision: table.get(b"Revision").map(<[u8]>::to_vec),
            date: table.get(b"Date").map(<[u8]>::to_vec),
            author: table.get(b"Author").map(<[u8]>::to_vec),
            url: table.get(b"URL").map(<[u8]>::to_vec),
            id: table.get(b"Id").map(<[u8]>::to_vec),
        }
    }
}
