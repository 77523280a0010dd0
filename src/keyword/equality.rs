//! Keyword equality (component H): change-detection comparisons between two
//! keyword tables.

use super::table::KeywordTable;

/// Compare the *structure* (and optionally the values) of two keyword
/// tables for change-detection. A missing/empty table is equal to another
/// missing/empty table.
pub fn differ_struct(a: Option<&KeywordTable>, b: Option<&KeywordTable>, compare_values: bool) -> bool {
    match (normalize(a), normalize(b)) {
        (None, None) => false,
        (Some(_), None) | (None, Some(_)) => true,
        (Some(a), Some(b)) => differ_map(a, b, compare_values),
    }
}

/// Same comparison, but both tables are known to be present.
pub fn differ_map(a: &KeywordTable, b: &KeywordTable, compare_values: bool) -> bool {
    let present_a = a.present_logical_keys();
    let present_b = b.present_logical_keys();
    if present_a != present_b {
        return true;
    }
    if !compare_values {
        return false;
    }
    for logical in LOGICAL_PROBE_ALIASES {
        let va = a.get(logical.as_bytes());
        let vb = b.get(logical.as_bytes());
        if va != vb {
            return true;
        }
    }
    false
}

fn normalize(table: Option<&KeywordTable>) -> Option<&KeywordTable> {
    table.filter(|t| !t.is_empty())
}

/// One alias per logical keyword, used purely to read a representative
/// value back out for comparison.
const LOGICAL_PROBE_ALIASES: [&str; 5] = ["Revision", "Date", "Author", "URL", "Id"];
