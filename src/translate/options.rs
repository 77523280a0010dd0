//! Translator configuration (the crate's sole configuration surface — see
//! `SPEC_FULL.md` §2a; there is no env/file loading here).

use crate::error::{Result, TranslateError};
use crate::keyword::KeywordTable;

/// Options controlling one call to [`crate::translate::translate`].
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    /// Fixed line terminator to emit, e.g. `b"\n"`, `b"\r\n"`. `None`
    /// disables EOL normalization entirely.
    pub eol_out: Option<Vec<u8>>,
    /// Suppress `inconsistent-eol` errors and translate each line
    /// terminator independently.
    pub repair: bool,
    /// Keyword table to substitute against. `None` or an empty table
    /// disables keyword translation.
    pub keywords: Option<KeywordTable>,
    /// Direction of keyword substitution: `true` expands, `false`
    /// contracts.
    pub expand: bool,
}

impl TranslateOptions {
    pub fn validate(&self) -> Result<()> {
        if self.eol_out.is_none() && self.keywords.is_none() {
            return Err(TranslateError::Precondition);
        }
        Ok(())
    }

    pub(crate) fn keywords_active(&self) -> Option<&KeywordTable> {
        self.keywords.as_ref().filter(|t| !t.is_empty())
    }
}
