//! The `Encoding` hook referenced by the string-level wrappers in
//! [`crate::translate::string`]. Everything beyond UTF-8 is a host
//! concern — see `SPEC_FULL.md` §4.I and §1's localization non-goal.

use crate::error::{Result, TranslateError};

/// A text encoding capable of transcoding to and from this crate's
/// canonical encoding (UTF-8).
pub trait Encoding {
    /// Decode `bytes` (in this encoding) into canonical UTF-8 text.
    fn decode(&self, bytes: &[u8]) -> Result<String>;

    /// Encode `text` (canonical UTF-8) into this encoding's bytes. When
    /// `fuzzy` is set, unencodable code points are replaced with `?`
    /// instead of producing an error.
    fn encode(&self, text: &str, fuzzy: bool) -> Result<Vec<u8>>;
}

/// The crate's canonical encoding, and the only one built in.
pub struct Utf8;

impl Encoding for Utf8 {
    fn decode(&self, bytes: &[u8]) -> Result<String> {
        match String::from_utf8(bytes.to_vec()) {
            Ok(s) => Ok(s),
            Err(e) => Err(TranslateError::InvalidEncoding(e.to_string())),
        }
    }

    fn encode(&self, text: &str, _fuzzy: bool) -> Result<Vec<u8>> {
        // UTF-8 -> UTF-8: every `str` is already valid, so there is never
        // an unencodable code point and the fuzzy flag has no effect.
        Ok(text.as_bytes().to_vec())
    }
}
