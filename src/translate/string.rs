//! In-memory `cstring → cstring` wrappers over the streaming engine
//! (component I).

use std::io::Cursor;

use crate::encoding::{Encoding, Utf8};
use crate::error::Result;

use super::options::TranslateOptions;
use super::stream::translate;

/// Translate `src` in memory, reusing the streaming engine.
///
/// When `opts` disables both transformations (no `eol_out`, no active
/// keyword table), a fast path returns `src` unchanged without invoking
/// the engine — so this function never raises the `precondition` error
/// that [`translate`] would for the same options.
pub fn translate_cstring(src: &[u8], opts: &TranslateOptions) -> Result<Vec<u8>> {
    if opts.eol_out.is_none() && opts.keywords_active().is_none() {
        return Ok(src.to_vec());
    }
    let mut out = Vec::with_capacity(src.len());
    let mut cursor = Cursor::new(src);
    translate(&mut cursor, &mut out, opts)?;
    Ok(out)
}

/// Transcode `value` from `encoding` (or assume it is already canonical
/// UTF-8 when `encoding` is `None`) into the canonical encoding, then
/// normalize every EOL to `\n`. No keyword translation is performed.
pub fn translate_string_to_canonical(value: &[u8], encoding: Option<&dyn Encoding>) -> Result<String> {
    let text = match encoding {
        Some(encoding) => encoding.decode(value)?,
        None => Utf8.decode(value)?,
    };
    Ok(normalize_eol(&text, "\n"))
}

/// The inverse of [`translate_string_to_canonical`]: normalize to the
/// platform EOL, then optionally transcode to a display encoding with a
/// lossy fallback.
pub fn detranslate_string(value: &str, for_output: bool, encoding: Option<&dyn Encoding>) -> Result<Vec<u8>> {
    let platform_eol = if cfg!(windows) { "\r\n" } else { "\n" };
    let text = normalize_eol(value, platform_eol);

    let Some(encoding) = encoding else {
        return Ok(text.into_bytes());
    };

    match encoding.encode(&text, for_output) {
        Ok(bytes) => Ok(bytes),
        Err(err) if for_output => {
            tracing::debug!(error = %err, "falling back to fuzzy encoding");
            Ok(fuzzy_bytes(&text))
        }
        Err(err) => Err(err),
    }
}

/// Rewrite every LF, CR, or CRLF occurrence in `text` to `eol`.
fn normalize_eol(text: &str, eol: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str(eol);
            }
            '\n' => out.push_str(eol),
            other => out.push(other),
        }
    }
    out
}

/// Best-effort lossy transcode: every non-ASCII byte becomes `?`.
fn fuzzy_bytes(text: &str) -> Vec<u8> {
    text.chars().map(|c| if c.is_ascii() { c as u8 } else { b'?' }).collect()
}
