//! Streaming translator (component E): drives the keyword rewriter and EOL
//! normalizer over an arbitrarily long byte stream in one pass.

use std::io::{Read, Write};

use crate::eol::{Eol, EolState};
use crate::error::Result;
use crate::keyword::{rewrite, KeywordTable, MAX_TOKEN_LEN};

use super::options::TranslateOptions;

/// Chunk size used when pulling from `src`. Large enough to amortize
/// syscall overhead, small enough to keep memory use predictable.
const CHUNK: usize = 16 * 1024;

/// Translate `src` into `dst` according to `opts`, in a single pass.
///
/// See `SPEC_FULL.md` §4.E for the full state machine this implements.
pub fn translate<R: Read, W: Write>(src: &mut R, dst: &mut W, opts: &TranslateOptions) -> Result<()> {
    opts.validate()?;

    let mut engine = Engine::new(opts);
    let mut buf = [0u8; CHUNK];
    loop {
        let n = src.read(&mut buf)?;
        if n == 0 {
            break;
        }
        engine.feed(&buf[..n], dst)?;
    }
    engine.finish(dst)
}

struct Engine<'a> {
    keywords: Option<&'a KeywordTable>,
    expand: bool,
    eol_out: Option<&'a [u8]>,
    repair: bool,
    eol_state: EolState,
    kw_buf: Vec<u8>,
    in_keyword: bool,
    pending_cr: bool,
}

impl<'a> Engine<'a> {
    fn new(opts: &'a TranslateOptions) -> Self {
        Self {
            keywords: opts.keywords_active(),
            expand: opts.expand,
            eol_out: opts.eol_out.as_deref(),
            repair: opts.repair,
            eol_state: EolState::new(),
            kw_buf: Vec::with_capacity(MAX_TOKEN_LEN),
            in_keyword: false,
            pending_cr: false,
        }
    }

    fn feed<W: Write>(&mut self, chunk: &[u8], dst: &mut W) -> Result<()> {
        let mut i = 0;
        while i < chunk.len() {
            let b = chunk[i];

            if self.pending_cr {
                self.pending_cr = false;
                if b == b'\n' {
                    self.emit_eol(Eol::CrLf, dst)?;
                    i += 1;
                    continue;
                }
                self.emit_eol(Eol::Cr, dst)?;
                // Fall through: re-dispatch `b` below, same index.
            }

            if self.in_keyword {
                i = self.feed_in_keyword(chunk, i, dst)?;
                continue;
            }

            match b {
                b'$' if self.keywords.is_some() => {
                    self.in_keyword = true;
                    self.kw_buf.clear();
                    self.kw_buf.push(b'$');
                    i += 1;
                }
                b'\r' if self.eol_out.is_some() => {
                    self.pending_cr = true;
                    i += 1;
                }
                b'\n' if self.eol_out.is_some() => {
                    self.emit_eol(Eol::Lf, dst)?;
                    i += 1;
                }
                _ => {
                    let end = self.scan_run(chunk, i);
                    dst.write_all(&chunk[i..end])?;
                    i = end;
                }
            }
        }
        Ok(())
    }

    /// Handle one byte while `in_keyword` is set. Returns the index to
    /// resume scanning from (either `i + 1`, or `i` unchanged when the
    /// current byte must be re-dispatched in scanning mode).
    fn feed_in_keyword<W: Write>(&mut self, chunk: &[u8], i: usize, dst: &mut W) -> Result<usize> {
        let b = chunk[i];
        match b {
            b'$' => {
                self.kw_buf.push(b'$');
                let table = self.keywords.expect("in_keyword implies a keyword table");
                if rewrite(&mut self.kw_buf, table, self.expand) {
                    dst.write_all(&self.kw_buf)?;
                    self.in_keyword = false;
                    self.kw_buf.clear();
                    Ok(i + 1)
                } else {
                    // Buffer is untouched by a failed rewrite; its last
                    // byte is the `$` we just pushed. Flush everything
                    // before it raw, then let this same `$` reopen a
                    // fresh candidate from scanning.
                    let raw_len = self.kw_buf.len() - 1;
                    dst.write_all(&self.kw_buf[..raw_len])?;
                    self.kw_buf.clear();
                    self.in_keyword = false;
                    Ok(i)
                }
            }
            b'\r' | b'\n' => {
                dst.write_all(&self.kw_buf)?;
                self.kw_buf.clear();
                self.in_keyword = false;
                Ok(i) // re-dispatch in scanning
            }
            _ => {
                if self.kw_buf.len() == MAX_TOKEN_LEN - 1 {
                    dst.write_all(&self.kw_buf)?;
                    self.kw_buf.clear();
                    self.in_keyword = false;
                    Ok(i) // re-dispatch in scanning
                } else {
                    self.kw_buf.push(b);
                    Ok(i + 1)
                }
            }
        }
    }

    fn emit_eol<W: Write>(&mut self, kind: Eol, dst: &mut W) -> Result<()> {
        let Some(eol_out) = self.eol_out else {
            return Ok(());
        };
        self.eol_state.observe(kind, self.repair)?;
        Ok(dst.write_all(eol_out)?)
    }

    /// Find the end of a run of bytes uninteresting under the current
    /// options, starting at `start` (which must itself be uninteresting).
    fn scan_run(&self, chunk: &[u8], start: usize) -> usize {
        let want_dollar = self.keywords.is_some();
        let want_eol = self.eol_out.is_some();
        match chunk[start..].iter().position(|&c| {
            (want_dollar && c == b'$') || (want_eol && (c == b'\r' || c == b'\n'))
        }) {
            Some(offset) => start + offset,
            None => chunk.len(),
        }
    }

    fn finish<W: Write>(&mut self, dst: &mut W) -> Result<()> {
        if self.pending_cr {
            self.pending_cr = false;
            self.emit_eol(Eol::Cr, dst)?;
        }
        if self.in_keyword {
            dst.write_all(&self.kw_buf)?;
            self.kw_buf.clear();
            self.in_keyword = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::RevisionMetadata;
    use std::io::Cursor;

    fn run(input: &[u8], opts: &TranslateOptions) -> Vec<u8> {
        let mut out = Vec::new();
        let mut src = Cursor::new(input);
        translate(&mut src, &mut out, opts).unwrap();
        out
    }

    fn run_chunked(input: &[u8], chunk: usize, opts: &TranslateOptions) -> Vec<u8> {
        let mut out = Vec::new();
        let mut engine = Engine::new(opts);
        for piece in input.chunks(chunk) {
            engine.feed(piece, &mut out).unwrap();
        }
        engine.finish(&mut out).unwrap();
        out
    }

    #[test]
    fn s1_lf_to_crlf_no_repair() {
        let opts = TranslateOptions {
            eol_out: Some(b"\r\n".to_vec()),
            ..Default::default()
        };
        assert_eq!(run(b"a\nb\nc", &opts), b"a\r\nb\r\nc");

        let err = run_err(b"a\nb\r\nc", &opts);
        assert!(matches!(err, crate::error::TranslateError::InconsistentEol { .. }));
    }

    fn run_err(input: &[u8], opts: &TranslateOptions) -> crate::error::TranslateError {
        let mut out = Vec::new();
        let mut src = Cursor::new(input);
        translate(&mut src, &mut out, opts).unwrap_err()
    }

    #[test]
    fn s2_keyword_expand_and_contract_roundtrip() {
        let table = KeywordTable::build(
            "Rev",
            &RevisionMetadata {
                revision: Some(42),
                ..Default::default()
            },
        );
        let expand_opts = TranslateOptions {
            keywords: Some(table.clone()),
            expand: true,
            ..Default::default()
        };
        let expanded = run(b"Rev: $Rev$ done", &expand_opts);
        assert_eq!(expanded, b"Rev: $Rev: 42 $ done");

        let contract_opts = TranslateOptions {
            keywords: Some(table),
            expand: false,
            ..Default::default()
        };
        let contracted = run(&expanded, &contract_opts);
        assert_eq!(contracted, b"Rev: $Rev$ done");
    }

    #[test]
    fn s3_fixed_width_expand_and_truncate() {
        let table = KeywordTable::build(
            "Author",
            &RevisionMetadata {
                author: Some("alice"),
                ..Default::default()
            },
        );
        let opts = TranslateOptions {
            keywords: Some(table),
            expand: true,
            ..Default::default()
        };
        let out = run(b"$Author::           $", &opts);
        assert_eq!(out.len(), "$Author::           $".len());
        assert!(out.ends_with(b" $"));

        let table_long = KeywordTable::build(
            "Author",
            &RevisionMetadata {
                author: Some("a-very-long-name-indeed"),
                ..Default::default()
            },
        );
        let opts_long = TranslateOptions {
            keywords: Some(table_long),
            expand: true,
            ..Default::default()
        };
        let out = run(b"$Author::           $", &opts_long);
        assert_eq!(out.len(), "$Author::           $".len());
        assert_eq!(out[out.len() - 2], b'#');
    }

    #[test]
    fn s4_token_spanning_chunks() {
        let table = KeywordTable::build(
            "Revision",
            &RevisionMetadata {
                revision: Some(7),
                ..Default::default()
            },
        );
        let opts = TranslateOptions {
            keywords: Some(table),
            expand: true,
            ..Default::default()
        };
        let out = run_chunked(b"pre$Revision$ post", 7, &opts);
        assert_eq!(out, b"pre$Revision: 7 $ post");
    }

    #[test]
    fn s5_unknown_keyword_passes_through() {
        let opts = TranslateOptions {
            keywords: Some(KeywordTable::new()),
            expand: true,
            ..Default::default()
        };
        assert_eq!(run(b"$Foo$", &opts), b"$Foo$");
    }

    #[test]
    fn repair_never_errors() {
        let opts = TranslateOptions {
            eol_out: Some(b"\n".to_vec()),
            repair: true,
            ..Default::default()
        };
        // Mixed CR/LF/CRLF input; with repair=true this must not error.
        assert_eq!(run(b"a\nb\r\nc\rd", &opts), b"a\nb\nc\nd");
    }

    #[test]
    fn byte_conservation_with_no_transforms_requested() {
        // eol_out/keywords both absent is a precondition violation, so this
        // exercises the "only keywords requested, nothing matches" case
        // instead, which conserves every byte outside (nonexistent) tokens.
        let opts = TranslateOptions {
            keywords: Some(KeywordTable::new()),
            expand: true,
            ..Default::default()
        };
        let input = b"plain text with\nno tokens and embedded \0 nul bytes";
        assert_eq!(run(input, &opts), input);
    }

    #[test]
    fn eol_idempotence() {
        let opts = TranslateOptions {
            eol_out: Some(b"\n".to_vec()),
            repair: true,
            ..Default::default()
        };
        let once = run(b"a\r\nb\rc\n", &opts);
        let twice = run(&once, &opts);
        assert_eq!(once, twice);
    }

    #[test]
    fn precondition_violation_without_eol_or_keywords() {
        let opts = TranslateOptions::default();
        let mut out = Vec::new();
        let mut src = Cursor::new(b"anything".as_slice());
        let err = translate(&mut src, &mut out, &opts).unwrap_err();
        assert!(matches!(err, crate::error::TranslateError::Precondition));
    }

    #[test]
    fn lone_trailing_cr_at_eof_emits_cr() {
        let opts = TranslateOptions {
            eol_out: Some(b"\n".to_vec()),
            ..Default::default()
        };
        assert_eq!(run(b"abc\r", &opts), b"abc\n");
    }

    #[test]
    fn unterminated_keyword_at_eof_is_flushed_raw() {
        let opts = TranslateOptions {
            keywords: Some(KeywordTable::new()),
            expand: true,
            ..Default::default()
        };
        assert_eq!(run(b"text $open forever", &opts), b"text $open forever");
    }
}
