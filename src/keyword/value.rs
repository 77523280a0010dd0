//! Keyword value builder (component A): renders a `%`-format mini-language
//! into the byte string substituted into a keyword token.

use chrono::{DateTime, Utc};

/// Inputs available to [`render`]; any field may be absent ("tolerant"
/// inputs per the format table).
#[derive(Debug, Clone, Default)]
pub struct RevisionMetadata<'a> {
    pub revision: Option<u64>,
    pub url: Option<&'a str>,
    pub date: Option<DateTime<Utc>>,
    pub author: Option<&'a str>,
}

/// Render `fmt` against `meta`, expanding each `%<code>` escape.
///
/// Missing inputs render as empty strings rather than erroring — this is a
/// deliberate tolerance contract, not an omission.
pub fn render(fmt: &str, meta: &RevisionMetadata<'_>) -> String {
    let mut out = String::with_capacity(fmt.len());
    let mut chars = fmt.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => out.push('%'),
            Some('%') => out.push('%'),
            Some('a') => {
                if let Some(author) = meta.author {
                    out.push_str(author);
                }
            }
            Some('b') => {
                if let Some(url) = meta.url {
                    out.push_str(&base_name(url));
                }
            }
            Some('r') => {
                if let Some(rev) = meta.revision {
                    out.push_str(&rev.to_string());
                }
            }
            Some('u') => {
                if let Some(url) = meta.url {
                    out.push_str(url);
                }
            }
            Some('d') => {
                if let Some(date) = meta.date {
                    out.push_str(&short_date(date));
                }
            }
            Some('D') => {
                if let Some(date) = meta.date {
                    out.push_str(&long_date(date));
                }
            }
            Some(other) => {
                out.push('%');
                out.push(other);
            }
        }
    }

    out
}

/// The composite format used by the `Id` keyword.
pub const ID_FORMAT: &str = "%b %r %d %a";

fn base_name(url: &str) -> String {
    let last_segment = url.rsplit('/').next().unwrap_or("");
    urlencoding::decode(last_segment)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| last_segment.to_string())
}

fn short_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M:%SZ").to_string()
}

fn long_date(date: DateTime<Utc>) -> String {
    date.format("%a %b %d %H:%M:%S %Y +0000").to_string()
}
