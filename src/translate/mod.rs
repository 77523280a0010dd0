//! Streaming translation engine and its in-memory convenience wrappers.

mod options;
mod stream;
mod string;

pub use options::TranslateOptions;
pub use stream::translate;
pub use string::{detranslate_string, translate_cstring, translate_string_to_canonical};
