//! Escaping of user text for XML text nodes.

use quick_xml::escape::escape;
use std::borrow::Cow;

/// Escape `&`, `<`, `>`, `"` and `'` as named character references.
///
/// All other characters, including non-ASCII text, pass through unchanged.
/// Borrows the input when nothing needs escaping.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    escape(text)
}
