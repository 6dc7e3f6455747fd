//! HTML escaping.

use std::borrow::Cow;

/// Escape text for an HTML text node or a quoted attribute value.
///
/// Every string interpolated into generated markup goes through here.
/// Returns `Cow::Borrowed` when nothing needs escaping.
pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}
