//! Splicing shape fragments into a slide's shape tree.

/// Closing tag of the slide's shape tree.
pub const SHAPE_TREE_END: &str = "</p:spTree>";

/// Insert `fragment` immediately before the last `</p:spTree>` in `xml`.
///
/// Returns `None` when the markup has no shape tree closing tag.
pub fn try_insert_fragment(xml: &str, fragment: &str) -> Option<String> {
    let at = xml.rfind(SHAPE_TREE_END)?;

    let mut out = String::with_capacity(xml.len() + fragment.len());
    out.push_str(&xml[..at]);
    out.push_str(fragment);
    out.push_str(&xml[at..]);
    Some(out)
}

/// Insert `fragment` before the last `</p:spTree>`, or return `xml` unchanged
/// when there is no insertion point.
pub fn insert_fragment(xml: &str, fragment: &str) -> String {
    try_insert_fragment(xml, fragment).unwrap_or_else(|| xml.to_string())
}
