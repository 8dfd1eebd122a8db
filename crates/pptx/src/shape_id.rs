//! Shape identifier allocation.

use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

/// Regex matching any numeric `id="N"` attribute.
///
/// Matches every such attribute, not only those on shape elements, so the
/// maximum is an upper bound over all ids in the part.
static ID_ATTRIBUTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"id="(\d+)""#).unwrap());

/// Identifier of a shape within one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(u32);

impl ShapeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Number used in the shape's display name.
    ///
    /// Authored files name a shape with id `n` as "... n-1", so generated
    /// shapes follow the same numbering.
    pub fn name_number(self) -> u32 {
        self.0.saturating_sub(1)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Return an identifier that no numeric `id` attribute in `xml` uses.
///
/// Normally this is one more than the largest id, or 1 when the markup has
/// no numeric ids. When the largest id leaves no room in the `u32` range,
/// the smallest unused id is returned instead.
pub fn next_shape_id(xml: &str) -> ShapeId {
    let ids: BTreeSet<u64> = ID_ATTRIBUTE_REGEX
        .captures_iter(xml)
        .filter_map(|caps| caps[1].parse::<u64>().ok())
        .collect();

    let max_id = ids.last().copied().unwrap_or(0);
    if max_id < u64::from(u32::MAX) {
        return ShapeId((max_id + 1) as u32);
    }

    log::warn!(
        "Slide uses shape id {}; allocating the lowest free id instead",
        max_id
    );
    let free = (1..=u32::MAX)
        .find(|id| !ids.contains(&u64::from(*id)))
        .unwrap_or(0);
    ShapeId(free)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_after_maximum() {
        assert_eq!(next_shape_id(r#"<a id="5"/><b id="12"/>"#).get(), 13);
        assert_eq!(next_shape_id(r#"<b id="12"/><a id="5"/>"#).get(), 13);
    }

    #[test]
    fn test_no_ids() {
        assert_eq!(next_shape_id("").get(), 1);
        assert_eq!(next_shape_id("<p:spTree></p:spTree>").get(), 1);
    }

    #[test]
    fn test_ignores_non_numeric_ids() {
        let xml = r#"<p:cNvPr id="3" name="Title 2"/><a:hlinkClick r:id="rId4"/><x id=""/>"#;
        assert_eq!(next_shape_id(xml).get(), 4);
    }

    #[test]
    fn test_counts_any_id_attribute() {
        let xml = r#"<p:cNvPr id="2"/><p:cNvGrpSpPr/><a:ext uri="{X}"><p14:creationId val="1" id="40"/></a:ext>"#;
        assert_eq!(next_shape_id(xml).get(), 41);
    }

    #[test]
    fn test_largest_u32_id_is_not_reused() {
        let xml = r#"<p:cNvPr id="4294967295" name="x"/>"#;
        let next = next_shape_id(xml);

        assert_ne!(next.get(), u32::MAX);
        assert_eq!(next.get(), 1);
    }

    #[test]
    fn test_full_range_takes_lowest_free_id() {
        let xml = r#"<a id="1"/><b id="2"/><c id="4"/><d id="4294967295"/>"#;
        assert_eq!(next_shape_id(xml).get(), 3);
    }

    #[test]
    fn test_ids_beyond_u32_use_lowest_free_id() {
        let xml = r#"<a id="99999999999"/><b id="1"/><c id="7"/>"#;
        assert_eq!(next_shape_id(xml).get(), 2);
    }

    #[test]
    fn test_id_just_below_limit() {
        let xml = r#"<a id="4294967294"/>"#;
        assert_eq!(next_shape_id(xml).get(), u32::MAX);
    }

    #[test]
    fn test_name_number() {
        assert_eq!(ShapeId::new(4).name_number(), 3);
        assert_eq!(ShapeId::new(1).name_number(), 0);
        assert_eq!(ShapeId::new(0).name_number(), 0);
    }
}
