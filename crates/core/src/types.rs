//! Domain types for script blocks and conversion runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Suffix inserted before the extension of the generated presentation.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "-con-guion";

/// Title and body for one slide, taken from a `[SLIDE N]` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptBlock {
    /// 1-based slide number from the marker.
    pub index: u32,

    /// First non-blank line of the block.
    pub title: String,

    /// Remaining lines, joined with newlines and trimmed.
    pub body: String,
}

impl ScriptBlock {
    /// Create a new block for the given slide number.
    pub fn new(index: u32, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Archive member holding this block's slide markup.
    pub fn member_name(&self) -> String {
        format!("ppt/slides/slide{}.xml", self.index)
    }
}

/// Parsed script keyed by slide number.
///
/// Keys are unique: inserting a block for an index that is already present
/// replaces the earlier block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptMapping {
    blocks: BTreeMap<u32, ScriptBlock>,
}

impl ScriptMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a block, returning the one it replaced (if any).
    pub fn insert(&mut self, block: ScriptBlock) -> Option<ScriptBlock> {
        self.blocks.insert(block.index, block)
    }

    /// Look up the block for a slide number.
    pub fn get(&self, index: u32) -> Option<&ScriptBlock> {
        self.blocks.get(&index)
    }

    /// Number of distinct slides addressed by the script.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate blocks in ascending slide order.
    pub fn iter(&self) -> impl Iterator<Item = &ScriptBlock> {
        self.blocks.values()
    }

    /// Blocks sorted by slide number, for previews.
    pub fn sorted(&self) -> Vec<&ScriptBlock> {
        self.iter().collect()
    }
}

impl FromIterator<ScriptBlock> for ScriptMapping {
    fn from_iter<I: IntoIterator<Item = ScriptBlock>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for block in iter {
            mapping.insert(block);
        }
        mapping
    }
}

/// Why a slide addressed by the script was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The archive has no `ppt/slides/slideN.xml` member for this number.
    MissingMember,
    /// The slide markup has no `</p:spTree>` closing tag.
    NoInsertionPoint,
    /// The slide member is not valid UTF-8 text.
    NotUtf8,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::MissingMember => "slide not found in presentation",
            Self::NoInsertionPoint => "slide has no shape tree",
            Self::NotUtf8 => "slide markup is not UTF-8",
        };
        f.write_str(reason)
    }
}

/// Per-slide outcome of one patch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchReport {
    /// Slide numbers that received a text box, ascending.
    pub patched: Vec<u32>,

    /// Slide numbers that were skipped, with the reason.
    pub skipped: Vec<(u32, SkipReason)>,
}

impl PatchReport {
    pub fn record_patched(&mut self, index: u32) {
        self.patched.push(index);
    }

    pub fn record_skipped(&mut self, index: u32, reason: SkipReason) {
        self.skipped.push((index, reason));
    }
}

/// Everything the UI layer hands to a conversion run.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// User-chosen file name of the source presentation.
    pub filename: String,

    /// Raw script text with `[SLIDE N]` markers.
    pub script: String,

    /// Bytes of the source `.pptx` archive.
    pub archive: Vec<u8>,
}

impl ConversionRequest {
    pub fn new(filename: impl Into<String>, script: impl Into<String>, archive: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            script: script.into(),
            archive,
        }
    }
}

/// Result of a successful conversion run.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// Suggested name for the generated presentation.
    pub filename: String,

    /// Bytes of the patched archive.
    pub archive: Vec<u8>,

    /// Which slides were patched or skipped.
    pub report: PatchReport,
}

/// Derive the output file name by inserting `suffix` before the `.pptx` extension.
///
/// Names without a `.pptx` extension get `suffix` and the extension appended.
pub fn output_filename(filename: &str, suffix: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if ext.eq_ignore_ascii_case("pptx") => {
            format!("{}{}.{}", stem, suffix, ext)
        }
        _ => format!("{}{}.pptx", filename, suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_same_index() {
        let mut mapping = ScriptMapping::new();
        assert!(mapping.insert(ScriptBlock::new(1, "A", "x")).is_none());
        let previous = mapping.insert(ScriptBlock::new(1, "B", "y"));

        assert_eq!(previous, Some(ScriptBlock::new(1, "A", "x")));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get(1), Some(&ScriptBlock::new(1, "B", "y")));
    }

    #[test]
    fn test_sorted_by_numeric_index() {
        let mapping: ScriptMapping = vec![
            ScriptBlock::new(10, "ten", ""),
            ScriptBlock::new(2, "two", ""),
            ScriptBlock::new(1, "one", ""),
        ]
        .into_iter()
        .collect();

        let order: Vec<u32> = mapping.sorted().iter().map(|b| b.index).collect();
        assert_eq!(order, vec![1, 2, 10]);
    }

    #[test]
    fn test_member_name() {
        assert_eq!(
            ScriptBlock::new(7, "", "").member_name(),
            "ppt/slides/slide7.xml"
        );
    }

    #[test]
    fn test_output_filename() {
        assert_eq!(
            output_filename("deck.pptx", DEFAULT_OUTPUT_SUFFIX),
            "deck-con-guion.pptx"
        );
        assert_eq!(output_filename("Deck.PPTX", "-x"), "Deck-x.PPTX");
        assert_eq!(output_filename("my.talk.pptx", "-x"), "my.talk-x.pptx");
        assert_eq!(output_filename("deck", "-x"), "deck-x.pptx");
        assert_eq!(output_filename("deck.key", "-x"), "deck.key-x.pptx");
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(
            SkipReason::MissingMember.to_string(),
            "slide not found in presentation"
        );
    }
}
