//! Script parsing.
//!
//! A script is plain text split into blocks by marker lines such as
//! `[SLIDE 3]`. The first line of a block is the slide title; the rest of
//! the block is the body text.

use crate::types::{ScriptBlock, ScriptMapping};
use regex::Regex;
use std::sync::LazyLock;

/// Regex matching a whole `[SLIDE N]` marker line (case-insensitive).
static SLIDE_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^[ \t]*\[slide[ \t]*(\d+)\][ \t]*$").unwrap());

/// A marker line that carries a usable slide number.
struct Marker {
    index: u32,
    line_start: usize,
    line_end: usize,
}

/// Parse raw script text into a mapping from slide number to title and body.
///
/// Never fails. Marker lines with a zero or out-of-range number are not
/// markers at all and stay in the text of the surrounding block. Text
/// before the first marker is ignored. A repeated slide number replaces
/// the earlier block.
pub fn parse_script(text: &str) -> ScriptMapping {
    let text = text.replace("\r\n", "\n");

    let markers: Vec<Marker> = SLIDE_MARKER_REGEX
        .captures_iter(&text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let index = caps[1].parse::<u32>().ok().filter(|&n| n > 0)?;
            Some(Marker {
                index,
                line_start: whole.start(),
                line_end: whole.end(),
            })
        })
        .collect();

    let mut mapping = ScriptMapping::new();

    for (i, marker) in markers.iter().enumerate() {
        let content_end = markers
            .get(i + 1)
            .map(|next| next.line_start)
            .unwrap_or(text.len());
        let content = &text[marker.line_end..content_end];

        if let Some(previous) = mapping.insert(split_block(marker.index, content)) {
            log::debug!("Slide {} appears more than once; keeping the later block", previous.index);
        }
    }

    log::debug!("Parsed {} slide blocks from script", mapping.len());
    mapping
}

/// Split block content into title (first line) and body (the rest).
fn split_block(index: u32, content: &str) -> ScriptBlock {
    let mut lines = content.trim().lines();
    let title = lines.next().unwrap_or_default().trim();
    let body = lines.collect::<Vec<_>>().join("\n");

    ScriptBlock::new(index, title, body.trim())
}

/// Render a mapping back into marker syntax, in ascending slide order.
///
/// Parsing the result yields the same mapping.
pub fn render_script(mapping: &ScriptMapping) -> String {
    mapping
        .iter()
        .map(|block| {
            let mut out = format!("[SLIDE {}]\n{}\n", block.index, block.title);
            if !block.body.is_empty() {
                out.push_str(&block.body);
                out.push('\n');
            }
            out
        })
        .collect::<Vec<_>>()
        .join("\n")
}
