//! Archive patching: adds one text box per script block to a .pptx archive.

use crate::insert::try_insert_fragment;
use crate::shape_id::next_shape_id;
use crate::textbox::text_box_xml;
use script_core::{Error, PatchReport, Result, ScriptBlock, ScriptMapping, SkipReason};
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek, Write};
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Writes script blocks into the slides of a PPTX archive.
pub struct ArchivePatcher;

impl ArchivePatcher {
    /// Create a new archive patcher.
    pub fn new() -> Self {
        Self
    }

    /// Patch `source` with a text box for every block in `mapping`.
    ///
    /// Slides missing from the archive, and slides without a shape tree, are
    /// skipped and recorded in the report. Only an unreadable container is an
    /// error, in which case no bytes are returned. Members that are not
    /// rewritten are copied without recompression.
    pub fn patch(&self, source: &[u8], mapping: &ScriptMapping) -> Result<(Vec<u8>, PatchReport)> {
        let mut archive = ZipArchive::new(Cursor::new(source))
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let mut report = PatchReport::default();
        let mut rewritten: HashMap<String, String> = HashMap::new();

        for block in mapping.iter() {
            match self.patch_slide(&mut archive, block)? {
                Ok((member, xml)) => {
                    log::debug!("Added text box to slide {}", block.index);
                    rewritten.insert(member, xml);
                    report.record_patched(block.index);
                }
                Err(reason) => {
                    log::warn!("Skipping slide {}: {}", block.index, reason);
                    report.record_skipped(block.index, reason);
                }
            }
        }

        let bytes = self.write_archive(&mut archive, &rewritten)?;
        Ok((bytes, report))
    }

    /// Produce the new markup for one slide, or the reason it was skipped.
    fn patch_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        block: &ScriptBlock,
    ) -> Result<std::result::Result<(String, String), SkipReason>> {
        let member = block.member_name();

        let Some(bytes) = self.read_member(archive, &member)? else {
            return Ok(Err(SkipReason::MissingMember));
        };
        let Ok(xml) = String::from_utf8(bytes) else {
            return Ok(Err(SkipReason::NotUtf8));
        };

        let id = next_shape_id(&xml);
        let fragment = text_box_xml(id, &block.title, &block.body);

        Ok(match try_insert_fragment(&xml, &fragment) {
            Some(patched) => Ok((member, patched)),
            None => Err(SkipReason::NoInsertionPoint),
        })
    }

    /// Read a member's bytes, or `None` if the archive has no such member.
    fn read_member<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<Option<Vec<u8>>> {
        let mut file = match archive.by_name(path) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => {
                return Err(Error::ZipError(format!(
                    "Failed to open '{}': {}",
                    path, e
                )))
            }
        };

        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(Some(content))
    }

    /// Write every member of `archive` to a new ZIP, substituting `rewritten` contents.
    fn write_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        rewritten: &HashMap<String, String>,
    ) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let comment = archive.comment();
        if !comment.is_empty() {
            writer.set_comment(String::from_utf8_lossy(comment).into_owned());
        }

        for i in 0..archive.len() {
            let file = archive
                .by_index_raw(i)
                .map_err(|e| Error::ZipError(format!("Failed to read entry {}: {}", i, e)))?;
            let name = file.name().to_string();

            match rewritten.get(&name) {
                Some(xml) => {
                    let method = match file.compression() {
                        CompressionMethod::Stored => CompressionMethod::Stored,
                        _ => CompressionMethod::Deflated,
                    };
                    let mut options = FileOptions::default()
                        .compression_method(method)
                        .last_modified_time(file.last_modified());
                    if let Some(mode) = file.unix_mode() {
                        options = options.unix_permissions(mode);
                    }
                    drop(file);

                    writer
                        .start_file(name.as_str(), options)
                        .map_err(|e| Error::ZipError(format!("Failed to write '{}': {}", name, e)))?;
                    writer
                        .write_all(xml.as_bytes())
                        .map_err(|e| Error::ZipError(format!("Failed to write '{}': {}", name, e)))?;
                }
                None => {
                    writer
                        .raw_copy_file(file)
                        .map_err(|e| Error::ZipError(format!("Failed to copy '{}': {}", name, e)))?;
                }
            }
        }

        let cursor = writer
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish ZIP: {}", e)))?;
        Ok(cursor.into_inner())
    }
}

impl Default for ArchivePatcher {
    fn default() -> Self {
        Self::new()
    }
}
