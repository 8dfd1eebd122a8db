//! Request/response entry point used by the CLI and WASM front ends.

use crate::patcher::ArchivePatcher;
use script_core::{
    output_filename, parse_script, ConversionOutput, ConversionRequest, Error, Result,
};

/// ZIP local file header magic (`PK\x03\x04`).
const ZIP_LOCAL_HEADER_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// ZIP end of central directory magic (`PK\x05\x06`), the first bytes of an empty archive.
const ZIP_EMPTY_ARCHIVE_MAGIC: [u8; 4] = [0x50, 0x4B, 0x05, 0x06];

/// Whether `bytes` starts like a ZIP container (as .pptx files do).
///
/// Only a cheap format check; whether the container is actually readable is
/// decided when the archive is opened.
pub fn is_zip_container(bytes: &[u8]) -> bool {
    bytes.starts_with(&ZIP_LOCAL_HEADER_MAGIC) || bytes.starts_with(&ZIP_EMPTY_ARCHIVE_MAGIC)
}

/// Run one conversion: parse the script and patch the archive.
///
/// Refusing a script with no slide blocks (`NoSlideContent`) is a rule of
/// this entry point only, so a run is never started without content;
/// [`ArchivePatcher::patch`] itself accepts an empty mapping. Otherwise fails
/// only when the archive cannot be read. The output name is the request's
/// file name with `suffix` inserted before the extension.
pub fn convert(request: &ConversionRequest, suffix: &str) -> Result<ConversionOutput> {
    let mapping = parse_script(&request.script);
    if mapping.is_empty() {
        return Err(Error::NoSlideContent);
    }

    if !is_zip_container(&request.archive) {
        return Err(Error::UnsupportedFormat(format!(
            "'{}' is not a .pptx (ZIP) file",
            request.filename
        )));
    }

    log::debug!(
        "Converting '{}' with {} slide blocks",
        request.filename,
        mapping.len()
    );

    let (archive, report) = ArchivePatcher::new().patch(&request.archive, &mapping)?;

    Ok(ConversionOutput {
        filename: output_filename(&request.filename, suffix),
        archive,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patcher::tests::{build_archive, read_archive};
    use script_core::{SkipReason, DEFAULT_OUTPUT_SUFFIX};

    #[test]
    fn test_convert_patches_and_names_output() {
        let archive = build_archive(&[
            ("ppt/slides/slide1.xml", "<p:spTree></p:spTree>"),
            ("ppt/slides/slide2.xml", "<p:spTree></p:spTree>"),
        ]);
        let request = ConversionRequest::new(
            "charla.pptx",
            "[SLIDE 2]\nDos\ncuerpo\n[SLIDE 5]\nCinco",
            archive,
        );

        let output = convert(&request, DEFAULT_OUTPUT_SUFFIX).unwrap();

        assert_eq!(output.filename, "charla-con-guion.pptx");
        assert_eq!(output.report.patched, vec![2]);
        assert_eq!(output.report.skipped, vec![(5, SkipReason::MissingMember)]);

        let members = read_archive(&output.archive);
        let slide2 = String::from_utf8(members[1].1.clone()).unwrap();
        assert!(slide2.contains("<a:t>Dos</a:t>"));
        assert_eq!(members[0].1, b"<p:spTree></p:spTree>".to_vec());
    }

    #[test]
    fn test_convert_rejects_empty_script() {
        let archive = build_archive(&[("ppt/slides/slide1.xml", "<p:spTree></p:spTree>")]);
        let request = ConversionRequest::new("deck.pptx", "no markers here", archive);

        assert!(matches!(
            convert(&request, DEFAULT_OUTPUT_SUFFIX),
            Err(Error::NoSlideContent)
        ));
    }

    #[test]
    fn test_convert_rejects_non_zip() {
        let request = ConversionRequest::new("deck.pptx", "[SLIDE 1]\nA", b"plain text".to_vec());

        assert!(matches!(
            convert(&request, DEFAULT_OUTPUT_SUFFIX),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_truncated_zip_is_fatal() {
        let mut archive = build_archive(&[("ppt/slides/slide1.xml", "<p:spTree></p:spTree>")]);
        archive.truncate(archive.len() / 2);
        let request = ConversionRequest::new("deck.pptx", "[SLIDE 1]\nA", archive);

        assert!(matches!(
            convert(&request, DEFAULT_OUTPUT_SUFFIX),
            Err(Error::ZipError(_))
        ));
    }

    #[test]
    fn test_convert_accepts_empty_archive() {
        let archive = build_archive(&[]);
        assert!(archive.starts_with(b"PK\x05\x06"));
        let request = ConversionRequest::new("empty.pptx", "[SLIDE 1]\nA", archive);

        let output = convert(&request, DEFAULT_OUTPUT_SUFFIX).unwrap();

        assert!(output.report.patched.is_empty());
        assert_eq!(output.report.skipped, vec![(1, SkipReason::MissingMember)]);
        assert!(read_archive(&output.archive).is_empty());
    }

    #[test]
    fn test_is_zip_container() {
        assert!(is_zip_container(&[0x50, 0x4B, 0x03, 0x04, 0x00]));
        assert!(is_zip_container(&[0x50, 0x4B, 0x05, 0x06, 0x00]));
        assert!(!is_zip_container(&[0xD0, 0xCF, 0x11, 0xE0]));
        assert!(!is_zip_container(b"PK"));
    }
}
