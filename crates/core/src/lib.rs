//! Core domain types and script parsing for adding narration text boxes
//! to PowerPoint slides.

pub mod error;
pub mod script;
pub mod types;

pub use error::{Error, Result};
pub use script::{parse_script, render_script};
pub use types::{
    output_filename, ConversionOutput, ConversionRequest, PatchReport, ScriptBlock, ScriptMapping,
    SkipReason, DEFAULT_OUTPUT_SUFFIX,
};
