//! PPTX backend for adding script text boxes to slides.
//!
//! A .pptx file is a ZIP archive of XML parts. Each `[SLIDE N]` block of a
//! script becomes a text box appended to the shape tree of
//! `ppt/slides/slideN.xml`; every other member is copied through untouched.

pub mod convert;
pub mod escape;
pub mod insert;
pub mod patcher;
pub mod shape_id;
pub mod textbox;

pub use convert::{convert, is_zip_container};
pub use escape::escape_text;
pub use insert::{insert_fragment, try_insert_fragment};
pub use patcher::ArchivePatcher;
pub use shape_id::{next_shape_id, ShapeId};
pub use textbox::text_box_xml;
