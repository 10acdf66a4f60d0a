//! Paginating letter sink backed by lopdf.
//!
//! [`LetterSink`] accepts composed blocks and writes an A4 PDF through any
//! `Write` target. Text is set in the non-embedded `HeiseiMin-W3` CID face
//! with the predefined `UniJIS-UCS2-HW-H` CMap, so Japanese letter content
//! renders without shipping font data.

mod config;
mod sink;
mod text;

pub use config::PageConfig;
pub use sink::LetterSink;
pub use text::{text_width, wrap_text};
