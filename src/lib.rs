//! # refletter
//!
//! Composes clinical referral letters into paginated PDF documents.
//!
//! The pipeline is a single forward pass: a fully populated
//! [`model::ReferralRecord`] goes into the [`LetterComposer`], which
//! resolves the output path, maps the record onto an ordered sequence of
//! typeset blocks (title, parties, patient identity table, clinical
//! table), and drives them through a [`render_core::DocumentSink`]. The
//! shipped sink writes A4 PDF pages via lopdf; tests swap in a recording
//! sink to assert on the block sequence itself.
//!
//! Locale strings and settings are explicit values handed to the
//! composer; there is no global state, and each render uses its own
//! composer and sink instance.

pub mod composer;
pub mod error;
pub mod locale;
pub mod path;
pub mod settings;

// Re-export foundation crates
pub use refletter_idf as idf;
pub use refletter_model as model;
pub use refletter_render_core as render_core;
pub use refletter_render_lopdf as render_lopdf;

pub use composer::{EXT_PDF, LetterComposer, LetterMetrics};
pub use error::ComposeError;
pub use locale::{CatalogError, MessageCatalog, REQUIRED_KEYS, date_string, keys};
pub use path::document_path;
pub use settings::{LetterSettings, TITLE_SUFFIX_NONE};
