//! Core rendering abstractions for letter documents.
//!
//! This crate provides the seam between the document composer and the
//! paginating backends:
//! - [`DocumentSink`] trait for the open/add/close write contract
//! - [`RenderError`] for I/O and structural failures
//! - table geometry validation shared by all sinks
//! - [`RecordingSink`], a capture-only sink for tests

mod error;
mod recording;
mod sink;

pub use error::RenderError;
pub use recording::RecordingSink;
pub use sink::{DocumentSink, validate_table};
