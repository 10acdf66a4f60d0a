//! Composer-level failure kinds.

use refletter_render_core::RenderError;
use thiserror::Error;

/// What a failed composition looks like to the caller.
///
/// Two kinds only: the destination could not be written, or the sink
/// rejected the composed content. The underlying cause is logged at the
/// conversion point rather than carried in the variant.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ComposeError {
    #[error("failed to write the referral letter")]
    Io,
    #[error("the document sink rejected the referral letter content")]
    Structural,
}

impl From<RenderError> for ComposeError {
    fn from(err: RenderError) -> Self {
        log::warn!("letter rendering failed: {err}");
        match err {
            RenderError::Io(_) => ComposeError::Io,
            _ => ComposeError::Structural,
        }
    }
}

impl From<std::io::Error> for ComposeError {
    fn from(err: std::io::Error) -> Self {
        log::warn!("letter output failed: {err}");
        ComposeError::Io
    }
}
