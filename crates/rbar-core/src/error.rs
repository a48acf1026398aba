//! Error types crossing the collaborator seams.
//!
//! None of these are fatal: the workflow converts every one of them into
//! feedback state. Only [`TransitionError`] is returned to the caller of
//! [`crate::Kiosk::handle`].

use crate::workflow::Phase;

/// Catalog listing or fetch failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown catalog reference '{0}'")]
    UnknownReference(String),

    #[error("fetch failed for '{reference}': {reason}")]
    Fetch { reference: String, reason: String },

    #[error("catalog listing failed: {0}")]
    Listing(String),
}

/// Failure turning a logo file's bytes into markup text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("'{name}' is not valid UTF-8 text")]
    Encoding { name: String },

    #[error("{0}")]
    Io(String),
}

/// Remote order submission failure.
///
/// The `Display` form is appended verbatim to the user-facing error message,
/// so it carries the underlying reason and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Network, timeout, or decode failure before a status was seen.
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("status {status}: {reason}")]
    Rejected { status: u16, reason: String },
}

/// An action that is not legal in the current phase.
///
/// Today this is only `Submit` while an attempt is in flight or being
/// acknowledged. The draft and feedback are untouched when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{action} refused while {phase:?}")]
pub struct TransitionError {
    pub phase: Phase,
    pub action: &'static str,
}
