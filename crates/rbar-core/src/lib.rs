//! rbar-core
//!
//! Order-composition state machine for the drink kiosk: a walk-up user picks a
//! drink, picks or uploads a vector logo, types a name, and submits the
//! composed order to a remote service.
//!
//! The crate owns the draft, the feedback channel and the submit lifecycle.
//! The remote endpoint, the logo catalog and file decoding are consumed through
//! the traits in [`provider`]; concrete HTTP implementations live in
//! `rbar-remote`, scripted fakes in `rbar-testkit`.

pub mod catalog;
pub mod draft;
pub mod error;
pub mod feedback;
pub mod logo;
pub mod presentation;
pub mod provider;
pub mod view;
pub mod workflow;

pub use catalog::{DirectoryCatalog, EmptyCatalog};
pub use draft::{DraftSnapshot, OrderDraft};
pub use error::{CatalogError, ReadError, SubmitError, TransitionError};
pub use feedback::{AckTicket, Feedback, Severity};
pub use logo::{CatalogRef, DropEvent, DropRejection, LogoFile, LogoSource};
pub use provider::{LogoCatalog, LogoReader, OrderEndpoint, Utf8LogoReader};
pub use view::KioskView;
pub use workflow::{Action, Kiosk, KioskDeps, KioskOptions, OrderAttempt, Phase};

pub use rbar_schemas::{Drink, OrderPayload, OrderReceipt, SVG_MEDIA_TYPE};
