//! Submission workflow and the kiosk state machine.
//!
//! # Phases
//!
//! ```text
//!            Submit                  logo+text present
//!   Idle ───────────► Validating ─────────────────────► Submitting
//!    ▲                    │ missing logo or text            │ read + remote call
//!    │                    ▼                                 ▼
//!    └──── AckExpire ── Acknowledging ◄─────────────────────┘
//!          (full draft reset)
//! ```
//!
//! Every user or timer event is one [`Action`] applied through
//! [`Kiosk::handle`]. Actions are processed one at a time; the async steps of
//! a submit are awaited inside the handler, so nothing else observes the
//! draft mid-submit.
//!
//! `Submit` is refused while `Submitting` or `Acknowledging`. Drop-zone
//! notices use the same feedback channel but do not enter `Acknowledging`.
//! Every feedback expiry resets the draft; with `reset_after_notice` off, a
//! notice expiry only hides the message.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rbar_schemas::{Drink, OrderPayload};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::draft::OrderDraft;
use crate::error::TransitionError;
use crate::feedback::{AckTicket, Feedback, FeedbackChannel, Severity};
use crate::logo::{self, CatalogRef, DropEvent, LogoFile, LogoSource};
use crate::provider::{LogoCatalog, LogoReader, OrderEndpoint};
use crate::view::KioskView;

pub const MSG_DROP_ACCEPTED: &str = "SVG file selected";
pub const MSG_DROP_REJECTED: &str = "Please upload a valid SVG file.";
pub const MSG_INCOMPLETE: &str = "Please upload an SVG file and enter text to place the order.";
pub const MSG_ORDER_PLACED: &str = "Order placed successfully!";
pub const MSG_READ_FAILED: &str = "Error reading SVG file";
pub const MSG_ORDER_FAILED: &str = "Error placing order";

// ---------------------------------------------------------------------------
// Phase / Action
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Composing.
    Idle,
    /// Checking logo and text.
    Validating,
    /// Reading the logo and waiting on the remote call.
    Submitting,
    /// Outcome on screen; the draft resets when it expires.
    Acknowledging,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Validating => "validating",
            Phase::Submitting => "submitting",
            Phase::Acknowledging => "acknowledging",
        }
    }

    fn blocks_submit(&self) -> bool {
        matches!(self, Phase::Submitting | Phase::Acknowledging)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectDrink(Drink),
    SelectLogoCatalog(CatalogRef),
    SelectLogoFile(LogoFile),
    DropLogo(DropEvent),
    ChangeText(String),
    Submit,
    AckExpire(AckTicket),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SelectDrink(_) => "select_drink",
            Action::SelectLogoCatalog(_) => "select_logo_catalog",
            Action::SelectLogoFile(_) => "select_logo_file",
            Action::DropLogo(_) => "drop_logo",
            Action::ChangeText(_) => "change_text",
            Action::Submit => "submit",
            Action::AckExpire(_) => "ack_expire",
        }
    }
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct KioskDeps {
    pub endpoint: Arc<dyn OrderEndpoint>,
    pub catalog: Arc<dyn LogoCatalog>,
    pub reader: Arc<dyn LogoReader>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KioskOptions {
    /// How long feedback stays up.
    pub ack_window: Duration,
    /// Reset the draft when a drop notice expires, as well as after an order
    /// attempt. On by default; turning it off keeps a dropped file across the
    /// notice.
    pub reset_after_notice: bool,
    /// Apply the drop-path type check to picked files.
    pub picker_requires_svg: bool,
    /// Show catalog failures to the user instead of only logging them.
    pub report_catalog_failures: bool,
}

impl Default for KioskOptions {
    fn default() -> Self {
        Self {
            ack_window: Duration::from_secs(1),
            reset_after_notice: true,
            picker_requires_svg: false,
            report_catalog_failures: false,
        }
    }
}

/// Bookkeeping for the most recent submit that got past validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAttempt {
    pub attempt_id: Uuid,
    pub started_at_utc: DateTime<Utc>,
    /// `None` while the attempt is in flight.
    pub outcome: Option<Severity>,
}

// ---------------------------------------------------------------------------
// Kiosk
// ---------------------------------------------------------------------------

pub struct Kiosk {
    deps: KioskDeps,
    options: KioskOptions,
    draft: OrderDraft,
    feedback: FeedbackChannel,
    phase: Phase,
    gallery: Vec<CatalogRef>,
    last_attempt: Option<OrderAttempt>,
}

impl Kiosk {
    /// Build a kiosk with an empty draft.
    ///
    /// The returned receiver yields timer-driven actions (feedback expiry);
    /// the driver must feed them back through [`Kiosk::handle`].
    pub fn new(deps: KioskDeps, options: KioskOptions) -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let feedback = FeedbackChannel::new(options.ack_window, tx);
        let kiosk = Self {
            deps,
            options,
            draft: OrderDraft::new(),
            feedback,
            phase: Phase::Idle,
            gallery: Vec::new(),
            last_attempt: None,
        };
        (kiosk, rx)
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn feedback(&self) -> &Feedback {
        self.feedback.current()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn gallery(&self) -> &[CatalogRef] {
        &self.gallery
    }

    pub fn last_attempt(&self) -> Option<&OrderAttempt> {
        self.last_attempt.as_ref()
    }

    pub fn options(&self) -> &KioskOptions {
        &self.options
    }

    pub fn view(&self) -> KioskView {
        KioskView::project(self)
    }

    /// Enumerate the catalog. Meant to run once at session start; a failure
    /// leaves the gallery empty.
    pub async fn load_catalog(&mut self) {
        match self.deps.catalog.references().await {
            Ok(refs) => {
                info!(count = refs.len(), "catalog loaded");
                self.gallery = refs;
            }
            Err(e) => {
                error!(error = %e, "catalog listing failed");
                self.gallery.clear();
                if self.options.report_catalog_failures {
                    self.notice(format!("Could not load logos: {e}"), Severity::Error);
                }
            }
        }
    }

    /// Apply one action.
    ///
    /// # Errors
    /// [`TransitionError`] when `Submit` arrives while an attempt is in flight
    /// or being acknowledged. Every other failure is reported through the
    /// feedback channel and returns `Ok`.
    pub async fn handle(&mut self, action: Action) -> Result<(), TransitionError> {
        debug!(action = action.name(), phase = self.phase.as_str(), "handle");
        match action {
            Action::SelectDrink(drink) => {
                self.draft.select_drink(drink);
                info!(drink = %drink, "drink selected");
            }
            Action::SelectLogoCatalog(reference) => self.select_catalog(reference).await,
            Action::SelectLogoFile(file) => self.select_file(file),
            Action::DropLogo(event) => self.drop_logo(event),
            Action::ChangeText(text) => self.draft.set_text(text),
            Action::Submit => return self.submit().await,
            Action::AckExpire(ticket) => self.ack_expire(ticket),
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Logo entry points
    // -----------------------------------------------------------------------

    async fn select_catalog(&mut self, reference: CatalogRef) {
        match logo::resolve_catalog(self.deps.catalog.as_ref(), &reference).await {
            Ok(file) => {
                info!(reference = %reference, bytes = file.bytes.len(), "catalog logo selected");
                self.draft.set_logo(LogoSource::Catalog { reference, file });
            }
            Err(e) => {
                // Draft stays as it was.
                error!(reference = %reference, error = %e, "catalog logo fetch failed");
                if self.options.report_catalog_failures {
                    self.notice(
                        format!("Could not load logo {reference}: {e}"),
                        Severity::Error,
                    );
                }
            }
        }
    }

    fn select_file(&mut self, file: LogoFile) {
        if self.options.picker_requires_svg {
            match logo::screen_media_type(file) {
                Ok(file) => self.accept_upload(file),
                Err(rejection) => {
                    warn!(%rejection, "picked file rejected");
                    self.draft.clear_logo();
                    self.notice(MSG_DROP_REJECTED, Severity::Error);
                }
            }
            return;
        }
        self.accept_upload(file);
    }

    fn drop_logo(&mut self, event: DropEvent) {
        match logo::screen_drop(event) {
            Ok(file) => {
                self.accept_upload(file);
                self.notice(MSG_DROP_ACCEPTED, Severity::Success);
            }
            Err(rejection) => {
                warn!(%rejection, "dropped file rejected");
                self.draft.clear_logo();
                self.notice(MSG_DROP_REJECTED, Severity::Error);
            }
        }
    }

    fn accept_upload(&mut self, file: LogoFile) {
        info!(name = %file.name, media_type = %file.media_type, "user logo selected");
        self.draft.set_logo(LogoSource::Upload(file));
    }

    // -----------------------------------------------------------------------
    // Submit
    // -----------------------------------------------------------------------

    async fn submit(&mut self) -> Result<(), TransitionError> {
        if self.phase.blocks_submit() {
            warn!(phase = self.phase.as_str(), "submit refused");
            return Err(TransitionError {
                phase: self.phase,
                action: "submit",
            });
        }

        self.phase = Phase::Validating;
        let Some(snapshot) = self.draft.snapshot() else {
            warn!(
                has_logo = !self.draft.logo().is_none(),
                has_text = !self.draft.text().is_empty(),
                "submit rejected: draft incomplete"
            );
            self.acknowledge(MSG_INCOMPLETE, Severity::Error);
            return Ok(());
        };

        self.phase = Phase::Submitting;
        let attempt_id = Uuid::new_v4();
        self.last_attempt = Some(OrderAttempt {
            attempt_id,
            started_at_utc: Utc::now(),
            outcome: None,
        });
        info!(%attempt_id, drink = ?snapshot.drink, logo = %snapshot.logo.name, "submitting order");

        let svg = match logo::extract_content(self.deps.reader.as_ref(), &snapshot.logo).await {
            Ok(svg) => svg,
            Err(e) => {
                error!(%attempt_id, error = %e, "logo read failed");
                self.acknowledge(format!("{MSG_READ_FAILED}: {e}"), Severity::Error);
                return Ok(());
            }
        };

        let payload = OrderPayload {
            svg,
            text: snapshot.text,
            drink: snapshot.drink,
        };

        match self.deps.endpoint.submit_order(&payload).await {
            Ok(receipt) => {
                info!(
                    %attempt_id,
                    endpoint = self.deps.endpoint.name(),
                    message = receipt.message.as_deref().unwrap_or(""),
                    "order accepted"
                );
                self.acknowledge(MSG_ORDER_PLACED, Severity::Success);
            }
            Err(e) => {
                error!(%attempt_id, endpoint = self.deps.endpoint.name(), error = %e, "order failed");
                self.acknowledge(format!("{MSG_ORDER_FAILED}: {e}"), Severity::Error);
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Feedback
    // -----------------------------------------------------------------------

    /// Outcome of a submit: enter `Acknowledging`, reset when it expires.
    fn acknowledge(&mut self, message: impl Into<String>, severity: Severity) {
        if let Some(attempt) = self.last_attempt.as_mut() {
            if attempt.outcome.is_none() && self.phase == Phase::Submitting {
                attempt.outcome = Some(severity);
            }
        }
        self.phase = Phase::Acknowledging;
        self.feedback.show(message, severity);
    }

    /// Transient message outside the submit lifecycle. Does not change phase.
    fn notice(&mut self, message: impl Into<String>, severity: Severity) {
        self.feedback.show(message, severity);
    }

    fn ack_expire(&mut self, ticket: AckTicket) {
        if !self.feedback.expire(ticket) {
            debug!(ticket = ticket.value(), "stale feedback expiry ignored");
            return;
        }

        if self.phase == Phase::Acknowledging || self.options.reset_after_notice {
            self.draft.reset();
            info!("draft reset");
        }
        self.phase = Phase::Idle;
    }
}
