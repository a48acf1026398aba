//! rbar-testkit
//!
//! Scripted collaborators and a small harness for driving a [`Kiosk`]
//! through whole scenarios. No network, no filesystem, no real clock: tests
//! run under `#[tokio::test(start_paused = true)]` and the ack window elapses
//! instantly when the runtime is idle.

pub mod fakes;

pub use fakes::{FailingReader, MemoryCatalog, ScriptedEndpoint};

use std::sync::Arc;
use std::time::Duration;

use rbar_core::{
    Action, Kiosk, KioskDeps, KioskOptions, LogoReader, TransitionError, Utf8LogoReader,
};
use tokio::sync::mpsc;

/// A kiosk wired to in-memory fakes, plus the handles to inspect them.
pub struct KioskHarness {
    pub kiosk: Kiosk,
    pub endpoint: Arc<ScriptedEndpoint>,
    pub catalog: Arc<MemoryCatalog>,
    timers: mpsc::UnboundedReceiver<Action>,
}

impl KioskHarness {
    pub fn new(catalog: MemoryCatalog) -> Self {
        Self::with(catalog, Arc::new(Utf8LogoReader), KioskOptions::default())
    }

    pub fn with(
        catalog: MemoryCatalog,
        reader: Arc<dyn LogoReader>,
        options: KioskOptions,
    ) -> Self {
        let endpoint = Arc::new(ScriptedEndpoint::new());
        let catalog = Arc::new(catalog);
        let (kiosk, timers) = Kiosk::new(
            KioskDeps {
                endpoint: endpoint.clone(),
                catalog: catalog.clone(),
                reader,
            },
            options,
        );
        Self {
            kiosk,
            endpoint,
            catalog,
            timers,
        }
    }

    pub async fn act(&mut self, action: Action) -> Result<(), TransitionError> {
        self.kiosk.handle(action).await
    }

    /// Wait for the next timer-driven action and apply it. Returns how much
    /// (virtual) time passed.
    ///
    /// # Panics
    /// If no feedback is on screen: no timer is armed and the wait would
    /// never end.
    pub async fn run_next_timer(&mut self) -> Duration {
        if !self.kiosk.feedback().visible {
            panic!("no feedback on screen, so no dismissal timer is armed");
        }
        let started = tokio::time::Instant::now();
        let action = self
            .timers
            .recv()
            .await
            .unwrap_or_else(|| panic!("timer channel closed"));
        let waited = started.elapsed();
        if let Err(e) = self.kiosk.handle(action).await {
            panic!("timer action refused: {e}");
        }
        waited
    }

    /// Panics if a timer action is already sitting in the queue.
    pub fn assert_no_queued_timer(&mut self) {
        if let Ok(action) = self.timers.try_recv() {
            panic!("unexpected queued timer action: {action:?}");
        }
    }
}
