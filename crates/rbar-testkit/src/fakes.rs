//! In-memory collaborators with scripted outcomes.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use bytes::Bytes;
use rbar_core::{
    CatalogError, CatalogRef, LogoCatalog, LogoFile, LogoReader, OrderEndpoint, ReadError,
    SubmitError,
};
use rbar_schemas::{OrderPayload, OrderReceipt};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ---------------------------------------------------------------------------
// ScriptedEndpoint
// ---------------------------------------------------------------------------

/// Order endpoint that answers from a script and records every payload.
/// An empty script answers success.
#[derive(Debug, Default)]
pub struct ScriptedEndpoint {
    script: Mutex<VecDeque<Result<OrderReceipt, SubmitError>>>,
    received: Mutex<Vec<OrderPayload>>,
}

impl ScriptedEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, message: &str) {
        lock(&self.script).push_back(Ok(OrderReceipt {
            message: Some(message.to_string()),
        }));
    }

    pub fn push_err(&self, err: SubmitError) {
        lock(&self.script).push_back(Err(err));
    }

    pub fn received(&self) -> Vec<OrderPayload> {
        lock(&self.received).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.received).len()
    }
}

#[async_trait]
impl OrderEndpoint for ScriptedEndpoint {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn submit_order(&self, payload: &OrderPayload) -> Result<OrderReceipt, SubmitError> {
        lock(&self.received).push(payload.clone());
        lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| Ok(OrderReceipt::default()))
    }
}

// ---------------------------------------------------------------------------
// MemoryCatalog
// ---------------------------------------------------------------------------

/// Catalog backed by a map. Individual references (or the listing) can be
/// made to fail.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    entries: BTreeMap<CatalogRef, Bytes>,
    failing: BTreeSet<CatalogRef>,
    listing_fails: bool,
    fetches: AtomicUsize,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, reference: &str, bytes: impl Into<Bytes>) -> Self {
        self.entries.insert(CatalogRef::new(reference), bytes.into());
        self
    }

    /// Listed, but every fetch fails.
    pub fn with_failing(mut self, reference: &str) -> Self {
        let r = CatalogRef::new(reference);
        self.entries.insert(r.clone(), Bytes::new());
        self.failing.insert(r);
        self
    }

    pub fn with_listing_failure(mut self) -> Self {
        self.listing_fails = true;
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogoCatalog for MemoryCatalog {
    async fn references(&self) -> Result<Vec<CatalogRef>, CatalogError> {
        if self.listing_fails {
            return Err(CatalogError::Listing("gallery unavailable".to_string()));
        }
        Ok(self.entries.keys().cloned().collect())
    }

    async fn fetch(&self, reference: &CatalogRef) -> Result<Bytes, CatalogError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(reference) {
            return Err(CatalogError::Fetch {
                reference: reference.to_string(),
                reason: "connection reset".to_string(),
            });
        }
        self.entries
            .get(reference)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownReference(reference.to_string()))
    }
}

// ---------------------------------------------------------------------------
// FailingReader
// ---------------------------------------------------------------------------

/// Reader that fails every read with the given reason.
#[derive(Debug, Clone)]
pub struct FailingReader(pub String);

#[async_trait]
impl LogoReader for FailingReader {
    async fn read_text(&self, _file: &LogoFile) -> Result<String, ReadError> {
        Err(ReadError::Io(self.0.clone()))
    }
}
