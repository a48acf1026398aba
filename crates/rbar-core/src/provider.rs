//! Collaborator boundary.
//!
//! The kiosk core never talks to the network or the filesystem directly. It
//! holds `Arc<dyn ...>` handles to these traits so tests can script every
//! outcome and front ends can plug in whatever transport they have.

use async_trait::async_trait;
use bytes::Bytes;
use rbar_schemas::{OrderPayload, OrderReceipt};

use crate::error::{CatalogError, ReadError, SubmitError};
use crate::logo::{CatalogRef, LogoFile};

/// Remote order-acceptance service.
#[async_trait]
pub trait OrderEndpoint: Send + Sync {
    /// Human-readable name for logs (e.g. `"http"`).
    fn name(&self) -> &'static str;

    async fn submit_order(&self, payload: &OrderPayload) -> Result<OrderReceipt, SubmitError>;
}

/// Read-only logo gallery.
#[async_trait]
pub trait LogoCatalog: Send + Sync {
    /// Enumerate selectable references. Called once per session.
    async fn references(&self) -> Result<Vec<CatalogRef>, CatalogError>;

    /// Raw bytes behind a reference.
    async fn fetch(&self, reference: &CatalogRef) -> Result<Bytes, CatalogError>;
}

/// Decodes a logo file's bytes into markup text.
#[async_trait]
pub trait LogoReader: Send + Sync {
    async fn read_text(&self, file: &LogoFile) -> Result<String, ReadError>;
}

/// Strict UTF-8 decoding; invalid input is an error, never lossily replaced.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8LogoReader;

#[async_trait]
impl LogoReader for Utf8LogoReader {
    async fn read_text(&self, file: &LogoFile) -> Result<String, ReadError> {
        std::str::from_utf8(&file.bytes)
            .map(str::to_string)
            .map_err(|_| ReadError::Encoding {
                name: file.name.clone(),
            })
    }
}
