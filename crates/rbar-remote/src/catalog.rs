//! Gallery served as static files.

use async_trait::async_trait;
use bytes::Bytes;
use rbar_core::{CatalogError, CatalogRef, LogoCatalog};

use crate::{describe_transport, join_url};

/// Static server resources. HTTP cannot enumerate a directory, so the
/// reference list is fixed at construction; only listed references can be
/// fetched.
#[derive(Debug, Clone)]
pub struct HttpLogoCatalog {
    http: reqwest::Client,
    base_url: String,
    references: Vec<CatalogRef>,
}

impl HttpLogoCatalog {
    pub fn new(base_url: impl Into<String>, references: Vec<CatalogRef>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            references,
        }
    }
}

#[async_trait]
impl LogoCatalog for HttpLogoCatalog {
    async fn references(&self) -> Result<Vec<CatalogRef>, CatalogError> {
        Ok(self.references.clone())
    }

    async fn fetch(&self, reference: &CatalogRef) -> Result<Bytes, CatalogError> {
        if !self.references.contains(reference) {
            return Err(CatalogError::UnknownReference(reference.to_string()));
        }

        let fetch_err = |reason: String| CatalogError::Fetch {
            reference: reference.to_string(),
            reason,
        };

        let url = join_url(&self.base_url, reference.as_str());
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| fetch_err(describe_transport(&e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(fetch_err(format!("status {}", status.as_u16())));
        }

        resp.bytes()
            .await
            .map_err(|e| fetch_err(describe_transport(&e)))
    }
}
