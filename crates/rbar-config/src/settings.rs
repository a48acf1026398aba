//! Typed kiosk settings read out of the merged config document.
//!
//! Every key is optional; absent keys fall back to the defaults below.
//! A key that is present with the wrong type is an error.

use anyhow::{bail, Result};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";
pub const DEFAULT_ORDER_PATH: &str = "/createOrder";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_ACK_WINDOW_MS: u64 = 1_000;

/// Where the logo gallery comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// No gallery; only user files can be used.
    Disabled,
    /// `*.svg` files of a local directory.
    Directory(PathBuf),
    /// Static resources served over HTTP. The server cannot be enumerated, so
    /// the reference list is part of the config.
    Http {
        base_url: String,
        references: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KioskSettings {
    pub endpoint_base_url: String,
    pub order_path: String,
    pub request_timeout: Duration,
    pub catalog: CatalogSource,
    /// Surface background catalog failures as a notice instead of only logging them.
    pub report_catalog_failures: bool,
    /// How long feedback stays visible before it dismisses itself.
    pub ack_window: Duration,
    /// Reset the draft when a drop notice expires, not only after an order
    /// attempt. Defaults to on.
    pub reset_after_notice: bool,
    /// Apply the drop-path media-type check to the file picker as well.
    pub picker_requires_svg: bool,
}

impl Default for KioskSettings {
    fn default() -> Self {
        Self {
            endpoint_base_url: DEFAULT_BASE_URL.to_string(),
            order_path: DEFAULT_ORDER_PATH.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            catalog: CatalogSource::Disabled,
            report_catalog_failures: false,
            ack_window: Duration::from_millis(DEFAULT_ACK_WINDOW_MS),
            reset_after_notice: true,
            picker_requires_svg: false,
        }
    }
}

impl KioskSettings {
    pub fn from_config_json(v: &Value) -> Result<Self> {
        let d = Self::default();

        let catalog_dir = opt_str(v, "/catalog/dir")?;
        let catalog_url = opt_str(v, "/catalog/base_url")?;
        let references = opt_str_list(v, "/catalog/references")?;

        let catalog = match (catalog_dir, catalog_url) {
            (Some(_), Some(_)) => {
                bail!("CONFIG_INVALID: /catalog/dir and /catalog/base_url are mutually exclusive")
            }
            (Some(dir), None) => CatalogSource::Directory(PathBuf::from(dir)),
            (None, Some(base_url)) => CatalogSource::Http {
                base_url,
                references: references.unwrap_or_default(),
            },
            (None, None) => CatalogSource::Disabled,
        };

        let ack_ms = opt_u64(v, "/feedback/ack_window_ms")?.unwrap_or(DEFAULT_ACK_WINDOW_MS);
        if ack_ms == 0 {
            bail!("CONFIG_INVALID: /feedback/ack_window_ms must be > 0");
        }

        Ok(Self {
            endpoint_base_url: opt_str(v, "/endpoint/base_url")?.unwrap_or(d.endpoint_base_url),
            order_path: opt_str(v, "/endpoint/order_path")?.unwrap_or(d.order_path),
            request_timeout: opt_u64(v, "/endpoint/timeout_ms")?
                .map(Duration::from_millis)
                .unwrap_or(d.request_timeout),
            catalog,
            report_catalog_failures: opt_bool(v, "/catalog/report_fetch_failures")?
                .unwrap_or(d.report_catalog_failures),
            ack_window: Duration::from_millis(ack_ms),
            reset_after_notice: opt_bool(v, "/feedback/reset_after_notice")?
                .unwrap_or(d.reset_after_notice),
            picker_requires_svg: opt_bool(v, "/logo/picker_requires_svg")?
                .unwrap_or(d.picker_requires_svg),
        })
    }
}

fn opt_str(v: &Value, ptr: &str) -> Result<Option<String>> {
    match v.pointer(ptr) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => bail!("CONFIG_TYPE_MISMATCH: {} must be a string, got {}", ptr, other),
    }
}

fn opt_u64(v: &Value, ptr: &str) -> Result<Option<u64>> {
    match v.pointer(ptr) {
        None | Some(Value::Null) => Ok(None),
        Some(x) => match x.as_u64() {
            Some(n) => Ok(Some(n)),
            None => bail!(
                "CONFIG_TYPE_MISMATCH: {} must be a non-negative integer, got {}",
                ptr,
                x
            ),
        },
    }
}

fn opt_bool(v: &Value, ptr: &str) -> Result<Option<bool>> {
    match v.pointer(ptr) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => bail!("CONFIG_TYPE_MISMATCH: {} must be a bool, got {}", ptr, other),
    }
}

fn opt_str_list(v: &Value, ptr: &str) -> Result<Option<Vec<String>>> {
    match v.pointer(ptr) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item.as_str() {
                    Some(s) => out.push(s.to_string()),
                    None => bail!("CONFIG_TYPE_MISMATCH: {} must list strings, got {}", ptr, item),
                }
            }
            Ok(Some(out))
        }
        Some(other) => bail!("CONFIG_TYPE_MISMATCH: {} must be a list, got {}", ptr, other),
    }
}
