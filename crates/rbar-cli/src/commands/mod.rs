//! Command handler modules for rbar-cli.
//!
//! Wiring shared by every command path lives here: settings to collaborators,
//! and local files to [`LogoFile`]s.

pub mod kiosk;
pub mod order;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rbar_config::{CatalogSource, KioskSettings, UnusedKeyPolicy};
use rbar_core::{
    Action, CatalogRef, DirectoryCatalog, EmptyCatalog, Kiosk, KioskDeps, KioskOptions,
    LogoCatalog, LogoFile, Utf8LogoReader, SVG_MEDIA_TYPE,
};
use rbar_remote::{HttpLogoCatalog, HttpOrderEndpoint};
use tokio::sync::mpsc;
use tracing::{info, warn};

const OCTET_STREAM: &str = "application/octet-stream";

/// Load layered config and derive typed settings. Unused keys are warned
/// about, never fatal.
pub fn load_settings(config_paths: &[String]) -> Result<KioskSettings> {
    let path_refs: Vec<&str> = config_paths.iter().map(|s| s.as_str()).collect();
    let loaded = rbar_config::load_layered_yaml(&path_refs)?;

    let report = rbar_config::report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
    for leaf in &report.unused_leaf_pointers {
        warn!(pointer = %leaf, "unused config key");
    }

    let settings = loaded.settings()?;
    info!(config_hash = %loaded.config_hash, "config loaded");
    Ok(settings)
}

pub fn kiosk_options(settings: &KioskSettings) -> KioskOptions {
    KioskOptions {
        ack_window: settings.ack_window,
        reset_after_notice: settings.reset_after_notice,
        picker_requires_svg: settings.picker_requires_svg,
        report_catalog_failures: settings.report_catalog_failures,
    }
}

pub fn build_catalog(source: &CatalogSource) -> Arc<dyn LogoCatalog> {
    match source {
        CatalogSource::Disabled => Arc::new(EmptyCatalog),
        CatalogSource::Directory(dir) => Arc::new(DirectoryCatalog::new(dir.clone())),
        CatalogSource::Http {
            base_url,
            references,
        } => Arc::new(HttpLogoCatalog::new(
            base_url.clone(),
            references.iter().map(CatalogRef::new).collect(),
        )),
    }
}

/// Wire a kiosk to the HTTP endpoint and the configured gallery, and load
/// the gallery once.
pub async fn build_kiosk(
    settings: &KioskSettings,
) -> Result<(Kiosk, mpsc::UnboundedReceiver<Action>)> {
    let endpoint = HttpOrderEndpoint::new(
        &settings.endpoint_base_url,
        &settings.order_path,
        settings.request_timeout,
    )
    .context("failed to build http client")?;
    info!(url = endpoint.order_url(), "order endpoint");

    let deps = KioskDeps {
        endpoint: Arc::new(endpoint),
        catalog: build_catalog(&settings.catalog),
        reader: Arc::new(Utf8LogoReader),
    };
    let (mut kiosk, timers) = Kiosk::new(deps, kiosk_options(settings));
    kiosk.load_catalog().await;
    Ok((kiosk, timers))
}

pub async fn catalog_list(settings: &KioskSettings) -> Result<()> {
    let catalog = build_catalog(&settings.catalog);
    let refs = catalog.references().await?;
    for r in refs {
        println!("{r}");
    }
    Ok(())
}

/// Declared type from the extension only. Content is never sniffed.
pub fn media_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("svg") => SVG_MEDIA_TYPE,
        _ => OCTET_STREAM,
    }
}

pub async fn load_local_file(path: &str) -> Result<LogoFile> {
    let p = Path::new(path);
    let bytes = tokio::fs::read(p)
        .await
        .with_context(|| format!("read logo file failed: {path}"))?;
    let name = p
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    Ok(LogoFile::new(name, media_type_for(p), bytes))
}
