//! Logo resolver.
//!
//! A logo reaches the draft through one of three entry points: a catalog
//! selection, a file dropped on the drop zone, or a file chosen in the picker.
//! All three converge on [`LogoFile`] so submission only ever reads one shape.

use bytes::Bytes;
use rbar_schemas::SVG_MEDIA_TYPE;
use std::fmt;

use crate::error::{CatalogError, ReadError};
use crate::provider::{LogoCatalog, LogoReader};

// ---------------------------------------------------------------------------
// CatalogRef
// ---------------------------------------------------------------------------

/// Opaque catalog reference, e.g. `/gallery/owl.svg`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatalogRef(String);

impl CatalogRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, used as the resolved file's name.
    pub fn file_name(&self) -> &str {
        self.0
            .rsplit('/')
            .find(|seg| !seg.is_empty())
            .unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for CatalogRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// LogoFile
// ---------------------------------------------------------------------------

/// A named binary with a declared media type. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

impl LogoFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Shorthand for a file declared as `image/svg+xml`.
    pub fn svg(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self::new(name, SVG_MEDIA_TYPE, bytes)
    }

    /// Exact match on the declared type; no sniffing, no parameters.
    pub fn is_svg(&self) -> bool {
        self.media_type == SVG_MEDIA_TYPE
    }
}

// ---------------------------------------------------------------------------
// LogoSource
// ---------------------------------------------------------------------------

/// The draft's logo. At most one origin is active at a time by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogoSource {
    #[default]
    None,
    /// A resolved catalog entry. The reference is kept for highlighting.
    Catalog { reference: CatalogRef, file: LogoFile },
    /// A file supplied by the user (drop or picker).
    Upload(LogoFile),
}

impl LogoSource {
    pub fn is_none(&self) -> bool {
        matches!(self, LogoSource::None)
    }

    pub fn active_file(&self) -> Option<&LogoFile> {
        match self {
            LogoSource::None => None,
            LogoSource::Catalog { file, .. } | LogoSource::Upload(file) => Some(file),
        }
    }

    pub fn catalog_selection(&self) -> Option<&CatalogRef> {
        match self {
            LogoSource::Catalog { reference, .. } => Some(reference),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Drop path
// ---------------------------------------------------------------------------

/// Raw drop-zone event: whatever files the user let go of. Only the first is
/// considered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropEvent {
    pub files: Vec<LogoFile>,
}

impl DropEvent {
    pub fn single(file: LogoFile) -> Self {
        Self { files: vec![file] }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropRejection {
    NoFile,
    WrongType { name: String, media_type: String },
}

impl fmt::Display for DropRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropRejection::NoFile => write!(f, "drop carried no file"),
            DropRejection::WrongType { name, media_type } => {
                write!(f, "'{name}' declared as '{media_type}', expected '{SVG_MEDIA_TYPE}'")
            }
        }
    }
}

/// Accepts the first dropped file only if it is declared as SVG.
pub fn screen_drop(event: DropEvent) -> Result<LogoFile, DropRejection> {
    let file = event.files.into_iter().next().ok_or(DropRejection::NoFile)?;
    screen_media_type(file)
}

/// The drop-path type check on its own, for the picker when it is configured
/// to apply it.
pub fn screen_media_type(file: LogoFile) -> Result<LogoFile, DropRejection> {
    if file.is_svg() {
        Ok(file)
    } else {
        Err(DropRejection::WrongType {
            name: file.name,
            media_type: file.media_type,
        })
    }
}

// ---------------------------------------------------------------------------
// Catalog path / extraction
// ---------------------------------------------------------------------------

/// Fetch a catalog entry and wrap it as an SVG-typed file named after the
/// reference.
pub async fn resolve_catalog(
    catalog: &dyn LogoCatalog,
    reference: &CatalogRef,
) -> Result<LogoFile, CatalogError> {
    let bytes = catalog.fetch(reference).await?;
    Ok(LogoFile::svg(reference.file_name(), bytes))
}

/// Read the active file's markup. Submit-time only.
pub async fn extract_content(reader: &dyn LogoReader, file: &LogoFile) -> Result<String, ReadError> {
    reader.read_text(file).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ref_file_name_is_last_segment() {
        assert_eq!(CatalogRef::new("/gallery/owl.svg").file_name(), "owl.svg");
        assert_eq!(CatalogRef::new("owl.svg").file_name(), "owl.svg");
        assert_eq!(CatalogRef::new("/gallery/dir/").file_name(), "dir");
    }

    #[test]
    fn drop_accepts_only_exact_svg_type() {
        let ok = screen_drop(DropEvent::single(LogoFile::svg("a.svg", "<svg/>")));
        assert!(ok.is_ok());

        let png = screen_drop(DropEvent::single(LogoFile::new("a.png", "image/png", vec![1u8])));
        assert!(matches!(png, Err(DropRejection::WrongType { .. })));

        let with_params = screen_drop(DropEvent::single(LogoFile::new(
            "a.svg",
            "image/svg+xml; charset=utf-8",
            "<svg/>",
        )));
        assert!(with_params.is_err());
    }

    #[test]
    fn drop_without_file_is_rejected() {
        assert_eq!(screen_drop(DropEvent::empty()), Err(DropRejection::NoFile));
    }

    #[test]
    fn drop_considers_first_file_only() {
        let ev = DropEvent {
            files: vec![
                LogoFile::new("a.txt", "text/plain", "x"),
                LogoFile::svg("b.svg", "<svg/>"),
            ],
        };
        assert!(screen_drop(ev).is_err());
    }

    #[test]
    fn logo_source_exposes_one_file() {
        let f = LogoFile::svg("owl.svg", "<svg/>");
        let cat = LogoSource::Catalog {
            reference: CatalogRef::new("/gallery/owl.svg"),
            file: f.clone(),
        };
        assert_eq!(cat.active_file(), Some(&f));
        assert!(cat.catalog_selection().is_some());

        let up = LogoSource::Upload(f.clone());
        assert_eq!(up.active_file(), Some(&f));
        assert!(up.catalog_selection().is_none());

        assert!(LogoSource::default().is_none());
    }
}
