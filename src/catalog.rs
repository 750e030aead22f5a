//! Media catalog: item types and the JSON catalog loader

use crate::constants::DEFAULT_CATALOG_JSON;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Kind of media item. Every render path matches on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "photo" => Some(Self::Photo),
            "video" => Some(Self::Video),
            _ => None,
        }
    }
}

/// A single gallery entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub id: u64,
    pub url: String,
    pub kind: MediaKind,
}

impl MediaItem {
    pub fn new(id: u64, url: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            id,
            url: url.into(),
            kind,
        }
    }

    /// Last path segment of the url, used as a caption
    pub fn file_name(&self) -> &str {
        let path = self.url.split(['?', '#']).next().unwrap_or(&self.url);
        path.rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or(&self.url)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog must be an array or an object with an `items` array")]
    Shape,
    #[error("record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("record {index} is missing `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("record {index} has unknown kind `{kind}`")]
    UnknownKind { index: usize, kind: String },
    #[error("record {index} has an empty url")]
    EmptyUrl { index: usize },
    #[error("record {index} repeats id {id}")]
    DuplicateId { index: usize, id: u64 },
}

/// Record as it appears on disk, before validation
#[derive(Deserialize)]
struct RawRecord {
    id: Option<u64>,
    url: Option<String>,
    #[serde(alias = "type")]
    kind: Option<String>,
}

impl RawRecord {
    fn validate(self, index: usize) -> Result<MediaItem, CatalogError> {
        let id = self.id.ok_or(CatalogError::MissingField { index, field: "id" })?;
        let url = self
            .url
            .ok_or(CatalogError::MissingField { index, field: "url" })?;
        let url = url.trim().to_string();
        if url.is_empty() {
            return Err(CatalogError::EmptyUrl { index });
        }
        let raw_kind = self
            .kind
            .ok_or(CatalogError::MissingField { index, field: "kind" })?;
        let kind = MediaKind::parse(&raw_kind).ok_or(CatalogError::UnknownKind {
            index,
            kind: raw_kind,
        })?;
        Ok(MediaItem::new(id, url, kind))
    }
}

/// Validated catalog plus the records that were dropped
#[derive(Debug, Default)]
pub struct Catalog {
    pub items: Vec<MediaItem>,
    pub rejected: Vec<CatalogError>,
}

/// Parse a catalog document. Malformed records are skipped and reported in
/// `rejected`; only a malformed document as a whole is an error.
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let document: serde_json::Value = serde_json::from_str(json)?;
    let records = match document {
        serde_json::Value::Array(records) => records,
        serde_json::Value::Object(mut map) => match map.remove("items") {
            Some(serde_json::Value::Array(records)) => records,
            _ => return Err(CatalogError::Shape),
        },
        _ => return Err(CatalogError::Shape),
    };

    let mut catalog = Catalog::default();
    let mut seen_ids = HashSet::new();

    for (index, value) in records.into_iter().enumerate() {
        let item = serde_json::from_value::<RawRecord>(value)
            .map_err(|source| CatalogError::Record { index, source })
            .and_then(|raw| raw.validate(index))
            .and_then(|item| {
                if seen_ids.insert(item.id) {
                    Ok(item)
                } else {
                    Err(CatalogError::DuplicateId { index, id: item.id })
                }
            });
        match item {
            Ok(item) => catalog.items.push(item),
            Err(e) => catalog.rejected.push(e),
        }
    }

    Ok(catalog)
}

pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&json)
}

/// Built-in catalog shipped with the binary
pub fn default_items() -> Vec<MediaItem> {
    match parse_catalog(DEFAULT_CATALOG_JSON) {
        Ok(catalog) => catalog.items,
        Err(e) => {
            warn!(error = %e, "Built-in catalog is invalid");
            Vec::new()
        }
    }
}

/// Load the catalog at `path`, skipping bad records. Falls back to the
/// built-in catalog when the file is missing or unreadable as a whole.
pub fn load_or_default(path: &Path) -> Vec<MediaItem> {
    if !path.exists() {
        debug!(path = %path.display(), "No catalog file found, using built-in catalog");
        return default_items();
    }

    match load_catalog(path) {
        Ok(catalog) => {
            for rejected in &catalog.rejected {
                warn!(error = %rejected, "Skipping catalog record");
            }
            info!(
                path = %path.display(),
                count = catalog.items.len(),
                skipped = catalog.rejected.len(),
                "Catalog loaded"
            );
            catalog.items
        }
        Err(e) => {
            warn!(error = %e, "Failed to load catalog, using built-in catalog");
            default_items()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_array_in_order() {
        let catalog = parse_catalog(
            r#"[
                {"id": 3, "url": "https://x/a.jpg", "kind": "photo"},
                {"id": 1, "url": "https://x/b.mp4", "kind": "video"},
                {"id": 2, "url": "https://x/c.jpg", "kind": "photo"}
            ]"#,
        )
        .unwrap();
        let ids: Vec<u64> = catalog.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(catalog.items[1].kind, MediaKind::Video);
        assert!(catalog.rejected.is_empty());
    }

    #[test]
    fn accepts_type_alias_and_wrapped_items() {
        let catalog = parse_catalog(
            r#"{"items": [{"id": 64, "url": "https://x/5.mp4", "type": "video"}]}"#,
        )
        .unwrap();
        assert_eq!(
            catalog.items,
            vec![MediaItem::new(64, "https://x/5.mp4", MediaKind::Video)]
        );
    }

    #[test]
    fn skips_malformed_records() {
        let catalog = parse_catalog(
            r#"[
                {"id": 1, "url": "https://x/a.jpg", "kind": "photo"},
                {"id": 2, "url": "https://x/b.gif", "kind": "animation"},
                {"id": 3, "kind": "photo"},
                {"id": 4, "url": "   ", "kind": "photo"},
                {"id": 1, "url": "https://x/dup.jpg", "kind": "photo"},
                {"id": "five", "url": "https://x/e.jpg", "kind": "photo"},
                {"id": 6, "url": "https://x/f.mp4", "kind": "VIDEO"}
            ]"#,
        )
        .unwrap();

        let ids: Vec<u64> = catalog.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 6]);
        assert_eq!(catalog.rejected.len(), 5);
        assert!(matches!(
            catalog.rejected[0],
            CatalogError::UnknownKind { index: 1, .. }
        ));
        assert!(matches!(
            catalog.rejected[1],
            CatalogError::MissingField { index: 2, field: "url" }
        ));
        assert!(matches!(catalog.rejected[2], CatalogError::EmptyUrl { index: 3 }));
        assert!(matches!(
            catalog.rejected[3],
            CatalogError::DuplicateId { index: 4, id: 1 }
        ));
        assert!(matches!(catalog.rejected[4], CatalogError::Record { index: 5, .. }));
    }

    #[test]
    fn rejects_wrong_document_shape() {
        assert!(matches!(parse_catalog("42"), Err(CatalogError::Shape)));
        assert!(matches!(
            parse_catalog(r#"{"media": []}"#),
            Err(CatalogError::Shape)
        ));
        assert!(matches!(parse_catalog("[{"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = parse_catalog("[]").unwrap();
        assert!(catalog.items.is_empty());
        assert!(catalog.rejected.is_empty());
    }

    #[test]
    fn built_in_catalog_has_both_kinds() {
        let items = default_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 64);
        assert_eq!(items[0].kind, MediaKind::Video);
        assert_eq!(items[1].kind, MediaKind::Photo);
    }

    #[test]
    fn load_falls_back_when_missing_or_broken() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("catalog.json");
        assert_eq!(load_or_default(&missing), default_items());

        std::fs::write(&missing, "not json").unwrap();
        assert_eq!(load_or_default(&missing), default_items());

        std::fs::write(
            &missing,
            r#"[{"id": 9, "url": "file:///tmp/a.png", "kind": "photo"}]"#,
        )
        .unwrap();
        let items = load_or_default(&missing);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 9);
    }

    #[test]
    fn file_name_strips_query_and_path() {
        let item = MediaItem::new(1, "https://host/imagens/36.jpg?size=large", MediaKind::Photo);
        assert_eq!(item.file_name(), "36.jpg");
        let item = MediaItem::new(2, "https://host/videos/", MediaKind::Video);
        assert_eq!(item.file_name(), "videos");
    }
}
