//! Application constants and configuration

pub const APP_NAME: &str = "Media Gallery";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Items shown by a windowed grid before the first "show more"
pub const INITIAL_VISIBLE_COUNT: usize = 9;
/// Items added per "show more" click
pub const LOAD_MORE_COUNT: usize = 9;

/// Concurrent media fetches in flight
pub const MAX_CONCURRENT_FETCHES: usize = 8;
/// Upper bound for a single fetched media file (bytes)
pub const MAX_MEDIA_BYTES: u64 = 256 * 1024 * 1024;

/// Catalog used when no catalog file is present
pub const DEFAULT_CATALOG_JSON: &str = r#"[
  { "id": 64, "url": "https://raspatudopix.com.br/imagens/5.mp4", "kind": "video" },
  { "id": 18, "url": "https://raspatudopix.com.br/imagens/36.jpg", "kind": "photo" }
]"#;
