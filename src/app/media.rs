//! Media fetching, caching and texture loading

use crate::constants::MAX_MEDIA_BYTES;
use crate::utils::{cache_file_name, local_path};
use eframe::egui;
use futures::StreamExt;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

// Textures larger than this are downscaled before upload
const MAX_TEXTURE_SIDE: u32 = 4096;

/// Progress of a remote fetch
#[derive(Clone, Debug, PartialEq)]
pub enum FetchStatus {
    Fetching,
    Ready,
    Failed(String),
}

/// What a cell or the lightbox can draw for a url right now
#[derive(Clone)]
pub enum MediaTexture {
    Ready(egui::TextureHandle),
    Loading,
    Failed,
}

pub struct MediaLoader {
    runtime: tokio::runtime::Runtime,
    client: reqwest::Client,
    semaphore: Arc<Semaphore>,
    cancel_token: CancellationToken,
    cache_dir: PathBuf,
    status: Arc<Mutex<HashMap<String, FetchStatus>>>,
    textures: HashMap<String, Option<egui::TextureHandle>>,
}

impl MediaLoader {
    pub fn new(cache_dir: PathBuf, max_concurrent: usize) -> std::io::Result<Self> {
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self {
            runtime: tokio::runtime::Runtime::new()?,
            client: reqwest::Client::new(),
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            cancel_token: CancellationToken::new(),
            cache_dir,
            status: Arc::new(Mutex::new(HashMap::new())),
            textures: HashMap::new(),
        })
    }

    /// Where the bytes for `url` live (or will live once fetched)
    pub fn resolve_path(&self, url: &str) -> PathBuf {
        local_path(url).unwrap_or_else(|| self.cache_dir.join(cache_file_name(url)))
    }

    pub fn status(&self, url: &str) -> Option<FetchStatus> {
        self.status.lock().ok()?.get(url).cloned()
    }

    /// Size on disk once the media is available
    pub fn available_size(&self, url: &str) -> Option<u64> {
        std::fs::metadata(self.resolve_path(url)).ok().map(|m| m.len())
    }

    /// Start fetching `url` into the cache unless it is local, cached, or
    /// already in flight.
    pub fn ensure_fetched(&self, ctx: &egui::Context, url: &str) {
        if local_path(url).is_some() {
            return;
        }
        let dest = self.resolve_path(url);
        if dest.exists() {
            return;
        }
        {
            let Ok(mut status) = self.status.lock() else {
                return;
            };
            if status.contains_key(url) {
                return;
            }
            status.insert(url.to_string(), FetchStatus::Fetching);
        }

        debug!(url = %url, "Fetching media");

        let client = self.client.clone();
        let semaphore = self.semaphore.clone();
        let token = self.cancel_token.clone();
        let status = self.status.clone();
        let ctx = ctx.clone();
        let url = url.to_string();

        self.runtime.spawn(async move {
            let _permit = semaphore.acquire().await.ok();
            let result = fetch_to_cache(&client, &url, &dest, &token).await;
            let next = match result {
                Ok(bytes) => {
                    debug!(url = %url, bytes, "Media cached");
                    FetchStatus::Ready
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Media fetch failed");
                    FetchStatus::Failed(e)
                }
            };
            if let Ok(mut s) = status.lock() {
                s.insert(url, next);
            }
            ctx.request_repaint();
        });
    }

    /// Texture for a photo url, decoding from disk the first time the bytes
    /// are available.
    pub fn texture(&mut self, ctx: &egui::Context, url: &str) -> MediaTexture {
        if let Some(cached) = self.textures.get(url) {
            return match cached {
                Some(tex) => MediaTexture::Ready(tex.clone()),
                None => MediaTexture::Failed,
            };
        }

        let path = self.resolve_path(url);
        if path.exists() {
            let texture = decode_texture(ctx, url, &path);
            self.textures.insert(url.to_string(), texture.clone());
            return match texture {
                Some(tex) => MediaTexture::Ready(tex),
                None => MediaTexture::Failed,
            };
        }

        if local_path(url).is_some() {
            warn!(path = %path.display(), "Local media file not found");
            self.textures.insert(url.to_string(), None);
            return MediaTexture::Failed;
        }

        self.ensure_fetched(ctx, url);
        match self.status(url) {
            Some(FetchStatus::Failed(_)) => MediaTexture::Failed,
            _ => MediaTexture::Loading,
        }
    }

    /// Cancel in-flight fetches
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

/// Decode the file at `path`. The format is sniffed from the content since
/// cache names for extension-less urls carry no hint.
fn decode_image(path: &Path) -> image::ImageResult<image::DynamicImage> {
    image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
}

fn decode_texture(ctx: &egui::Context, url: &str, path: &Path) -> Option<egui::TextureHandle> {
    let img = match decode_image(path) {
        Ok(img) => img,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to decode media");
            return None;
        }
    };
    let img = if img.width() > MAX_TEXTURE_SIDE || img.height() > MAX_TEXTURE_SIDE {
        img.resize(
            MAX_TEXTURE_SIDE,
            MAX_TEXTURE_SIDE,
            image::imageops::FilterType::Triangle,
        )
    } else {
        img
    };
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    Some(ctx.load_texture(
        url,
        egui::ColorImage::from_rgba_unmultiplied(size, &pixels),
        egui::TextureOptions::LINEAR,
    ))
}

/// Stream `url` into `dest` through a temporary file. Returns the byte count.
async fn fetch_to_cache(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
    token: &CancellationToken,
) -> Result<u64, String> {
    let response = client.get(url).send().await.map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }
    if response.content_length().is_some_and(|len| len > MAX_MEDIA_BYTES) {
        return Err("Media too large".into());
    }

    let mut bytes_vec = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
    let mut stream = response.bytes_stream();
    loop {
        tokio::select! {
            _ = token.cancelled() => return Err("Cancelled".into()),
            chunk = stream.next() => match chunk {
                Some(Ok(data)) => {
                    bytes_vec.extend_from_slice(&data);
                    if bytes_vec.len() as u64 > MAX_MEDIA_BYTES {
                        return Err("Media too large".into());
                    }
                }
                Some(Err(e)) => return Err(e.to_string()),
                None => break,
            }
        }
    }

    let tmp = dest.with_extension("part");
    tokio::fs::write(&tmp, &bytes_vec)
        .await
        .map_err(|e| format!("Write failed: {}", e))?;
    tokio::fs::rename(&tmp, dest)
        .await
        .map_err(|e| format!("Write failed: {}", e))?;
    Ok(bytes_vec.len() as u64)
}
