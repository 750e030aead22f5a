//! Lightbox selection state

use crate::catalog::{MediaItem, MediaKind};

/// What the lightbox should show for the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerMode<'a> {
    Closed,
    Photo { url: &'a str },
    Video {
        url: &'a str,
        autoplay: bool,
        controls: bool,
    },
}

/// The single item selected for enlarged display. Closed when empty.
#[derive(Debug, Default)]
pub struct MediaViewer {
    current: Option<MediaItem>,
}

impl MediaViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, item: MediaItem) {
        self.current = Some(item);
    }

    pub fn deselect(&mut self) {
        self.current = None;
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&MediaItem> {
        self.current.as_ref()
    }

    pub fn mode(&self) -> ViewerMode<'_> {
        match &self.current {
            None => ViewerMode::Closed,
            Some(item) => match item.kind {
                MediaKind::Photo => ViewerMode::Photo { url: &item.url },
                MediaKind::Video => ViewerMode::Video {
                    url: &item.url,
                    autoplay: true,
                    controls: true,
                },
            },
        }
    }
}
