//! Photo/video split of a media collection

use crate::catalog::{MediaItem, MediaKind};

/// Borrowed subsets of a collection, each in the collection's original order
#[derive(Debug, Default, PartialEq)]
pub struct MediaPartition<'a> {
    pub photos: Vec<&'a MediaItem>,
    pub videos: Vec<&'a MediaItem>,
}

/// Split `items` by kind. Pure; recomputed whenever it is needed.
pub fn partition(items: &[MediaItem]) -> MediaPartition<'_> {
    let mut parts = MediaPartition::default();
    for item in items {
        match item.kind {
            MediaKind::Photo => parts.photos.push(item),
            MediaKind::Video => parts.videos.push(item),
        }
    }
    parts
}
