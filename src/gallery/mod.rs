//! Gallery state: partitioning, per-tab windows and the shared selection
//!
//! `GallerySection` owns everything the gallery needs between frames. The
//! photo/video split is recomputed from the collection on demand, each tab has
//! its own `GalleryWindow`, and exactly one `MediaViewer` is shared by all
//! three grids.

mod partition;
mod playback;
mod viewer;
mod window;

pub use partition::partition;
pub use playback::PlayerHandoff;
pub use viewer::{MediaViewer, ViewerMode};
pub use window::GalleryWindow;

use crate::catalog::MediaItem;
use tracing::debug;

/// Gallery tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GalleryTab {
    #[default]
    All,
    Photos,
    Videos,
}

impl GalleryTab {
    pub const ALL: [GalleryTab; 3] = [GalleryTab::All, GalleryTab::Photos, GalleryTab::Videos];

    pub fn label(self) -> &'static str {
        match self {
            GalleryTab::All => "All",
            GalleryTab::Photos => "Photos",
            GalleryTab::Videos => "Videos",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            GalleryTab::All => egui_phosphor::regular::SQUARES_FOUR,
            GalleryTab::Photos => egui_phosphor::regular::CAMERA,
            GalleryTab::Videos => egui_phosphor::regular::FILM_STRIP,
        }
    }

    /// Only the combined grid discloses progressively
    pub fn is_windowed(self) -> bool {
        matches!(self, GalleryTab::All)
    }

    fn index(self) -> usize {
        match self {
            GalleryTab::All => 0,
            GalleryTab::Photos => 1,
            GalleryTab::Videos => 2,
        }
    }
}

pub struct GallerySection {
    items: Vec<MediaItem>,
    active_tab: GalleryTab,
    windows: [GalleryWindow; 3],
    viewer: MediaViewer,
    initial_threshold: usize,
    reveal_step: usize,
}

impl GallerySection {
    pub fn new(items: Vec<MediaItem>, initial_threshold: usize, reveal_step: usize) -> Self {
        let mut section = Self {
            items,
            active_tab: GalleryTab::default(),
            windows: [GalleryWindow::unbounded(0); 3],
            viewer: MediaViewer::new(),
            initial_threshold,
            reveal_step,
        };
        for tab in GalleryTab::ALL {
            section.mount(tab);
        }
        section
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn active_tab(&self) -> GalleryTab {
        self.active_tab
    }

    /// Switch tabs. The incoming tab's grid is mounted fresh.
    pub fn select_tab(&mut self, tab: GalleryTab) {
        if tab == self.active_tab {
            return;
        }
        debug!(from = ?self.active_tab, to = ?tab, "Switching gallery tab");
        self.active_tab = tab;
        self.mount(tab);
    }

    /// Items shown under `tab`, in collection order
    pub fn tab_items(&self, tab: GalleryTab) -> Vec<&MediaItem> {
        match tab {
            GalleryTab::All => self.items.iter().collect(),
            GalleryTab::Photos => partition(&self.items).photos,
            GalleryTab::Videos => partition(&self.items).videos,
        }
    }

    pub fn window(&self, tab: GalleryTab) -> &GalleryWindow {
        &self.windows[tab.index()]
    }

    pub fn active_window(&self) -> &GalleryWindow {
        self.window(self.active_tab)
    }

    pub fn reveal_more(&mut self) {
        let step = self.reveal_step;
        let window = &mut self.windows[self.active_tab.index()];
        window.reveal_more(step);
        debug!(
            tab = ?self.active_tab,
            visible = window.visible_count(),
            total = window.len(),
            "Revealed more items"
        );
    }

    pub fn open(&mut self, item: MediaItem) {
        debug!(id = item.id, kind = ?item.kind, "Opening viewer");
        self.viewer.select(item);
    }

    pub fn close(&mut self) {
        if self.viewer.is_open() {
            debug!("Closing viewer");
        }
        self.viewer.deselect();
    }

    pub fn viewer(&self) -> &MediaViewer {
        &self.viewer
    }

    fn mount(&mut self, tab: GalleryTab) {
        let len = self.tab_items(tab).len();
        self.windows[tab.index()] = if tab.is_windowed() {
            GalleryWindow::windowed(len, self.initial_threshold)
        } else {
            GalleryWindow::unbounded(len)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MediaKind;

    fn items(kinds: &[MediaKind]) -> Vec<MediaItem> {
        kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| MediaItem::new(i as u64 + 1, format!("https://cdn/{}", i), *kind))
            .collect()
    }

    #[test]
    fn defaults_to_all_tab_with_windowed_grid() {
        let section = GallerySection::new(items(&[MediaKind::Photo; 12]), 9, 9);
        assert_eq!(section.active_tab(), GalleryTab::All);
        assert!(section.active_window().is_windowed());
        assert_eq!(section.active_window().visible_count(), 9);
        assert_eq!(section.active_window().remaining_count(), 3);
    }

    #[test]
    fn kind_tabs_are_unbounded() {
        let mut kinds = vec![MediaKind::Photo; 11];
        kinds.extend([MediaKind::Video; 4]);
        let section = GallerySection::new(items(&kinds), 9, 9);

        let photos = section.window(GalleryTab::Photos);
        assert!(!photos.is_windowed());
        assert_eq!(photos.visible_count(), 11);
        assert!(!photos.has_more());

        let videos = section.window(GalleryTab::Videos);
        assert_eq!(videos.visible_count(), 4);
        assert_eq!(section.tab_items(GalleryTab::Videos).len(), 4);
    }

    #[test]
    fn reveal_more_targets_active_tab() {
        let section_items = items(&[MediaKind::Video; 20]);
        let mut section = GallerySection::new(section_items, 9, 9);
        section.reveal_more();
        assert_eq!(section.window(GalleryTab::All).visible_count(), 18);
        section.reveal_more();
        section.reveal_more();
        assert_eq!(section.window(GalleryTab::All).visible_count(), 20);
        assert!(!section.active_window().has_more());
    }

    #[test]
    fn switching_tabs_remounts_the_grid() {
        let mut section = GallerySection::new(items(&[MediaKind::Photo; 20]), 9, 9);
        section.reveal_more();
        assert_eq!(section.active_window().visible_count(), 18);

        section.select_tab(GalleryTab::Photos);
        section.select_tab(GalleryTab::All);
        assert_eq!(section.active_window().visible_count(), 9);
    }

    #[test]
    fn selecting_the_active_tab_keeps_state() {
        let mut section = GallerySection::new(items(&[MediaKind::Photo; 20]), 9, 9);
        section.reveal_more();
        section.select_tab(GalleryTab::All);
        assert_eq!(section.active_window().visible_count(), 18);
    }

    #[test]
    fn one_selection_shared_across_tabs() {
        let section_items = items(&[MediaKind::Photo, MediaKind::Video]);
        let video = section_items[1].clone();
        let mut section = GallerySection::new(section_items, 9, 9);

        section.select_tab(GalleryTab::Videos);
        section.open(video);
        section.select_tab(GalleryTab::All);
        assert!(section.viewer().is_open());
        assert!(matches!(
            section.viewer().mode(),
            ViewerMode::Video { autoplay: true, controls: true, .. }
        ));

        section.close();
        assert!(!section.viewer().is_open());
    }

    #[test]
    fn empty_collection_renders_nothing() {
        let section = GallerySection::new(Vec::new(), 9, 9);
        for tab in GalleryTab::ALL {
            assert!(section.tab_items(tab).is_empty());
            assert!(!section.window(tab).has_more());
            assert!(section.window(tab).visible_items(&section.tab_items(tab)).is_empty());
        }
    }
}
