//! App module - contains the main application state and logic

mod grid;
mod lightbox;
mod media;

use crate::gallery::{GallerySection, PlayerHandoff};
use crate::settings::Settings;
use crate::theme;
use crate::ui::components::tab_bar;
use eframe::egui;
use grid::{render_media_grid, GridAction};
pub use media::MediaLoader;
use tracing::info;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) section: GallerySection,
    pub(crate) loader: MediaLoader,
    pub(crate) settings: Settings,
    // Which lightbox video was already sent to the media player
    pub(crate) handoff: PlayerHandoff,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        section: GallerySection,
        loader: MediaLoader,
        settings: Settings,
    ) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        info!(count = section.items().len(), "Gallery ready");

        Self {
            section,
            loader,
            settings,
            handoff: PlayerHandoff::new(),
        }
    }

    /// Title row with the tab strip on the right
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(&self.settings.title)
                    .size(theme::FONT_TITLE)
                    .strong()
                    .color(theme::TEXT_PRIMARY),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(tab) = tab_bar(ui, self.section.active_tab()) {
                    self.section.select_tab(tab);
                }
            });
        });
        ui.add_space(theme::SPACING_XL);
        ui.label(
            egui::RichText::new(&self.settings.subtitle)
                .size(theme::FONT_HEADING)
                .strong()
                .color(theme::TEXT_SECONDARY),
        );
        ui.add_space(theme::SPACING_XL);
    }

    pub(crate) fn render_gallery(&mut self, ui: &mut egui::Ui) {
        match render_media_grid(ui, &self.section, &mut self.loader) {
            Some(GridAction::Open(item)) => self.section.open(item),
            Some(GridAction::RevealMore) => self.section.reveal_more(),
            None => {}
        }
    }
}
