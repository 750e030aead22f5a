//! Lightbox dialog for the selected media item

use super::media::{FetchStatus, MediaTexture};
use super::App;
use crate::catalog::MediaKind;
use crate::gallery::ViewerMode;
use crate::theme;
use crate::ui::components::fit_contain;
use crate::utils::{format_bytes, local_path};
use eframe::egui;
use tracing::{debug, warn};

const HEADER_HEIGHT: f32 = 40.0;

/// Hand a media url to the OS default handler
fn open_externally(url: &str) {
    let result = match local_path(url) {
        Some(path) => open::that(path),
        None => open::that(url),
    };
    match result {
        Ok(()) => debug!(url = %url, "Opened media externally"),
        Err(e) => warn!(url = %url, error = %e, "Failed to open media externally"),
    }
}

/// True once per Space press, and only while no widget has keyboard focus
/// (a focused button handles Space itself). Consumes the key.
fn take_space_press(ctx: &egui::Context) -> bool {
    if ctx.memory(|m| m.focused().is_some()) {
        return false;
    }
    ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Space))
}

impl App {
    pub(crate) fn render_lightbox(&mut self, ctx: &egui::Context) {
        // Autoplay: a newly selected video goes straight to the media player
        if let Some(url) = self.handoff.sync(&self.section.viewer().mode()) {
            debug!(url = %url, "Autoplaying video");
            open_externally(url);
        }

        let Some(item) = self.section.viewer().current().cloned() else {
            return;
        };
        let (photo_url, show_controls) = match self.section.viewer().mode() {
            ViewerMode::Photo { url } => (Some(url.to_string()), false),
            ViewerMode::Video { controls, .. } => (None, controls),
            ViewerMode::Closed => return,
        };

        let screen = ctx.screen_rect();
        let width = theme::LIGHTBOX_MAX_WIDTH.min(screen.width() - 2.0 * theme::SPACING_XL);
        let mut close = false;
        let mut replay = false;

        let modal_area = egui::Modal::default_area(egui::Id::new("media_lightbox")).default_width(width);
        let modal = egui::Modal::new(egui::Id::new("media_lightbox"))
            .area(modal_area)
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::lightbox_frame());

        let modal_response = modal.show(ctx, |ui| {
            ui.set_width(width);
            ui.spacing_mut().item_spacing = egui::vec2(0.0, 0.0);

            // ═══════════════════════════════════════════════════════════
            // HEADER
            // ═══════════════════════════════════════════════════════════
            let (header_rect, _) =
                ui.allocate_exact_size(egui::vec2(width, HEADER_HEIGHT), egui::Sense::hover());
            let icon = match item.kind {
                MediaKind::Photo => egui_phosphor::regular::IMAGE,
                MediaKind::Video => egui_phosphor::regular::FILM_STRIP,
            };
            ui.painter().text(
                header_rect.left_center() + egui::vec2(theme::SPACING_LG, 0.0),
                egui::Align2::LEFT_CENTER,
                format!("{}  {}", icon, item.file_name()),
                egui::FontId::proportional(theme::FONT_BODY),
                theme::TEXT_SECONDARY,
            );

            let close_rect = egui::Rect::from_center_size(
                egui::pos2(header_rect.right() - 20.0, header_rect.center().y),
                egui::vec2(24.0, 24.0),
            );
            let close_response = ui.interact(close_rect, ui.id().with("lightbox_close"), egui::Sense::click());
            let close_color = if close_response.hovered() {
                ui.painter().rect_filled(close_rect, theme::RADIUS_DEFAULT, theme::BG_SURFACE);
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                theme::STATUS_ERROR
            } else {
                theme::TEXT_DIM
            };
            ui.painter().text(
                close_rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::X,
                egui::FontId::proportional(18.0),
                close_color,
            );
            if close_response.clicked() {
                close = true;
            }

            // ═══════════════════════════════════════════════════════════
            // CONTENT
            // ═══════════════════════════════════════════════════════════
            match photo_url.as_deref() {
                Some(url) => {
                    let height = width / theme::PHOTO_ASPECT_RATIO;
                    let (frame, _) =
                        ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());
                    ui.painter().rect_filled(frame, 0.0, egui::Color32::BLACK);
                    match self.loader.texture(ctx, url) {
                        MediaTexture::Ready(tex) => {
                            let fitted = fit_contain(tex.size_vec2(), frame);
                            ui.painter().image(
                                tex.id(),
                                fitted,
                                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                                egui::Color32::WHITE,
                            );
                        }
                        MediaTexture::Loading => {
                            ui.put(
                                egui::Rect::from_center_size(frame.center(), egui::vec2(32.0, 32.0)),
                                egui::Spinner::new().size(32.0),
                            );
                        }
                        MediaTexture::Failed => {
                            let mut message =
                                format!("{}  Could not load image", egui_phosphor::regular::IMAGE_BROKEN);
                            if let Some(FetchStatus::Failed(reason)) = self.loader.status(url) {
                                message.push_str(&format!(" ({})", reason));
                            }
                            ui.painter().text(
                                frame.center(),
                                egui::Align2::CENTER_CENTER,
                                message,
                                egui::FontId::proportional(theme::FONT_BODY),
                                theme::STATUS_ERROR,
                            );
                        }
                    }
                }
                None => {
                    let launched = self.handoff.launched().is_some();
                    if render_video_surface(ui, width, launched, show_controls) {
                        replay = true;
                    }
                }
            }

            // ═══════════════════════════════════════════════════════════
            // FOOTER
            // ═══════════════════════════════════════════════════════════
            ui.add_space(theme::SPACING_MD);
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(theme::SPACING_MD, 0.0);
                ui.add_space(theme::SPACING_LG);
                let mut caption = format!("Media {}", item.id);
                if let Some(bytes) = self.loader.available_size(&item.url) {
                    caption.push_str(&format!("  •  {}", format_bytes(bytes)));
                }
                ui.label(
                    egui::RichText::new(caption)
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(theme::SPACING_LG);
                    let label = match item.kind {
                        MediaKind::Photo => "Open original",
                        MediaKind::Video => "Open in player",
                    };
                    if ui
                        .add(theme::button(format!(
                            "{}  {}",
                            egui_phosphor::regular::ARROW_SQUARE_OUT,
                            label
                        )))
                        .clicked()
                    {
                        open_externally(&item.url);
                    }
                });
            });
            ui.add_space(theme::SPACING_MD);
        });

        if replay {
            debug!(id = item.id, "Replaying video");
            open_externally(&item.url);
        }

        if close || modal_response.should_close() {
            self.section.close();
        }
    }
}

/// 16:9 video surface. Playback happens in the system media player; with
/// `controls` set, clicking the surface or pressing Space plays it again.
/// Returns true when a replay was requested.
fn render_video_surface(ui: &mut egui::Ui, width: f32, launched: bool, controls: bool) -> bool {
    let height = width / theme::VIDEO_ASPECT_RATIO;
    let sense = if controls {
        egui::Sense::click()
    } else {
        egui::Sense::hover()
    };
    let (surface, response) = ui.allocate_exact_size(egui::vec2(width, height), sense);
    let painter = ui.painter();
    painter.rect_filled(surface, 0.0, egui::Color32::BLACK);

    let glyph_alpha = if controls && response.hovered() { 230 } else { 160 };
    painter.text(
        surface.center() - egui::vec2(0.0, 14.0),
        egui::Align2::CENTER_CENTER,
        egui_phosphor::regular::PLAY_CIRCLE,
        egui::FontId::proportional(64.0),
        egui::Color32::from_white_alpha(glyph_alpha),
    );
    let caption = match (launched, controls) {
        (true, true) => "Playing in your media player. Click or press Space to play again",
        (true, false) => "Playing in your media player",
        (false, true) => "Click or press Space to play",
        (false, false) => "Use \"Open in player\" to watch",
    };
    painter.text(
        surface.center() + egui::vec2(0.0, 40.0),
        egui::Align2::CENTER_CENTER,
        caption,
        egui::FontId::proportional(theme::FONT_SMALL),
        theme::TEXT_MUTED,
    );

    if !controls {
        return false;
    }
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    let clicked = response.on_hover_text("Play again").clicked();
    let space = take_space_press(ui.ctx());
    clicked || space
}
