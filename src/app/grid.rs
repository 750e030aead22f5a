//! Media grid rendering for the active tab

use super::media::{MediaLoader, MediaTexture};
use crate::catalog::{MediaItem, MediaKind};
use crate::gallery::{GallerySection, GalleryWindow};
use crate::theme;
use crate::ui::components::{
    cell_size, cover_uv, grid_columns, grid_spacing, paint_texture, remaining_label,
};
use eframe::egui;

// Hover zoom on photo cells
const HOVER_ZOOM: f32 = 1.05;

/// What the user did in the grid this frame
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GridAction {
    Open(MediaItem),
    RevealMore,
}

/// Render the active tab's grid. Cells report clicks instead of mutating the
/// section so the caller applies them after the frame's borrows end.
pub(crate) fn render_media_grid(
    ui: &mut egui::Ui,
    section: &GallerySection,
    loader: &mut MediaLoader,
) -> Option<GridAction> {
    let tab = section.active_tab();
    let items = section.tab_items(tab);
    let window = *section.active_window();
    let visible = window.visible_items(&items);

    let available = ui.available_width();
    let columns = grid_columns(available);
    let spacing = grid_spacing(columns);
    let size = cell_size(available, columns, spacing);

    let mut action = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .id_salt(("grid_scroll", tab.label()))
        .show(ui, |ui| {
            if visible.is_empty() && !window.has_more() {
                ui.add_space(theme::SPACING_XL);
                ui.label(
                    egui::RichText::new("Nothing here yet")
                        .size(theme::FONT_BODY)
                        .color(theme::TEXT_DIM),
                );
                return;
            }

            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(spacing, spacing);

                for item in visible {
                    if media_cell(ui, item, size, loader) {
                        action = Some(GridAction::Open((*item).clone()));
                    }
                }

                // Unbounded grids never offer the tile
                if window.is_windowed()
                    && window.has_more()
                    && reveal_tile(ui, &window, &items, size, loader)
                {
                    action = Some(GridAction::RevealMore);
                }
            });
        });

    action
}

/// One square cell. Returns true when clicked.
fn media_cell(ui: &mut egui::Ui, item: &MediaItem, size: f32, loader: &mut MediaLoader) -> bool {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());
    if !ui.is_rect_visible(rect) {
        return response.clicked();
    }

    let ctx = ui.ctx().clone();
    let hover = ctx.animate_bool_with_time(response.id, response.hovered(), 0.3);
    let painter = ui.painter();
    painter.rect_filled(rect, theme::RADIUS_LARGE, theme::BG_ELEVATED);

    match item.kind {
        MediaKind::Photo => match loader.texture(&ctx, &item.url) {
            MediaTexture::Ready(tex) => {
                let zoom = 1.0 + (HOVER_ZOOM - 1.0) * hover;
                let uv = cover_uv(tex.size_vec2(), rect.size(), zoom);
                paint_texture(painter, rect, &tex, uv, theme::RADIUS_LARGE, egui::Color32::WHITE);
            }
            MediaTexture::Loading => {
                paint_placeholder(painter, rect, egui_phosphor::regular::IMAGE, theme::TEXT_DIM);
            }
            MediaTexture::Failed => {
                paint_placeholder(
                    painter,
                    rect,
                    egui_phosphor::regular::IMAGE_BROKEN,
                    theme::STATUS_ERROR,
                );
            }
        },
        MediaKind::Video => {
            painter.rect_filled(rect, theme::RADIUS_LARGE, theme::BG_SURFACE);
            let alpha = (51.0 + 51.0 * hover) as u8;
            painter.rect_filled(rect, theme::RADIUS_LARGE, egui::Color32::from_black_alpha(alpha));

            let badge_radius = 24.0;
            painter.circle_filled(rect.center(), badge_radius, egui::Color32::from_black_alpha(128));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::VIDEO_CAMERA,
                egui::FontId::proportional(32.0),
                egui::Color32::WHITE,
            );
            painter.text(
                rect.left_bottom() + egui::vec2(theme::SPACING_MD, -theme::SPACING_MD),
                egui::Align2::LEFT_BOTTOM,
                item.file_name(),
                egui::FontId::proportional(theme::FONT_CAPTION),
                theme::TEXT_MUTED,
            );
        }
    }

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    response.on_hover_text(format!("Media {}", item.id)).clicked()
}

fn paint_placeholder(painter: &egui::Painter, rect: egui::Rect, icon: &str, color: egui::Color32) {
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(28.0),
        color,
    );
}

/// The "show more" tile after the last visible cell. Returns true when its
/// button is clicked.
fn reveal_tile(
    ui: &mut egui::Ui,
    window: &GalleryWindow,
    items: &[&MediaItem],
    size: f32,
    loader: &mut MediaLoader,
) -> bool {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    let ctx = ui.ctx().clone();

    ui.painter().rect_filled(
        rect,
        theme::RADIUS_LARGE,
        theme::BG_SURFACE.gamma_multiply(0.5),
    );

    // Faded preview of the first hidden item
    if let Some(next) = window.next_hidden(items) {
        match next.kind {
            MediaKind::Photo => {
                if let MediaTexture::Ready(tex) = loader.texture(&ctx, &next.url) {
                    let uv = cover_uv(tex.size_vec2(), rect.size(), 1.0);
                    paint_texture(
                        ui.painter(),
                        rect,
                        &tex,
                        uv,
                        theme::RADIUS_LARGE,
                        egui::Color32::from_white_alpha(77),
                    );
                }
            }
            MediaKind::Video => {}
        }
    }

    let center = rect.center();
    let button_rect = egui::Rect::from_center_size(
        center - egui::vec2(0.0, 22.0),
        egui::vec2(theme::REVEAL_BUTTON_SIZE, theme::REVEAL_BUTTON_SIZE),
    );
    let response = ui.interact(button_rect, ui.id().with("reveal_more"), egui::Sense::click());
    let (fill, draw_rect) =
        theme::button_visual(&response, theme::BG_ELEVATED.gamma_multiply(0.8), button_rect);
    let painter = ui.painter();
    painter.circle_filled(draw_rect.center(), draw_rect.width() / 2.0, fill);
    painter.circle_stroke(
        draw_rect.center(),
        draw_rect.width() / 2.0,
        egui::Stroke::new(1.0, theme::BORDER_DEFAULT),
    );
    painter.text(
        draw_rect.center(),
        egui::Align2::CENTER_CENTER,
        egui_phosphor::regular::PLUS,
        egui::FontId::proportional(22.0),
        theme::TEXT_PRIMARY,
    );
    painter.text(
        center + egui::vec2(0.0, 18.0),
        egui::Align2::CENTER_CENTER,
        "Show more",
        egui::FontId::proportional(theme::FONT_BODY),
        theme::TEXT_PRIMARY,
    );
    painter.text(
        center + egui::vec2(0.0, 38.0),
        egui::Align2::CENTER_CENTER,
        remaining_label(window.remaining_count()),
        egui::FontId::proportional(theme::FONT_SMALL),
        theme::TEXT_MUTED,
    );

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response.clicked()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(
        ctx: &egui::Context,
        section: &GallerySection,
        loader: &mut MediaLoader,
        events: Vec<egui::Event>,
    ) -> Option<GridAction> {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(800.0, 600.0),
            )),
            events,
            ..Default::default()
        };
        let mut action = None;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                if let Some(a) = render_media_grid(ui, section, loader) {
                    action = Some(a);
                }
            });
        });
        action
    }

    fn press(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn clicking_a_cell_opens_its_item() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = MediaLoader::new(dir.path().join("cache"), 1).unwrap();
        let items = vec![
            MediaItem::new(64, "https://cdn.invalid/5.mp4", MediaKind::Video),
            MediaItem::new(65, "https://cdn.invalid/6.mp4", MediaKind::Video),
        ];
        let mut section = GallerySection::new(items.clone(), 9, 9);
        let ctx = egui::Context::default();

        // Inside the first cell of the first row
        let target = egui::pos2(100.0, 100.0);
        let mut actions = Vec::new();
        for events in [
            Vec::new(),
            vec![egui::Event::PointerMoved(target)],
            vec![press(target, true)],
            vec![press(target, false)],
            Vec::new(),
        ] {
            actions.extend(frame(&ctx, &section, &mut loader, events));
        }

        assert_eq!(actions, vec![GridAction::Open(items[0].clone())]);

        match actions.pop() {
            Some(GridAction::Open(item)) => section.open(item),
            other => panic!("unexpected action {:?}", other),
        }
        assert_eq!(section.viewer().current().map(|i| i.id), Some(64));
    }

    #[test]
    fn idle_frames_produce_no_action() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = MediaLoader::new(dir.path().join("cache"), 1).unwrap();
        let section = GallerySection::new(
            vec![MediaItem::new(1, "https://cdn.invalid/a.mp4", MediaKind::Video)],
            9,
            9,
        );
        let ctx = egui::Context::default();
        for _ in 0..3 {
            assert_eq!(frame(&ctx, &section, &mut loader, Vec::new()), None);
        }
    }
}
