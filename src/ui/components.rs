//! Reusable UI components
//!
//! Painting helpers and the small amount of geometry the grid and the
//! lightbox share.

use crate::gallery::GalleryTab;
use crate::theme;
use eframe::egui;

/// Grid column count for the available width
pub fn grid_columns(available_width: f32) -> usize {
    if available_width < theme::GRID_BREAKPOINT {
        2
    } else {
        3
    }
}

pub fn grid_spacing(columns: usize) -> f32 {
    if columns <= 2 {
        theme::GRID_SPACING_NARROW
    } else {
        theme::GRID_SPACING_WIDE
    }
}

/// Side length of a square cell filling `columns` columns
pub fn cell_size(available_width: f32, columns: usize, spacing: f32) -> f32 {
    let columns = columns.max(1) as f32;
    ((available_width - spacing * (columns - 1.0)) / columns)
        .floor()
        .max(1.0)
}

/// UV sub-rect that crops an image of `image_size` to fill `cell` without
/// distortion (object-fit: cover), centered, zoomed in by `zoom`.
pub fn cover_uv(image_size: egui::Vec2, cell: egui::Vec2, zoom: f32) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0));
    if image_size.x <= 0.0 || image_size.y <= 0.0 || cell.x <= 0.0 || cell.y <= 0.0 {
        return full;
    }
    let image_aspect = image_size.x / image_size.y;
    let cell_aspect = cell.x / cell.y;
    let (mut w, mut h) = if image_aspect > cell_aspect {
        (cell_aspect / image_aspect, 1.0)
    } else {
        (1.0, image_aspect / cell_aspect)
    };
    let zoom = zoom.max(1.0);
    w /= zoom;
    h /= zoom;
    egui::Rect::from_center_size(egui::pos2(0.5, 0.5), egui::vec2(w, h))
}

/// Largest rect with the image's aspect ratio that fits inside `frame`,
/// centered (object-fit: contain).
pub fn fit_contain(image_size: egui::Vec2, frame: egui::Rect) -> egui::Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return frame;
    }
    let scale = (frame.width() / image_size.x).min(frame.height() / image_size.y);
    egui::Rect::from_center_size(frame.center(), image_size * scale)
}

/// "(N+ remaining)" caption for the reveal tile
pub fn remaining_label(remaining: usize) -> String {
    format!("({}+ remaining)", remaining)
}

/// Paint a texture clipped to rounded corners
pub fn paint_texture(
    painter: &egui::Painter,
    rect: egui::Rect,
    texture: &egui::TextureHandle,
    uv: egui::Rect,
    radius: f32,
    tint: egui::Color32,
) {
    let brush = egui::epaint::Brush {
        fill_texture_id: texture.id(),
        uv,
    };
    let mut shape = egui::epaint::RectShape::filled(
        rect,
        egui::CornerRadius::same(radius as u8),
        tint,
    );
    shape.brush = Some(std::sync::Arc::new(brush));
    painter.add(shape);
}

/// Three mutually exclusive tabs. Returns the tab clicked this frame, if it
/// differs from `active`.
pub fn tab_bar(ui: &mut egui::Ui, active: GalleryTab) -> Option<GalleryTab> {
    let mut clicked = None;
    let font = egui::FontId::proportional(theme::FONT_SMALL + 1.0);

    let labels: Vec<(GalleryTab, String)> = GalleryTab::ALL
        .iter()
        .map(|tab| (*tab, format!("{}  {}", tab.icon(), tab.label())))
        .collect();
    let widths: Vec<f32> = labels
        .iter()
        .map(|(_, label)| {
            let text_w = ui.fonts(|f| {
                f.layout_no_wrap(label.clone(), font.clone(), theme::TEXT_PRIMARY)
                    .rect
                    .width()
            });
            (text_w + 2.0 * theme::SPACING_LG).max(theme::TAB_MIN_WIDTH)
        })
        .collect();

    let inset = 3.0;
    let total_w = widths.iter().sum::<f32>() + inset * 2.0;
    let (bar_rect, _) = ui.allocate_exact_size(
        egui::vec2(total_w, theme::TAB_HEIGHT + inset * 2.0),
        egui::Sense::hover(),
    );
    ui.painter()
        .rect_filled(bar_rect, theme::RADIUS_DEFAULT + 2.0, theme::BG_SURFACE);

    let mut x = bar_rect.min.x + inset;
    for ((tab, label), width) in labels.into_iter().zip(widths) {
        let tab_rect = egui::Rect::from_min_size(
            egui::pos2(x, bar_rect.min.y + inset),
            egui::vec2(width, theme::TAB_HEIGHT),
        );
        x += width;

        let response = ui.interact(tab_rect, ui.id().with(("gallery_tab", tab.label())), egui::Sense::click());
        let is_active = tab == active;
        let (fill, text_color) = if is_active {
            (theme::BG_BASE, theme::TEXT_PRIMARY)
        } else if response.hovered() {
            (theme::lighten(theme::BG_SURFACE, 0.06), theme::TEXT_SECONDARY)
        } else {
            (egui::Color32::TRANSPARENT, theme::TEXT_MUTED)
        };
        ui.painter().rect_filled(tab_rect, theme::RADIUS_DEFAULT, fill);
        ui.painter().text(
            tab_rect.center(),
            egui::Align2::CENTER_CENTER,
            label,
            font.clone(),
            text_color,
        );

        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        if response.clicked() && !is_active {
            clicked = Some(tab);
        }
    }

    clicked
}
