#![windows_subsystem = "windows"]
//! Media Gallery - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod catalog;
mod constants;
mod gallery;
mod settings;
mod theme;
mod ui;
mod utils;

use app::{App, MediaLoader};
use constants::*;
use eframe::egui;
use gallery::GallerySection;
use tracing::info;
use utils::{get_cache_dir, get_data_dir, rasterize_icon};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "media-gallery.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,media_gallery=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Media Gallery starting");

    let settings = settings::Settings::load(&data_dir);
    let catalog_path = settings.catalog_path_or_default(&data_dir);
    let items = catalog::load_or_default(&catalog_path);
    let section = GallerySection::new(
        items,
        settings.initial_visible_count,
        settings.load_more_count,
    );

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(settings.window_w, settings.window_h))
        .with_min_inner_size([360.0, 480.0])
        .with_title(APP_NAME);

    if let Some((rgba, width, height)) = rasterize_icon(256) {
        let icon = egui::IconData { rgba, width, height };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let loader = MediaLoader::new(
                get_cache_dir(&data_dir),
                settings.max_concurrent_fetches,
            )?;
            Ok(Box::new(App::new(cc, section, loader, settings)))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::symmetric(24, 20)),
            )
            .show(ctx, |ui| {
                self.render_header(ui);
                self.render_gallery(ui);
            });

        // Drawn after the grid so a click this frame opens immediately
        self.render_lightbox(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.loader.shutdown();
    }
}
