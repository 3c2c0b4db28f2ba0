use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use eframe::egui;
use parking_lot::Mutex;
use sw_core::{FnSubscriber, SlideChangeSubscriber, SlideOptions};
use sw_ui::{apply_theme, CarouselView, Theme};
use tracing::info;

mod demo;

use demo::AppConfig;

/// Slide changes observed through the carousel's notification hook
#[derive(Debug, Default)]
struct ChangeLog {
    count: usize,
    last: Option<Instant>,
}

struct SwipeDemoApp {
    view: CarouselView,
    changes: Arc<Mutex<ChangeLog>>,
    // Held so the weak registration stays alive
    _subscriber: Arc<dyn SlideChangeSubscriber>,
    show_offsets: bool,
}

impl SwipeDemoApp {
    fn new(cc: &eframe::CreationContext<'_>, view: CarouselView) -> Self {
        apply_theme(&cc.egui_ctx, &Theme::default());

        let changes = Arc::new(Mutex::new(ChangeLog::default()));
        let log = Arc::clone(&changes);
        let subscriber: Arc<dyn SlideChangeSubscriber> = Arc::new(FnSubscriber::new(move || {
            let mut log = log.lock();
            log.count += 1;
            log.last = Some(Instant::now());
        }));
        view.carousel().add_subscriber(&subscriber);

        Self {
            view,
            changes,
            _subscriber: subscriber,
            show_offsets: false,
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("◀ Prev").clicked() {
                self.view.carousel_mut().prev();
            }
            if ui.button("Next ▶").clicked() {
                self.view.carousel_mut().next();
            }

            ui.separator();

            let count = self.view.carousel().original_count();
            for index in 0..count {
                if ui.button(format!("{}", index + 1)).clicked() {
                    self.view.carousel_mut().slide_with(
                        index as isize,
                        SlideOptions {
                            speed_ms: None,
                            ignore_wrap: false,
                        },
                    );
                }
            }

            ui.separator();

            let carousel = self.view.carousel();
            ui.label(format!(
                "Slide {} of {}",
                carousel.original_index() + 1,
                carousel.original_count()
            ));

            let log = self.changes.lock();
            let since = log
                .last
                .map(|at| format!(" ({:.1}s ago)", at.elapsed().as_secs_f32()))
                .unwrap_or_default();
            ui.label(format!("Changes: {}{}", log.count, since));

            ui.checkbox(&mut self.show_offsets, "Offsets");
        });

        if self.show_offsets {
            let snapshot = self.view.carousel().snapshot();
            let offsets: Vec<String> = snapshot
                .offsets
                .iter()
                .map(|offset| format!("{:.0}", offset))
                .collect();
            ui.monospace(format!(
                "index={} width={:.0} continuous={} offsets=[{}]",
                snapshot.index,
                snapshot.width,
                snapshot.continuous,
                offsets.join(", ")
            ));
        }
    }
}

impl eframe::App for SwipeDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            self.controls(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let height = ui.available_height();
            self.view.ui(ui, height);
        });
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    info!(
        "Starting carousel demo with {} slides (continuous={})",
        config.slides.len(),
        config.carousel.continuous
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([320.0, 240.0]),
        default_theme: eframe::Theme::Dark,
        ..Default::default()
    };

    // Built before the window opens so config errors surface as a normal exit
    let view = CarouselView::new(config.slides, config.carousel, 900.0)?;

    eframe::run_native(
        "Swipe Carousel Demo",
        options,
        Box::new(move |cc| Box::new(SwipeDemoApp::new(cc, view))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
