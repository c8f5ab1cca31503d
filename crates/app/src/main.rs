use eframe::egui;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

mod pages;
mod selection;
mod state;
mod types;
mod utils;

pub use types::*;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let settings = utils::load_settings_or_default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        vsync: true,
        ..Default::default()
    };
    eframe::run_native(
        "Code Workbench",
        options,
        Box::new(move |_cc| {
            let mut state = AppState::new(settings);
            // Seed the chat model selector right away.
            state.fetch_models();
            Box::new(WorkbenchApp {
                state: Arc::new(Mutex::new(state)),
            })
        }),
    )
}

struct WorkbenchApp {
    state: Arc<Mutex<AppState>>,
}

impl eframe::App for WorkbenchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut s = self.state.lock();

        // Poll background work (non-blocking)
        s.poll_directory();
        s.poll_action();
        s.poll_models();
        s.poll_chat();
        s.expire_toast();

        // Keep polling while anything is in flight or a toast is counting
        // down.
        if s.busy || s.streaming || s.models_rx.is_some() || s.toast.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        render_header(&mut s, ctx);

        match s.current_page {
            Page::Analyzer => pages::analyzer::render(&mut s, ctx),
            Page::Chat => pages::chat::render(&mut s, ctx),
        }

        render_toast(&s, ctx);
    }
}

fn render_header(s: &mut AppState, ctx: &egui::Context) {
    egui::TopBottomPanel::top("header")
        .frame(egui::Frame::none().fill(egui::Color32::from_rgb(35, 35, 42)))
        .show(ctx, |ui| {
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                ui.add_space(16.0);
                ui.heading(
                    egui::RichText::new("Code Workbench")
                        .size(22.0)
                        .color(egui::Color32::from_rgb(220, 220, 230)),
                );
                ui.add_space(24.0);

                page_button(ui, "Analyzer & Tuner", Page::Analyzer, &mut s.current_page);
                page_button(ui, "Chat", Page::Chat, &mut s.current_page);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(16.0);
                    ui.label(
                        egui::RichText::new(s.settings.backend_url.as_str())
                            .size(11.0)
                            .color(egui::Color32::from_rgb(130, 130, 145)),
                    );
                    ui.label(
                        egui::RichText::new("backend:")
                            .size(11.0)
                            .color(egui::Color32::from_rgb(100, 100, 115)),
                    );
                });
            });
            ui.add_space(10.0);
        });
}

fn page_button(ui: &mut egui::Ui, label: &str, page: Page, current: &mut Page) {
    let active = *current == page;
    let button = egui::Button::new(
        egui::RichText::new(label)
            .size(14.0)
            .color(if active {
                egui::Color32::WHITE
            } else {
                egui::Color32::from_rgb(170, 170, 185)
            }),
    )
    .fill(if active {
        egui::Color32::from_rgb(70, 100, 180)
    } else {
        egui::Color32::TRANSPARENT
    })
    .rounding(egui::Rounding::same(6.0));

    if ui.add(button).clicked() {
        *current = page;
    }
}

fn render_toast(s: &AppState, ctx: &egui::Context) {
    let Some(toast) = &s.toast else {
        return;
    };
    egui::Area::new(egui::Id::new("toast"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            let fill = if toast.is_error {
                egui::Color32::from_rgb(150, 45, 45)
            } else {
                egui::Color32::from_rgb(45, 115, 65)
            };
            egui::Frame::none()
                .fill(fill)
                .rounding(egui::Rounding::same(8.0))
                .inner_margin(egui::Margin::symmetric(14.0, 10.0))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(toast.message.as_str()).color(egui::Color32::WHITE),
                    );
                });
        });
}
