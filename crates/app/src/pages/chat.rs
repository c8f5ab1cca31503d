//! Chat page: model selector, streaming transcript, and the editor pane
//! fed by code-block extraction.

use crate::types::AppState;
use eframe::egui;

pub fn render(s: &mut AppState, ctx: &egui::Context) {
    egui::SidePanel::right("editor_panel")
        .default_width(440.0)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("Editor");
            ui.label(
                egui::RichText::new("Filled from the first code block of the latest reply.")
                    .size(11.0)
                    .color(egui::Color32::from_rgb(130, 130, 145)),
            );
            ui.add_space(6.0);
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_sized(
                        ui.available_size(),
                        egui::TextEdit::multiline(&mut s.editor_content).code_editor(),
                    );
                });
        });

    egui::TopBottomPanel::bottom("chat_input").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let can_send =
                s.selected_model.is_some() && !s.streaming && !s.chat_input.trim().is_empty();
            let input = ui.add_sized(
                [ui.available_width() - 80.0, 28.0],
                egui::TextEdit::singleline(&mut s.chat_input).hint_text("Ask the model..."),
            );
            let entered = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let clicked = ui
                .add_enabled(can_send, egui::Button::new("Send"))
                .clicked();
            if clicked || (entered && can_send) {
                s.send_prompt();
            }
        });
        ui.add_space(6.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label("Model:");
            let current = s
                .selected_model
                .clone()
                .unwrap_or_else(|| "no models available".to_string());
            egui::ComboBox::from_id_source("model_select")
                .selected_text(current)
                .show_ui(ui, |ui| {
                    for name in &s.models {
                        ui.selectable_value(
                            &mut s.selected_model,
                            Some(name.clone()),
                            name.as_str(),
                        );
                    }
                });
            if ui
                .add_enabled(s.models_rx.is_none(), egui::Button::new("Refresh"))
                .clicked()
            {
                s.fetch_models();
            }
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for msg in &s.chat_history {
                    let (who, color) = if msg.role == "user" {
                        ("You", egui::Color32::from_rgb(120, 160, 240))
                    } else {
                        ("Assistant", egui::Color32::from_rgb(120, 210, 150))
                    };
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(who).strong().color(color));
                        ui.label(
                            egui::RichText::new(msg.timestamp.as_str())
                                .size(10.0)
                                .color(egui::Color32::from_rgb(110, 110, 125)),
                        );
                    });
                    ui.label(msg.content.as_str());
                    ui.add_space(10.0);
                }
                if s.streaming {
                    ui.spinner();
                }
            });
    });
}
