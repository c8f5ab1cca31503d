//! Analyzer & Tuner page: path input, checkbox tree, action buttons.
//!
//! Three mutually exclusive views: the selection screen, the Analysis
//! Report, or the Testing Report, chosen by whichever report slot is
//! populated.

use crate::selection::toggle_selection;
use crate::types::{ActionKind, AppState};
use eframe::egui;
use shared::api::DirectoryNode;
use std::collections::HashSet;

pub fn render(s: &mut AppState, ctx: &egui::Context) {
    if s.analysis_report.is_some() {
        super::reports::render_analysis(s, ctx);
        return;
    }
    if s.testing_report.is_some() {
        super::reports::render_testing(s, ctx);
        return;
    }
    render_selection_screen(s, ctx);
}

fn render_selection_screen(s: &mut AppState, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Project Analyzer & Tuner");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Project path:");
            let input = ui.add_sized(
                [420.0, 24.0],
                egui::TextEdit::singleline(&mut s.path_input).hint_text("/path/to/project"),
            );
            let submitted =
                input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let clicked = ui
                .add_enabled(!s.busy, egui::Button::new("Load"))
                .clicked();
            if clicked || (submitted && !s.busy) {
                s.load_directory();
            }
        });

        ui.add_space(8.0);

        ui.horizontal(|ui| {
            let ready = !s.busy && s.tree.is_some();
            if ui
                .add_enabled(ready, egui::Button::new("Analyze Code"))
                .clicked()
            {
                s.run_action(ActionKind::Analysis);
            }
            if ui
                .add_enabled(ready, egui::Button::new("Run Testing Pipeline"))
                .clicked()
            {
                s.run_action(ActionKind::Testing);
            }
            if ui
                .add_enabled(ready, egui::Button::new("Fine-tune Model"))
                .clicked()
            {
                s.run_action(ActionKind::Finetune);
            }
            if s.busy {
                ui.spinner();
                ui.label(s.busy_label.as_str());
            } else if !s.selected.is_empty() {
                ui.label(
                    egui::RichText::new(format!("{} selected", s.selected.len()))
                        .color(egui::Color32::from_rgb(130, 130, 145)),
                );
            }
        });

        ui.add_space(8.0);
        ui.separator();

        if s.tree.is_some() {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if let Some(tree) = &s.tree {
                        render_node(ui, tree, &mut s.selected);
                    }
                });
        } else {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("Load a project directory to select files for analysis.")
                        .color(egui::Color32::from_rgb(130, 130, 145)),
                );
            });
        }
    });
}

fn render_node(ui: &mut egui::Ui, node: &DirectoryNode, selected: &mut HashSet<String>) {
    let mut checked = selected.contains(&node.path);
    let label = if node.is_folder() {
        format!("📁 {}", node.name)
    } else {
        format!("📄 {}", node.name)
    };
    if ui.checkbox(&mut checked, label).changed() {
        toggle_selection(selected, node, checked);
    }
    if node.is_folder() && !node.children.is_empty() {
        ui.indent(&node.path, |ui| {
            for child in &node.children {
                render_node(ui, child, selected);
            }
        });
    }
}
