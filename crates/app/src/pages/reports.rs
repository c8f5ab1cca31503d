//! Read-only report views for the Analyzer page.
//!
//! Both reports are backend-produced documents; rendering never
//! interprets them beyond the documented field names.

use crate::types::AppState;
use eframe::egui;
use serde_json::Value;

const MUTED: egui::Color32 = egui::Color32::from_rgb(130, 130, 145);

pub fn render_analysis(s: &mut AppState, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        if ui.button("← Back to selection").clicked() {
            s.close_reports();
            return;
        }
        let Some(report) = &s.analysis_report else {
            return;
        };

        ui.add_space(8.0);
        ui.heading(report.title.as_str());
        ui.label(
            egui::RichText::new(format!("Overall score: {}/100", report.overall_score))
                .size(18.0)
                .strong(),
        );
        ui.add_space(8.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for category in &report.categories {
                    egui::Frame::group(ui.style())
                        .rounding(egui::Rounding::same(8.0))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(
                                    egui::RichText::new(category.name.as_str()).size(16.0).strong(),
                                );
                                ui.label(
                                    egui::RichText::new(category.grade.as_str())
                                        .color(grade_color(&category.grade)),
                                );
                                if let Some(score) = category.score {
                                    ui.label(
                                        egui::RichText::new(format!("({}/100)", score))
                                            .color(MUTED),
                                    );
                                }
                            });
                            ui.label(category.summary.as_str());
                            if let Some(explanation) = &category.explanation {
                                ui.label(egui::RichText::new(explanation.as_str()).color(MUTED));
                            }
                            if let Some(recommendations) = &category.recommendations {
                                ui.label(
                                    egui::RichText::new(format!(
                                        "Recommendations: {}",
                                        recommendations
                                    ))
                                    .italics(),
                                );
                            }
                            if !category.details.is_null() {
                                egui::CollapsingHeader::new("Details")
                                    .id_source(&category.name)
                                    .show(ui, |ui| {
                                        render_details(ui, &category.details);
                                    });
                            }
                        });
                    ui.add_space(6.0);
                }
            });
    });
}

pub fn render_testing(s: &mut AppState, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        if ui.button("← Back to selection").clicked() {
            s.close_reports();
            return;
        }
        let Some(report) = &s.testing_report else {
            return;
        };

        ui.add_space(8.0);
        ui.heading("Testing Report");
        let status = &report.summary.overall_status;
        let status_color = if status == "Success" {
            egui::Color32::from_rgb(90, 190, 120)
        } else {
            egui::Color32::from_rgb(220, 100, 100)
        };
        ui.label(
            egui::RichText::new(format!("Status: {}", status))
                .size(16.0)
                .color(status_color),
        );
        if let Some(message) = &report.summary.message {
            ui.label(egui::RichText::new(message.as_str()).color(MUTED));
        }
        ui.add_space(8.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                section(ui, "Coverage", |ui| {
                    match &report.coverage_analysis.summary {
                        Some(cov) => {
                            ui.label(
                                egui::RichText::new(format!(
                                    "Covered: {}",
                                    cov.percent_covered_display
                                ))
                                .size(15.0),
                            );
                        }
                        None => {
                            let note = report
                                .coverage_analysis
                                .message
                                .as_deref()
                                .unwrap_or("No coverage data.");
                            ui.label(egui::RichText::new(note).color(MUTED));
                        }
                    }
                });

                section(ui, "Mutation Testing", |ui| {
                    if let Some(score) = &report.mutation_testing.score {
                        ui.label(format!("Mutation score: {}", score));
                    } else if let Some(message) = &report.mutation_testing.message {
                        ui.label(egui::RichText::new(message.as_str()).color(MUTED));
                    }
                    if let Some(raw) = &report.mutation_testing.raw_report {
                        egui::CollapsingHeader::new("Raw report").show(ui, |ui| {
                            ui.label(egui::RichText::new(raw.as_str()).monospace());
                        });
                    }
                });

                section(ui, "AI Test Generation", |ui| {
                    let gemini = &report.gemini_test_generation;
                    if let Some(message) = &gemini.message {
                        ui.label(egui::RichText::new(message.as_str()).color(MUTED));
                    }
                    if let Some(count) = gemini.test_suites_generated {
                        ui.label(format!("Test suites generated: {}", count));
                    }
                    for test in &gemini.generated_tests {
                        egui::CollapsingHeader::new(test.filename.as_str())
                            .id_source(&test.filename)
                            .show(ui, |ui| {
                                ui.label(egui::RichText::new(test.code.as_str()).monospace());
                            });
                    }
                    for error in &gemini.errors {
                        ui.label(
                            egui::RichText::new(error.as_str())
                                .color(egui::Color32::from_rgb(220, 100, 100)),
                        );
                    }
                });

                section(ui, "Search-based Test Generation", |ui| {
                    render_details(ui, &report.pynguin_test_generation);
                });
            });
    });
}

fn section(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::group(ui.style())
        .rounding(egui::Rounding::same(8.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(title).size(16.0).strong());
            add_contents(ui);
        });
    ui.add_space(6.0);
}

/// Generic metric/value rendering for opaque report sub-documents.
fn render_details(ui: &mut egui::Ui, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(key.as_str()).monospace());
                    ui.label(display_value(val));
                });
            }
        }
        Value::Array(items) => {
            for item in items {
                ui.label(display_value(item));
            }
        }
        Value::Null => {}
        other => {
            ui.label(display_value(other));
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn grade_color(grade: &str) -> egui::Color32 {
    // Grades look like "B (Good)"; key off the letter.
    match grade.chars().next() {
        Some('A') => egui::Color32::from_rgb(90, 190, 120),
        Some('B') => egui::Color32::from_rgb(150, 190, 90),
        Some('C') => egui::Color32::from_rgb(220, 180, 80),
        Some('D') => egui::Color32::from_rgb(230, 140, 80),
        _ => egui::Color32::from_rgb(220, 100, 100),
    }
}
