use eframe::egui;

use crate::app::app_core::DashboardApp;
use crate::types::LinkEvent;

pub fn render_status_bar(app: &mut DashboardApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("status_bar")
        .min_height(40.0)
        .show(ctx, |ui| {
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.label("Link:");

                let status_color = match app.state.link {
                    LinkEvent::Connecting => egui::Color32::from_rgb(255, 165, 0), // 橙色
                    LinkEvent::Connected => egui::Color32::from_rgb(0, 100, 200),
                    LinkEvent::Streaming => egui::Color32::from_rgb(0, 150, 0), // 绿色
                    LinkEvent::Fatal(_) => egui::Color32::from_rgb(150, 0, 0),  // 红色
                };
                ui.colored_label(status_color, app.state.link_summary());

                if let LinkEvent::Fatal(ref reason) = app.state.link {
                    ui.separator();
                    ui.colored_label(egui::Color32::from_rgb(150, 0, 0), reason);
                }

                ui.separator();
                ui.label(format!("Device: {}", app.config.connection.device_id));

                ui.separator();
                ui.label(format!("Samples: {}", app.state.metrics.result.sample_count));

                // 在最右边添加导出按钮
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("📤 Export CSV").clicked() {
                        crate::app::handlers::ExportHandler::export_snapshot(app);
                    }

                    if !app.state.export.export_status.is_empty() {
                        ui.colored_label(
                            egui::Color32::from_rgb(0, 150, 100),
                            &app.state.export.export_status,
                        );
                        ui.separator();
                    }
                });
            });
            ui.add_space(5.0);
        });
}
