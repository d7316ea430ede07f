use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};

use crate::app::app_core::DashboardApp;

pub fn render_main_panel(app: &mut DashboardApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Caloric Expenditure Calculator");
        ui.add_space(10.0);

        // 控制面板
        ui.horizontal(|ui| {
            ui.label("Weight (kg):");
            ui.add(
                egui::DragValue::new(&mut app.state.metrics.weight_kg)
                    .speed(0.5)
                    .range(0.0..=500.0),
            );

            ui.separator();

            if ui.button("🗑 Clear data").clicked() {
                app.clear_series();
            }
        });
        ui.add_space(10.0);

        // 指标显示
        let result = app.state.metrics.result.clone();
        ui.group(|ui| {
            ui.label(format!("Distance covered: {:.2} m", result.distance));
            ui.label(format!("Speed: {:.2} m/s", result.speed));
            ui.label(format!(
                "Caloric expenditure per minute: {:.2} Cal",
                result.calories_per_minute
            ));
            ui.label(format!(
                "Total caloric expenditure: {:.2} Cal",
                result.total_calories
            ));
        });
        ui.add_space(10.0);

        render_metrics_chart(app, ui);
    });
}

/// 运动统计柱状图
fn render_metrics_chart(app: &DashboardApp, ui: &mut egui::Ui) {
    let bars = app.state.metrics.result.chart_bars();

    let labels: Vec<&'static str> = bars.iter().map(|bar| bar.label).collect();
    let chart_bars: Vec<Bar> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| Bar::new(i as f64, bar.value).width(0.6).name(bar.label))
        .collect();

    ui.heading("Run Statistics");
    Plot::new("metrics_chart")
        .height(280.0)
        .allow_drag(false)
        .allow_zoom(false)
        .x_axis_formatter(move |v, _| {
            let index = v.value.round() as usize;
            if (v.value - index as f64).abs() < 1e-6 {
                labels.get(index).copied().unwrap_or("").to_string()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("Metrics", chart_bars));
        });
}
