use std::time::Duration;

use eframe::{egui, Frame};
use log::{error, info};

use crate::config::AppConfig;
use crate::metrics;
use crate::store::SeriesStore;
use crate::types::LinkEvent;

use super::state::AppState;

pub struct DashboardApp {
    // 统一的状态管理
    pub state: AppState,

    // 配置管理
    pub config: AppConfig,

    /// Shared handle to the accumulated series; the ingestion thread holds
    /// a clone of the same store.
    pub store: SeriesStore,
}

impl DashboardApp {
    pub fn new(
        store: SeriesStore,
        link_receiver: crossbeam_channel::Receiver<LinkEvent>,
        config: AppConfig,
    ) -> Self {
        let state = AppState::new(link_receiver, config.metrics.default_weight_kg);

        info!("Dashboard started, waiting for sensor data...");

        DashboardApp {
            state,
            config,
            store,
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 设置明亮模式主题
        ctx.set_visuals(egui::Visuals::light());

        // 渲染UI组件
        crate::app::ui::render_status_bar(self, ctx);
        crate::app::ui::render_main_panel(self, ctx);

        // 处理各种结果
        self.handle_link_events();
        self.handle_export_results();

        // Metrics are recomputed from a fresh snapshot on every repaint;
        // nothing is cached between requests.
        self.refresh_metrics();

        ctx.request_repaint_after(Duration::from_millis(
            self.config.metrics.refresh_interval_ms,
        ));
    }
}

impl DashboardApp {
    fn handle_link_events(&mut self) {
        while let Ok(event) = self.state.link_receiver.try_recv() {
            if let LinkEvent::Fatal(ref reason) = event {
                error!("Ingestion failed: {}", reason);
            }
            self.state.link = event;
        }
    }

    fn handle_export_results(&mut self) {
        if let Some(receiver) = &self.state.export.export_result_receiver {
            if let Ok(result) = receiver.try_recv() {
                if result.is_success() {
                    self.state.export.export_status =
                        format!("Exported {} samples to {}", result.rows_written, result.path);
                    info!(
                        "Export completed: {} samples -> {}",
                        result.rows_written, result.path
                    );
                } else {
                    self.state.export.export_status =
                        result.error.unwrap_or_else(|| "Export failed".to_string());
                }
                self.state.export.export_result_receiver = None; // 清除接收器
            }
        }
    }

    fn refresh_metrics(&mut self) {
        let snapshot = self.store.snapshot();
        self.state.metrics.result = metrics::compute(&snapshot, self.state.metrics.weight_kg);
    }

    /// Operator reset: truncates the shared series. The store stays live
    /// and ingestion keeps appending to it.
    pub fn clear_series(&mut self) {
        self.store.clear();
        info!("Series cleared by operator");
    }
}
