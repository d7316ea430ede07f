use crossbeam_channel::Receiver;

use crate::types::{ExportResult, LinkEvent, MetricsResult};

/// 应用状态管理模块
/// 仪表盘的全部可变状态，与渲染代码分离

/// Operator inputs and the figures derived from them.
#[derive(Debug, Clone)]
pub struct MetricsState {
    pub weight_kg: f64,
    pub result: MetricsResult,
}

impl Default for MetricsState {
    fn default() -> Self {
        Self {
            weight_kg: 0.0,
            result: MetricsResult::zero(),
        }
    }
}

/// 导出状态
#[derive(Debug)]
pub struct ExportState {
    pub export_status: String,
    pub export_result_receiver: Option<Receiver<ExportResult>>,
}

impl Default for ExportState {
    fn default() -> Self {
        Self {
            export_status: String::new(),
            export_result_receiver: None,
        }
    }
}

/// 统一的应用状态管理
#[derive(Debug)]
pub struct AppState {
    /// Latest link-state transition reported by the ingestion thread.
    pub link: LinkEvent,
    pub link_receiver: Receiver<LinkEvent>,
    pub metrics: MetricsState,
    pub export: ExportState,
}

impl AppState {
    pub fn new(link_receiver: Receiver<LinkEvent>, default_weight_kg: f64) -> Self {
        Self {
            link: LinkEvent::Connecting,
            link_receiver,
            metrics: MetricsState {
                weight_kg: default_weight_kg,
                ..Default::default()
            },
            export: ExportState::default(),
        }
    }

    /// 获取当前状态摘要
    pub fn link_summary(&self) -> &'static str {
        match self.link {
            LinkEvent::Connecting => "Connecting",
            LinkEvent::Connected => "Connected",
            LinkEvent::Streaming => "Streaming",
            LinkEvent::Fatal(_) => "Link down",
        }
    }
}
