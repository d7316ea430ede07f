pub mod sample;
pub mod metrics;
pub mod events;
pub mod results;

pub use sample::{Sample, SampleBatch};
pub use metrics::{ChartBar, MetricsResult};
pub use events::LinkEvent;
pub use results::ExportResult;
