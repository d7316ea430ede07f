use std::io::Write;
use std::thread;

use chrono::Local;
use log::info;

use crate::app::app_core::DashboardApp;
use crate::types::{ExportResult, Sample};

pub struct ExportHandler;

impl ExportHandler {
    /// Writes the current snapshot to a timestamped CSV on a background
    /// thread; the outcome comes back over a bounded result channel. Export
    /// is write-only: nothing is ever read back in.
    pub fn export_snapshot(app: &mut DashboardApp) {
        let snapshot = app.store.snapshot();
        if snapshot.is_empty() {
            app.state.export.export_status = "No data to export".to_string();
            return;
        }

        let (response_sender, response_receiver) =
            crossbeam_channel::bounded(app.config.channels.export_result_capacity);
        let path = format!("series_{}.csv", Local::now().format("%Y%m%d_%H%M%S"));

        thread::spawn(move || {
            let result = write_series_csv(&path, &snapshot);
            let _ = response_sender.send(result);
        });

        app.state.export.export_status = "Exporting series...".to_string();
        app.state.export.export_result_receiver = Some(response_receiver);
        info!("Export task started");
    }
}

fn write_series_csv(path: &str, samples: &[Sample]) -> ExportResult {
    match try_write(path, samples) {
        Ok(rows) => ExportResult::success(rows, path.to_string()),
        Err(e) => ExportResult::error(format!("Export failed: {}", e)),
    }
}

fn try_write(path: &str, samples: &[Sample]) -> std::io::Result<usize> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "x,y,z")?;
    for sample in samples {
        writeln!(file, "{},{},{}", sample.x, sample.y, sample.z)?;
    }
    Ok(samples.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let path = std::env::temp_dir().join("stridehub_export_test.csv");
        let path = path.to_str().unwrap();
        let samples = vec![Sample::new(1.0, 2.0, 3.0), Sample::new(4.5, 5.5, 6.5)];

        let result = write_series_csv(path, &samples);
        assert!(result.is_success());
        assert_eq!(result.rows_written, 2);

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, "x,y,z\n1,2,3\n4.5,5.5,6.5\n");
        std::fs::remove_file(path).unwrap();
    }
}
