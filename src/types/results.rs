/// Result of a CSV export operation
#[derive(Debug)]
pub struct ExportResult {
    pub rows_written: usize,
    pub path: String,
    pub error: Option<String>,
}

impl ExportResult {
    pub fn success(rows_written: usize, path: String) -> Self {
        Self {
            rows_written,
            path,
            error: None,
        }
    }

    pub fn error(error: String) -> Self {
        Self {
            rows_written: 0,
            path: String::new(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
