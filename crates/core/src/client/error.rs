use std::fmt;

/// Failure talking to a dashboard backend, kept structured so callers can log the status.
#[derive(Debug, Clone)]
pub struct BackendDiagnosticsError {
    pub backend: &'static str,
    pub path: String,
    pub status: Option<u16>,
    pub detail: String,
}

impl fmt::Display for BackendDiagnosticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "backend error (backend={}, path={}, status={status}): {}",
                self.backend, self.path, self.detail
            ),
            None => write!(
                f,
                "backend error (backend={}, path={}): {}",
                self.backend, self.path, self.detail
            ),
        }
    }
}

impl std::error::Error for BackendDiagnosticsError {}
