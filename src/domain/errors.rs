use thiserror::Error;

/// Result alias for dashboard loading steps
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors raised while loading and rendering the dashboard.
///
/// Every variant propagates to the single boundary in
/// [`DashboardLoader::load`](crate::application::dashboard::DashboardLoader::load),
/// which logs it and shows one generic alert.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Cannot load {path}: HTTP {status}")]
    Fetch { path: String, status: u16 },

    #[error("Request for {path} failed: {reason}")]
    Transport { path: String, reason: String },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Render target {target} unavailable: {reason}")]
    Render { target: String, reason: String },
}

impl DashboardError {
    /// Repository-relative path of the file involved, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            DashboardError::Fetch { path, .. }
            | DashboardError::Transport { path, .. }
            | DashboardError::Csv { path, .. } => Some(path),
            DashboardError::Render { .. } => None,
        }
    }
}
