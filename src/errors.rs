use axum::http::StatusCode;

/// Failures of the load-derive pipeline.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// The remote case table could not be fetched (network, timeout, HTTP status).
    #[error("unable to load current data: {0}")]
    Fetch(String),

    /// The payload was fetched but did not have the expected shape.
    #[error("unable to parse case data: {0}")]
    Parse(String),

    #[error("unknown district: {0}")]
    UnknownDistrict(String),
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return DashboardError::Fetch(format!("request timed out: {err}"));
        }
        DashboardError::Fetch(err.to_string())
    }
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        DashboardError::Parse(err.to_string())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Fetch(_) | DashboardError::Parse(_) => {
                Self::bad_gateway(err.to_string())
            }
            DashboardError::UnknownDistrict(_) => Self::bad_request(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
