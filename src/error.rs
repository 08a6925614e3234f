use reqwest::StatusCode;
use thiserror::Error;

/// Outcome taxonomy for one API round trip. 404 and 401 are distinguished
/// from generic failure so the surface can word them for the user.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("file not found on the server")]
    NotFound,
    #[error("not authorized (log in first, and only owners may modify a file)")]
    Unauthorized,
    #[error("server returned {status}: {body}")]
    Unexpected { status: StatusCode, body: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    pub fn from_status(status: StatusCode, body: String) -> ApiError {
        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound,
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            _ => ApiError::Unexpected { status, body },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_status_codes_to_variants() {
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, String::new()),
            ApiError::NotFound
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ApiError::Unauthorized
        ));
        match ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".into()) {
            ApiError::Unexpected { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
