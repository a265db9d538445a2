use axum::{
    http,
    response::{IntoResponse, Response},
};
use bb_client::collection::CollectionError;
use bb_client::source::SourceError;

pub type WebResult<T> = std::result::Result<T, WebError>;

#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Internal Server Error: {0}")]
    Internal(#[from] anyhow::Error),
    #[error("Templating error: {0:#}")]
    Template(#[from] minijinja::Error),
    #[error("{0}")]
    Source(#[from] SourceError),
    #[error("{0}")]
    Collection(#[from] CollectionError),
    #[error("Not found")]
    NotFound,
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            WebError::Internal(_) | WebError::Template(_) => {
                tracing::error!("{}", message);
                (http::StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            WebError::Source(SourceError::Validation(_)) => {
                (http::StatusCode::BAD_REQUEST, message).into_response()
            }
            WebError::Source(SourceError::NotFound) | WebError::NotFound => {
                (http::StatusCode::NOT_FOUND, "Not Found").into_response()
            }
            WebError::Source(SourceError::Unavailable(_)) => (
                http::StatusCode::BAD_GATEWAY,
                "Error loading cocktails. Please try again.",
            )
                .into_response(),
            WebError::Collection(CollectionError::Validation(_)) => {
                (http::StatusCode::BAD_REQUEST, message).into_response()
            }
            WebError::Collection(_) => {
                tracing::error!("{}", message);
                (http::StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}
