use remarque_api::Error as ApiError;

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ServerError(#[from] pub ApiError);

impl axum::response::IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let err = self.0;
        match &err {
            ApiError::Unknown(_) => tracing::error!(%err, "internal server error"),
            _ => tracing::info!("returning error to client: {err}"),
        }
        (
            err.status_code(),
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            err.contents(),
        )
            .into_response()
    }
}
