use axum::{
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;

/// Optional paging; omitting `limit` returns every row
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PaginationParams {
    #[param(minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
    #[param(default = 0, minimum = 0)]
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamped `(limit, offset)`, or `None` when no paging was requested
    pub fn window(&self) -> Option<(u64, u64)> {
        let limit = self.limit?.clamp(1, 100) as u64;
        let offset = self.offset.unwrap_or(0).max(0) as u64;
        Some((limit, offset))
    }
}

/// `302 Found` redirect, as issued after a successful form post
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}
