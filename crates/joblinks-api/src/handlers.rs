//! Request handlers.

pub mod applications;
pub mod auth;
pub mod chat_users;
pub mod chats;
pub mod companies;
pub mod company_members;
pub mod health;
pub mod opportunities;
pub mod users;

pub use health::*;

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};

/// JSON body extractor whose rejections render as `ApiError` (400 with `detail`).
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections render as `ApiError`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Query-string extractor whose rejections render as `ApiError`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `201 Created` with a `Location` header pointing at the new resource.
pub fn created<T: Serialize>(location: String, body: T) -> Response {
    (StatusCode::CREATED, [(LOCATION, location)], Json(body)).into_response()
}

/// A body that names an id must name the one in the path.
pub fn ensure_same_id(path_id: i32, body_id: Option<i32>) -> ApiResult<()> {
    match body_id {
        Some(body_id) if body_id != path_id => Err(ApiError::bad_request(format!(
            "Path id {path_id} does not match body id {body_id}."
        ))),
        _ => Ok(()),
    }
}
