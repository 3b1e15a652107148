//! Request extractors

use axum::extract::FromRequest;

use crate::AppError;

/// JSON body whose rejections render as `AppError`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
