//! Extractors whose rejections render as [`ServerError`] bodies.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ServerError;

/// `axum::Json` with malformed bodies mapped to 400 and schema errors to 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` with unparseable segments mapped to 422.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ServerError))]
pub struct ApiPath<T>(pub T);
