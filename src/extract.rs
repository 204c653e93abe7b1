//! Request extractors whose rejections go through [`AppError`].
//!
//! axum's own `Json` and `Query` reject with plain-text bodies and a mix of
//! 400/415/422 codes; these wrappers report every malformed input as a
//! 400 in the standard error envelope.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body extractor.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
