//! Request input extractor
//!
//! Callers send the same fields as a JSON body, a form-urlencoded body or a
//! query string; the Content-Type decides which.

use crate::ApiError;

use std::future::Future;
use std::panic::Location;

use axum::{
    Form, Json,
    extract::{FromRequest, Query, Request},
    http::header::CONTENT_TYPE,
};
use error_location::ErrorLocation;
use serde::de::DeserializeOwned;

pub struct RequestParams<T>(pub T);

impl<T, S> FromRequest<S> for RequestParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request(
        req: Request,
        state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let content_type = req
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_ascii_lowercase();

            if content_type.starts_with("application/json") {
                let Json(params) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(|e| bad_request(e.body_text()))?;
                return Ok(Self(params));
            }

            if content_type.starts_with("application/x-www-form-urlencoded") {
                let Form(params) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|e| bad_request(e.body_text()))?;
                return Ok(Self(params));
            }

            let Query(params) =
                Query::<T>::try_from_uri(req.uri()).map_err(|e| bad_request(e.body_text()))?;
            Ok(Self(params))
        }
    }
}

#[track_caller]
fn bad_request(message: String) -> ApiError {
    ApiError::BadRequest {
        message,
        location: ErrorLocation::from(Location::caller()),
    }
}
