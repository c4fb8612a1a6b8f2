//! Extractors that turn axum rejections into `LabError` responses.

use crate::error::LabError;
use apilab_schema::Validate;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// JSON body; decode failures become 422.
pub struct LabJson<T>(pub T);

impl<S, T> FromRequest<S> for LabJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = LabError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// JSON body that must also pass `Validate`.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = LabError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let LabJson(value) = LabJson::<T>::from_request(req, state).await?;
        value.validate().map_err(LabError::invalid)?;
        Ok(Self(value))
    }
}

/// Path parameters; type mismatches become 422.
pub struct LabPath<T>(pub T);

impl<S, T> FromRequestParts<S> for LabPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = LabError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Query string; type mismatches become 422.
pub struct LabQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for LabQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = LabError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}
