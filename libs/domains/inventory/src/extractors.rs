//! Request extractors that report failures as [`InventoryError`].

use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

use crate::error::InventoryError;

/// JSON body extractor whose rejections use the inventory error body.
///
/// Missing or mistyped fields, syntax errors and a wrong content type all
/// become `400 INVALID_ARGUMENT` instead of axum's plain-text rejection.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = InventoryError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| InventoryError::InvalidArgument(rejection.body_text()))?;

        Ok(JsonBody(data))
    }
}
