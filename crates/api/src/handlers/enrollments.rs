use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use enrollments::{EnrollmentError, EnrollmentView, NewEnrollment};
use serde::Deserialize;

use crate::{error::ApiError, extract::AuthUser, AppState};

#[derive(Deserialize)]
pub struct CepQuery {
    pub cep: String,
}

pub async fn get_by_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<EnrollmentView>, ApiError> {
    let enrollment = state.service.get_one_with_address_by_user_id(user_id).await?;
    Ok(Json(enrollment))
}

pub async fn create_or_update(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<NewEnrollment>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .create_or_update_enrollment_with_address(user_id, payload)
        .await?;
    Ok(StatusCode::OK)
}

/// An unknown postal code is `204 No Content` rather than an error.
pub async fn address_from_cep(
    State(state): State<AppState>,
    Query(query): Query<CepQuery>,
) -> Result<Response, ApiError> {
    match state.service.get_address_from_cep(&query.cep).await {
        Ok(address) => Ok(Json(address).into_response()),
        Err(EnrollmentError::NotFound) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(e) => Err(e.into()),
    }
}
