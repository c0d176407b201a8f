//! Membership service handlers: enrollment history and yearly summary.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::http::errors::ApiError;
use crate::models::{
    GetMembershipRequest, GetMembershipResponse, GetMembershipSummaryRequest,
    GetMembershipSummaryResponse,
};
use crate::state::ApiState;

/// Per-year enrollment history for one school.
pub(crate) async fn get_membership(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<GetMembershipRequest>,
) -> Result<Json<GetMembershipResponse>, ApiError> {
    let by_year = state
        .store
        .enrollment_history(&request.ncessch)
        .await
        .map_err(|error| ApiError::from_data("enrollment_history", &error))?;

    if by_year.is_empty() {
        return Err(ApiError::not_found(
            "no enrollment data available for this school",
        ));
    }

    Ok(Json(GetMembershipResponse {
        ncessch: request.ncessch,
        by_year,
    }))
}

/// Enrollment summary for one school and year.
pub(crate) async fn get_membership_summary(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<GetMembershipSummaryRequest>,
) -> Result<Json<GetMembershipSummaryResponse>, ApiError> {
    let summary = state
        .store
        .enrollment_summary(&request.ncessch, &request.school_year)
        .await
        .map_err(|error| ApiError::from_data("enrollment_summary", &error))?
        .ok_or_else(|| {
            ApiError::not_found("no enrollment data available for this school and year")
        })?;

    Ok(Json(GetMembershipSummaryResponse {
        ncessch: request.ncessch,
        summary,
    }))
}
