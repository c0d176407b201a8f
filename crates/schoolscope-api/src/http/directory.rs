//! Directory service handlers: free-text search and single-school lookup.

use std::sync::Arc;

use axum::{Json, extract::State};
use schoolscope_data::SearchTerm;

use crate::http::errors::ApiError;
use crate::models::{
    GetMatchingSchoolsRequest, GetMatchingSchoolsResponse, GetSchoolRequest, GetSchoolResponse,
};
use crate::state::ApiState;

/// Free-text school search over current-year directory rows.
pub(crate) async fn get_matching_schools(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<GetMatchingSchoolsRequest>,
) -> Result<Json<GetMatchingSchoolsResponse>, ApiError> {
    // Validation happens before the store is touched.
    let term = SearchTerm::parse(&request.search_term)
        .map_err(|_| ApiError::invalid_argument("search term cannot be empty"))?;

    let results = state
        .store
        .search_schools(&term)
        .await
        .map_err(|error| ApiError::from_data("search_schools", &error))?;

    if results.is_empty() {
        return Err(ApiError::not_found("no results found"));
    }

    Ok(Json(GetMatchingSchoolsResponse { results }))
}

/// Directory detail for one school and year.
pub(crate) async fn get_school(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<GetSchoolRequest>,
) -> Result<Json<GetSchoolResponse>, ApiError> {
    let school = state
        .store
        .get_school(&request.ncessch, &request.school_year)
        .await
        .map_err(|error| ApiError::from_data("get_school", &error))?
        .ok_or_else(|| ApiError::not_found("No school found for this school and year"))?;

    Ok(Json(GetSchoolResponse { school }))
}
