//! Wire-level request and response bodies.
//!
//! Requests tolerate omitted fields (the Connect JSON encoding drops empty
//! strings); validation happens in the handlers, not during deserialisation.

use schoolscope_data::{Enrollment, School, SchoolSearch};
use serde::{Deserialize, Serialize};

/// Free-text school search request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetMatchingSchoolsRequest {
    /// Raw user-entered search text.
    pub search_term: String,
}

/// Free-text school search response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMatchingSchoolsResponse {
    /// Matching schools, most recent school year first.
    pub results: Vec<SchoolSearch>,
}

/// Single-school directory lookup request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetSchoolRequest {
    /// NCES school identifier.
    pub ncessch: String,
    /// School year to look up.
    pub school_year: String,
}

/// Single-school directory lookup response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSchoolResponse {
    /// The matching directory row.
    pub school: School,
}

/// Enrollment history request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetMembershipRequest {
    /// NCES school identifier.
    pub ncessch: String,
}

/// Enrollment history response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMembershipResponse {
    /// NCES school identifier the history covers.
    pub ncessch: String,
    /// One row per school year, most recent first.
    pub by_year: Vec<Enrollment>,
}

/// Single-year enrollment summary request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetMembershipSummaryRequest {
    /// NCES school identifier.
    pub ncessch: String,
    /// School year to summarise.
    pub school_year: String,
}

/// Single-year enrollment summary response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMembershipSummaryResponse {
    /// NCES school identifier the summary covers.
    pub ncessch: String,
    /// Enrollment counts for the requested year.
    pub summary: Enrollment,
}
