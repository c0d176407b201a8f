//! Row projections returned by the warehouse.
//!
//! Field names equal the warehouse column names so `FromRow` binds by name
//! with no mapping layer; serde renames produce the camelCase wire shape the
//! API serves. Rows therefore flow from the warehouse to the response body
//! untouched.

use serde::Serialize;
use sqlx::FromRow;

/// A single free-text search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SchoolSearch {
    /// NCES school identifier.
    pub ncessch: String,
    /// School name as recorded in the directory.
    pub sch_name: String,
    /// School year of the directory row (e.g., `2023-2024`).
    pub school_year: String,
}

/// Full directory projection for a single school and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct School {
    /// NCES school identifier.
    pub ncessch: String,
    /// School name.
    pub sch_name: String,
    /// School year of the directory row.
    pub school_year: String,
    /// Instructional level (elementary, middle, high, other).
    pub sch_level: String,
    /// School type code.
    pub sch_type: i16,
    /// Start-of-year operational status code.
    pub sy_status: i16,
    /// Updated operational status code.
    pub sy_status_updated: i16,
    /// Charter school indicator.
    pub charter: String,
    /// Two-letter state code.
    pub state_code: String,
    /// State-assigned local education agency identifier.
    pub state_leaid: String,
    /// Pre-kindergarten offered.
    pub grade_pk: bool,
    /// Kindergarten offered.
    #[serde(rename = "gradeK")]
    pub grade_kg: bool,
    /// Grade 1 offered.
    pub grade_01: bool,
    /// Grade 2 offered.
    pub grade_02: bool,
    /// Grade 3 offered.
    pub grade_03: bool,
    /// Grade 4 offered.
    pub grade_04: bool,
    /// Grade 5 offered.
    pub grade_05: bool,
    /// Grade 6 offered.
    pub grade_06: bool,
    /// Grade 7 offered.
    pub grade_07: bool,
    /// Grade 8 offered.
    pub grade_08: bool,
    /// Grade 9 offered.
    pub grade_09: bool,
    /// Grade 10 offered.
    pub grade_10: bool,
    /// Grade 11 offered.
    pub grade_11: bool,
    /// Grade 12 offered.
    pub grade_12: bool,
    /// Grade 13 offered.
    pub grade_13: bool,
    /// Ungraded students served.
    #[serde(rename = "ungraded")]
    pub grade_ug: bool,
    /// Adult education students served.
    #[serde(rename = "adultEducation")]
    pub grade_ae: bool,
}

/// Enrollment counts for a single school and year.
///
/// Serves both the historical list (one row per year) and the single-year
/// summary lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// NCES school identifier.
    pub ncessch: String,
    /// School year the counts cover.
    pub school_year: String,
    /// Total reported enrollment.
    pub total_enrollment: i64,
    /// White students.
    pub white: i64,
    /// Black or African American students.
    pub black: i64,
    /// Hispanic/Latino students.
    pub hispanic: i64,
    /// Asian students.
    pub asian: i64,
    /// American Indian or Alaska Native students.
    pub native_american: i64,
    /// Native Hawaiian or Other Pacific Islander students.
    pub pacific_islander: i64,
    /// Students of two or more races.
    pub multiracial: i64,
    /// Male students.
    pub male: i64,
    /// Female students.
    pub female: i64,
    /// Pre-kindergarten students.
    pub grade_pk: i64,
    /// Kindergarten students.
    pub grade_k: i64,
    /// Grade 1 students.
    pub grade_01: i64,
    /// Grade 2 students.
    pub grade_02: i64,
    /// Grade 3 students.
    pub grade_03: i64,
    /// Grade 4 students.
    pub grade_04: i64,
    /// Grade 5 students.
    pub grade_05: i64,
    /// Grade 6 students.
    pub grade_06: i64,
    /// Grade 7 students.
    pub grade_07: i64,
    /// Grade 8 students.
    pub grade_08: i64,
    /// Grade 9 students.
    pub grade_09: i64,
    /// Grade 10 students.
    pub grade_10: i64,
    /// Grade 11 students.
    pub grade_11: i64,
    /// Grade 12 students.
    pub grade_12: i64,
    /// Grade 13 students.
    pub grade_13: i64,
    /// Ungraded students.
    pub ungraded: i64,
    /// Adult education students.
    pub adult_education: i64,
}
