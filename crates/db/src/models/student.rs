//! Student entity model and DTOs.

use rollcall_core::types::{DbId, Roll, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub std: String,
    pub div: String,
    pub academic_year: String,
    pub name: String,
    pub roll: Roll,
    pub mobile: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for enrolling a student.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub std: String,
    pub div: String,
    /// Cohort label; empty when the school does not track one.
    #[serde(default)]
    pub academic_year: String,
    pub name: String,
    pub roll: Roll,
    pub mobile: String,
}

/// DTO for updating a student. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudent {
    pub std: Option<String>,
    pub div: Option<String>,
    pub academic_year: Option<String>,
    pub name: Option<String>,
    pub roll: Option<Roll>,
    pub mobile: Option<String>,
}

/// Query parameters for `GET /api/v1/students`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentListParams {
    pub std: Option<String>,
    pub div: Option<String>,
    pub academic_year: Option<String>,
}
