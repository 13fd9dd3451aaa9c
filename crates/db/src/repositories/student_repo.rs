//! Repository for the `students` table.

use rollcall_core::types::DbId;
use sqlx::PgPool;

use crate::models::student::{CreateStudent, Student, StudentListParams, UpdateStudent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, std, div, academic_year, name, roll, mobile, created_at, updated_at";

/// Provides CRUD operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Enroll a student, returning the created row.
    ///
    /// A roll already taken in the same class, division and academic year
    /// violates `uq_students_class_roll`.
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (std, div, academic_year, name, roll, mobile)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(input.std.trim())
            .bind(input.div.trim())
            .bind(input.academic_year.trim())
            .bind(input.name.trim())
            .bind(input.roll)
            .bind(input.mobile.trim())
            .fetch_one(pool)
            .await
    }

    /// Find a student by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List students, optionally filtered by class, division and academic
    /// year, ordered for display in a roll-call grid.
    pub async fn list(
        pool: &PgPool,
        params: &StudentListParams,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM students
             WHERE ($1::TEXT IS NULL OR std = $1)
               AND ($2::TEXT IS NULL OR div = $2)
               AND ($3::TEXT IS NULL OR academic_year = $3)
             ORDER BY std, div, roll"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(params.std.as_deref().map(str::trim))
            .bind(params.div.as_deref().map(str::trim))
            .bind(params.academic_year.as_deref().map(str::trim))
            .fetch_all(pool)
            .await
    }

    /// Update a student. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                std = COALESCE($2, std),
                div = COALESCE($3, div),
                academic_year = COALESCE($4, academic_year),
                name = COALESCE($5, name),
                roll = COALESCE($6, roll),
                mobile = COALESCE($7, mobile),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(input.std.as_deref().map(str::trim))
            .bind(input.div.as_deref().map(str::trim))
            .bind(input.academic_year.as_deref().map(str::trim))
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.roll)
            .bind(input.mobile.as_deref().map(str::trim))
            .fetch_optional(pool)
            .await
    }

    /// Delete a student and, by cascade, their attendance marks.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
