//! Handlers for the student registry.
//!
//! Reads require a staff account; writes require an admin.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rollcall_core::error::CoreError;
use rollcall_core::student::{validate_label, validate_mobile, validate_roll};
use rollcall_core::types::DbId;
use rollcall_db::models::student::{CreateStudent, StudentListParams, UpdateStudent};
use rollcall_db::repositories::StudentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Student",
        id,
    })
}

fn validate_create(input: &CreateStudent) -> AppResult<()> {
    validate_label("std", &input.std)?;
    validate_label("div", &input.div)?;
    validate_label("name", &input.name)?;
    validate_roll(input.roll)?;
    validate_mobile(&input.mobile)?;
    Ok(())
}

fn validate_update(input: &UpdateStudent) -> AppResult<()> {
    if let Some(std) = &input.std {
        validate_label("std", std)?;
    }
    if let Some(div) = &input.div {
        validate_label("div", div)?;
    }
    if let Some(name) = &input.name {
        validate_label("name", name)?;
    }
    if let Some(roll) = input.roll {
        validate_roll(roll)?;
    }
    if let Some(mobile) = &input.mobile {
        validate_mobile(mobile)?;
    }
    Ok(())
}

/// GET /api/v1/students
///
/// List students, optionally filtered by `std`, `div` and `academic_year`.
pub async fn list_students(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<StudentListParams>,
) -> AppResult<impl IntoResponse> {
    let students = StudentRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: students }))
}

/// GET /api/v1/students/{id}
pub async fn get_student(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let student = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: student }))
}

/// POST /api/v1/students
///
/// Enroll a student. A roll already used in the class returns 409.
pub async fn create_student(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    payload: Result<Json<CreateStudent>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    validate_create(&input)?;

    let student = StudentRepo::create(&state.pool, &input).await?;

    tracing::info!(
        student_id = student.id,
        std = %student.std,
        div = %student.div,
        roll = student.roll,
        user_id = admin.user_id,
        "Student enrolled",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: student })))
}

/// PUT /api/v1/students/{id}
pub async fn update_student(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<UpdateStudent>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    validate_update(&input)?;

    let student = StudentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(student_id = id, user_id = admin.user_id, "Student updated");

    Ok(Json(DataResponse { data: student }))
}

/// DELETE /api/v1/students/{id}
///
/// Removes the student and their attendance marks. Locked rolls are kept.
pub async fn delete_student(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !StudentRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(student_id = id, user_id = admin.user_id, "Student deleted");

    Ok(StatusCode::NO_CONTENT)
}
