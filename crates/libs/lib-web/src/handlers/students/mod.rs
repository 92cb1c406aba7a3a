//! # Student Handlers
//!
//! CRUD over student records. Reads are public; writes need a session and
//! take the caller's [`Ctx`] so the log shows who changed what.

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use lib_core::dto::{CreatedResponse, MessageResponse, StudentInput, UpdateStudentResponse};
use lib_core::model::store::{DeleteOutcome, Student, UpdateOutcome};
use lib_core::{AppError, Ctx, DynStore, Result};
use tracing::{info, instrument};

const NO_STUDENT: &str = "No student found with the given ID";

/// Create handler.
///
/// # Returns
///
/// * `201 Created` with `{id}`
/// * `400` - Listing every missing field (`name`, `email`, `age`)
#[instrument(skip_all, fields(user = %ctx.username()))]
pub async fn create(
    State(store): State<DynStore>,
    ctx: Ctx,
    Json(input): Json<StudentInput>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let fields = input.validate()?;
    let id = store.create_student(fields).await?;

    info!("[STUDENTS] Created student {}", id);

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// List handler. An empty table is an empty array, not an error.
pub async fn list(State(store): State<DynStore>) -> Result<Json<Vec<Student>>> {
    Ok(Json(store.get_all_students().await?))
}

pub async fn get(State(store): State<DynStore>, Path(id): Path<i64>) -> Result<Json<Student>> {
    let student = store
        .get_student_by_id(id)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound(NO_STUDENT.to_string()),
            other => other,
        })?;

    Ok(Json(student))
}

/// Update handler. Replaces all three fields; the body is validated like a create.
///
/// # Returns
///
/// * `200` - `"Student updated successfully"` with the new record
/// * `200` - `"No updates were made"` with the record as it was read
/// * `404` - No such id
#[instrument(skip_all, fields(user = %ctx.username(), student_id = id))]
pub async fn update(
    State(store): State<DynStore>,
    ctx: Ctx,
    Path(id): Path<i64>,
    Json(input): Json<StudentInput>,
) -> Result<Json<UpdateStudentResponse>> {
    let fields = input.validate()?;

    let (message, student) = match store.update_student(id, fields).await? {
        UpdateOutcome::Updated(student) => {
            info!("[STUDENTS] Updated student {}", id);
            ("Student updated successfully", student)
        }
        UpdateOutcome::NoChange(student) => ("No updates were made", student),
        UpdateOutcome::NotFound => return Err(AppError::NotFound(NO_STUDENT.to_string())),
    };

    Ok(Json(UpdateStudentResponse {
        message: message.to_string(),
        updated_student: student,
    }))
}

#[instrument(skip_all, fields(user = %ctx.username(), student_id = id))]
pub async fn delete(
    State(store): State<DynStore>,
    ctx: Ctx,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    match store.delete_student(id).await? {
        DeleteOutcome::Deleted => {
            info!("[STUDENTS] Deleted student {}", id);
            Ok(Json(MessageResponse::new("Student deleted successfully")))
        }
        DeleteOutcome::NotFound => Err(AppError::NotFound(NO_STUDENT.to_string())),
    }
}

#[cfg(test)]
mod tests;
