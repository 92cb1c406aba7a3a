//! # Student DTOs
//!
//! ```text
//! POST /api/students          {"name":"Ada","email":"ada@x.com","age":30}  -> 201 {"id":1}
//! PUT  /api/students/{id}     {"name":"Ada L.","email":"ada@x.com","age":31}
//!                             -> 200 {"message":"...","updated_student":{...}}
//! ```
//!
//! Absent fields deserialize to an empty string or zero and are then reported
//! by [`StudentInput::validate`] together, one message per field.

use crate::error::{AppError, Result};
use crate::model::store::models::{Student, StudentFields};
use lib_utils::{validate_non_zero, validate_not_empty};
use serde::{Deserialize, Serialize};

/// Body of create and update requests. Update is a full replace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentInput {
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl StudentInput {
    /// Check required fields and turn the input into storable fields.
    pub fn validate(self) -> Result<StudentFields> {
        let problems: Vec<String> = [
            validate_not_empty(&self.name, "name"),
            validate_not_empty(&self.email, "email"),
            validate_non_zero(self.age, "age"),
        ]
        .into_iter()
        .filter_map(|check| check.err())
        .collect();

        if !problems.is_empty() {
            return Err(AppError::Validation(problems.join(", ")));
        }

        Ok(StudentFields {
            name: self.name,
            email: self.email,
            age: self.age,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateStudentResponse {
    pub message: String,
    pub updated_student: Student,
}
