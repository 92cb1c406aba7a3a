use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Student record as stored in the `students` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// The writable fields of a student.
///
/// Used for both create and update; an update replaces all three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl StudentFields {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    /// The record these fields produce for `id`.
    pub fn into_student(self, id: i64) -> Student {
        Student {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}

/// User record as stored in the `users` table.
///
/// `password` holds the Argon2 digest, never plaintext. The type is not
/// `Serialize` so it cannot end up in a response body by accident.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
}

/// Result of [`delete_student`](super::Storage::delete_student).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Result of [`update_student`](super::Storage::update_student).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The row was rewritten; carries the new record.
    Updated(Student),
    /// The row existed at the check but the write touched nothing; carries
    /// the record as it was read.
    NoChange(Student),
    /// No row with that id.
    NotFound,
}
