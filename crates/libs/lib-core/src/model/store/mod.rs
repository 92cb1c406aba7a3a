//! # Database Store
//!
//! Connection pool, schema migrations, and the [`Storage`] capability the web
//! layer talks to.
//!
//! ## Concurrency
//!
//! One [`DbPool`] is shared by every request. Access is serialized per
//! connection by the pool; there is no global lock, so independent requests
//! run in parallel. File-backed databases use WAL journaling, which lets
//! readers proceed while a writer holds the lock, and a busy timeout so
//! concurrent writers wait instead of failing.

// region: --- Modules
pub mod models;
pub mod student_repository;
pub mod user_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use models::{DeleteOutcome, Student, StudentFields, UpdateOutcome, User};
pub use student_repository::StudentRepository;
pub use user_repository::UserRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use crate::error::Result;
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Schema migrations embedded from `lib-core/migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Upper bound on pooled connections for file-backed databases.
const MAX_CONNECTIONS: u32 = 8;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a SQLite connection pool and bring the schema up to date.
///
/// An in-memory URL gets a single connection that is never recycled, since
/// every SQLite connection to `:memory:` is its own database.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let in_memory = database_url.contains(":memory:");

    let mut options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options = options.journal_mode(SqliteJournalMode::Wal);
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };

    let pool = pool_options.connect_with(options).await?;

    MIGRATOR.run(&pool).await?;
    tracing::debug!("[STORE] migrations applied");

    Ok(pool)
}
// endregion: --- Types and Functions

// region: --- Storage
/// Shared handle to the storage capability.
pub type DynStore = Arc<dyn Storage>;

/// Persistence operations for students and users.
///
/// Every failure of an underlying statement is returned as an error; no
/// operation reports success with a placeholder value.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Insert a student and return its new id.
    async fn create_student(&self, fields: StudentFields) -> Result<i64>;

    /// Fetch one student. `AppError::NotFound` if absent.
    async fn get_student_by_id(&self, id: i64) -> Result<Student>;

    /// All students in id order; empty when there are none.
    async fn get_all_students(&self) -> Result<Vec<Student>>;

    /// Delete a student. A missing id is an outcome, not an error.
    async fn delete_student(&self, id: i64) -> Result<DeleteOutcome>;

    /// Replace name, email and age of a student.
    ///
    /// The existence check and the write are separate statements, not one
    /// transaction: a concurrent writer can slip in between them.
    async fn update_student(&self, id: i64, fields: StudentFields) -> Result<UpdateOutcome>;

    /// Insert a user with an already hashed password and return its id.
    /// `AppError::DuplicateUsername` if the name is taken.
    async fn register_user(&self, username: &str, password_hash: &str) -> Result<i64>;

    /// Fetch a user by name. `AppError::NotFound` if absent.
    async fn get_user_by_username(&self, username: &str) -> Result<User>;

    /// Release the underlying connections. Called once at shutdown.
    async fn close(&self);
}

/// [`Storage`] backed by SQLite.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open the database at `database_url` and run migrations.
    pub async fn connect(database_url: &str) -> Result<Self> {
        Ok(Self::new(create_pool(database_url).await?))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn into_dyn(self) -> DynStore {
        Arc::new(self)
    }
}

#[async_trait]
impl Storage for SqliteStore {
    async fn create_student(&self, fields: StudentFields) -> Result<i64> {
        StudentRepository::create(&self.pool, &fields).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Student> {
        StudentRepository::get(&self.pool, id).await
    }

    async fn get_all_students(&self) -> Result<Vec<Student>> {
        StudentRepository::list(&self.pool).await
    }

    async fn delete_student(&self, id: i64) -> Result<DeleteOutcome> {
        StudentRepository::delete(&self.pool, id).await
    }

    async fn update_student(&self, id: i64, fields: StudentFields) -> Result<UpdateOutcome> {
        StudentRepository::update(&self.pool, id, &fields).await
    }

    async fn register_user(&self, username: &str, password_hash: &str) -> Result<i64> {
        UserRepository::create(&self.pool, username, password_hash).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User> {
        UserRepository::get_by_username(&self.pool, username).await
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
// endregion: --- Storage
