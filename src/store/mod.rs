use async_trait::async_trait;

mod postgres;
pub mod types;

#[cfg(test)]
pub mod memory;

pub use postgres::PgStore;
pub use types::{CourseChanges, CourseRow, CourseWithOwnerRow, NewCourse, NewUser, UserRow};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write; carries the field it guards.
    #[error("duplicate value for {0}")]
    UniqueViolation(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for users and courses. Every call goes to the backing store;
/// nothing is cached in-process.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRow>>;
    async fn create_user(&self, user: NewUser) -> StoreResult<UserRow>;

    async fn list_courses(&self) -> StoreResult<Vec<CourseWithOwnerRow>>;
    async fn find_course_with_owner(&self, id: i64) -> StoreResult<Option<CourseWithOwnerRow>>;
    async fn find_course(&self, id: i64) -> StoreResult<Option<CourseRow>>;
    async fn create_course(&self, course: NewCourse) -> StoreResult<CourseRow>;
    /// Returns `false` when no course with `id` exists.
    async fn update_course(&self, id: i64, changes: CourseChanges) -> StoreResult<bool>;
    /// Returns `false` when no course with `id` exists.
    async fn delete_course(&self, id: i64) -> StoreResult<bool>;
}
