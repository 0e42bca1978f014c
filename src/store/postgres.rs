use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use super::{
    CourseChanges, CourseRow, CourseWithOwnerRow, NewCourse, NewUser, Store, StoreError,
    StoreResult, UserRow,
};
use crate::config::AppConfig;

const COURSE_WITH_OWNER_SELECT: &str = r#"
    SELECT c.id, c.user_id, c.title, c.description, c.estimated_time, c.materials_needed,
           u.first_name AS owner_first_name,
           u.last_name AS owner_last_name,
           u.email_address AS owner_email_address
      FROM courses c
      JOIN users u ON u.id = c.user_id
"#;

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        Ok(())
    }
}

fn map_sqlx(e: sqlx::Error, what: &'static str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some(c) if c.contains("email") => "email address".to_string(),
                Some(c) => c.to_string(),
                None => "unique field".to_string(),
            };
            return StoreError::UniqueViolation(field);
        }
    }
    StoreError::Backend(anyhow::Error::new(e).context(what))
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRow>> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, last_name, email_address, password_hash
            FROM users
            WHERE email_address = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| map_sqlx(e, "find user by email"))
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<UserRow> {
        sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (first_name, last_name, email_address, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, email_address, password_hash
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email_address)
        .bind(&user.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_sqlx(e, "insert user"))
    }

    async fn list_courses(&self) -> StoreResult<Vec<CourseWithOwnerRow>> {
        let sql = format!("{COURSE_WITH_OWNER_SELECT} ORDER BY c.id");
        sqlx::query_as::<_, CourseWithOwnerRow>(&sql)
            .fetch_all(&self.db)
            .await
            .map_err(|e| map_sqlx(e, "list courses"))
    }

    async fn find_course_with_owner(&self, id: i64) -> StoreResult<Option<CourseWithOwnerRow>> {
        let sql = format!("{COURSE_WITH_OWNER_SELECT} WHERE c.id = $1");
        sqlx::query_as::<_, CourseWithOwnerRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| map_sqlx(e, "find course with owner"))
    }

    async fn find_course(&self, id: i64) -> StoreResult<Option<CourseRow>> {
        sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT id, user_id, title, description, estimated_time, materials_needed
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| map_sqlx(e, "find course"))
    }

    async fn create_course(&self, course: NewCourse) -> StoreResult<CourseRow> {
        sqlx::query_as::<_, CourseRow>(
            r#"
            INSERT INTO courses (user_id, title, description, estimated_time, materials_needed)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, description, estimated_time, materials_needed
            "#,
        )
        .bind(course.user_id)
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.estimated_time)
        .bind(&course.materials_needed)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_sqlx(e, "insert course"))
    }

    async fn update_course(&self, id: i64, changes: CourseChanges) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE courses
               SET title = $2,
                   description = $3,
                   estimated_time = CASE WHEN $4 THEN $5 ELSE estimated_time END,
                   materials_needed = CASE WHEN $6 THEN $7 ELSE materials_needed END,
                   updated_at = now()
             WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.estimated_time.is_some())
        .bind(changes.estimated_time.flatten())
        .bind(changes.materials_needed.is_some())
        .bind(changes.materials_needed.flatten())
        .execute(&self.db)
        .await
        .map_err(|e| map_sqlx(e, "update course"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_course(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| map_sqlx(e, "delete course"))?;
        Ok(result.rows_affected() > 0)
    }
}
