use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password_hash: String, // Argon2 PHC string, never serialized
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct CourseRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

/// Course joined with the public columns of its owner.
#[derive(Debug, Clone, FromRow)]
pub struct CourseWithOwnerRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub owner_email_address: String,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

/// Title and description are always replaced. Optional fields are left alone
/// when `None`, and set to the inner value (possibly NULL) when `Some`.
#[derive(Debug, Clone)]
pub struct CourseChanges {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<Option<String>>,
    pub materials_needed: Option<Option<String>>,
}
