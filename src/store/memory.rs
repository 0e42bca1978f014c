use std::sync::Mutex;

use async_trait::async_trait;

use super::{
    CourseChanges, CourseRow, CourseWithOwnerRow, NewCourse, NewUser, Store, StoreError,
    StoreResult, UserRow,
};

/// In-memory store for handler tests. Mirrors the database constraints the
/// handlers rely on: unique email addresses and courses owned by existing users.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<UserRow>,
    courses: Vec<CourseRow>,
    next_user_id: i64,
    next_course_id: i64,
}

impl Tables {
    fn join(&self, course: &CourseRow) -> Option<CourseWithOwnerRow> {
        let owner = self.users.iter().find(|u| u.id == course.user_id)?;
        Some(CourseWithOwnerRow {
            id: course.id,
            user_id: course.user_id,
            title: course.title.clone(),
            description: course.description.clone(),
            estimated_time: course.estimated_time.clone(),
            materials_needed: course.materials_needed.clone(),
            owner_first_name: owner.first_name.clone(),
            owner_last_name: owner.last_name.clone(),
            owner_email_address: owner.email_address.clone(),
        })
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRow>> {
        let t = self.inner.lock().unwrap();
        Ok(t.users.iter().find(|u| u.email_address == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<UserRow> {
        let mut t = self.inner.lock().unwrap();
        if t.users.iter().any(|u| u.email_address == user.email_address) {
            return Err(StoreError::UniqueViolation("email address".into()));
        }
        t.next_user_id += 1;
        let row = UserRow {
            id: t.next_user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
            password_hash: user.password_hash,
        };
        t.users.push(row.clone());
        Ok(row)
    }

    async fn list_courses(&self) -> StoreResult<Vec<CourseWithOwnerRow>> {
        let t = self.inner.lock().unwrap();
        Ok(t.courses.iter().filter_map(|c| t.join(c)).collect())
    }

    async fn find_course_with_owner(&self, id: i64) -> StoreResult<Option<CourseWithOwnerRow>> {
        let t = self.inner.lock().unwrap();
        Ok(t.courses.iter().find(|c| c.id == id).and_then(|c| t.join(c)))
    }

    async fn find_course(&self, id: i64) -> StoreResult<Option<CourseRow>> {
        let t = self.inner.lock().unwrap();
        Ok(t.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn create_course(&self, course: NewCourse) -> StoreResult<CourseRow> {
        let mut t = self.inner.lock().unwrap();
        if !t.users.iter().any(|u| u.id == course.user_id) {
            return Err(StoreError::Backend(anyhow::anyhow!(
                "courses.user_id references missing user {}",
                course.user_id
            )));
        }
        t.next_course_id += 1;
        let row = CourseRow {
            id: t.next_course_id,
            user_id: course.user_id,
            title: course.title,
            description: course.description,
            estimated_time: course.estimated_time,
            materials_needed: course.materials_needed,
        };
        t.courses.push(row.clone());
        Ok(row)
    }

    async fn update_course(&self, id: i64, changes: CourseChanges) -> StoreResult<bool> {
        let mut t = self.inner.lock().unwrap();
        let Some(course) = t.courses.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };
        course.title = changes.title;
        course.description = changes.description;
        if let Some(v) = changes.estimated_time {
            course.estimated_time = v;
        }
        if let Some(v) = changes.materials_needed {
            course.materials_needed = v;
        }
        Ok(true)
    }

    async fn delete_course(&self, id: i64) -> StoreResult<bool> {
        let mut t = self.inner.lock().unwrap();
        let before = t.courses.len();
        t.courses.retain(|c| c.id != id);
        Ok(t.courses.len() < before)
    }
}
