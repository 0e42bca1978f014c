use crate::{auth::PublicUser, error::ApiError, store::CourseRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseAction {
    Update,
    Delete,
}

impl CourseAction {
    fn verb(self) -> &'static str {
        match self {
            CourseAction::Update => "update",
            CourseAction::Delete => "delete",
        }
    }
}

pub fn is_owner(user: &PublicUser, course: &CourseRow) -> bool {
    user.id == course.user_id
}

/// Call only once the course is known to exist.
pub fn ensure_owner(
    user: &PublicUser,
    course: &CourseRow,
    action: CourseAction,
) -> Result<(), ApiError> {
    if is_owner(user, course) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "Only the creator of the course can {} it.",
            action.verb()
        )))
    }
}
