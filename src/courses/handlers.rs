use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{CourseRequest, CourseResponse},
    guard::{ensure_owner, CourseAction},
};
use crate::{
    auth::CurrentUser,
    error::{ApiError, ApiResult},
    state::AppState,
    store::{CourseChanges, CourseRow, NewCourse},
    validation::Validator,
};

pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/:id",
            get(get_course).put(update_course).delete(delete_course),
        )
}

/// Validated title/description plus the three-state optional fields.
struct CourseFields {
    title: String,
    description: String,
    estimated_time: Option<Option<String>>,
    materials_needed: Option<Option<String>>,
}

fn validate(body: CourseRequest) -> ApiResult<CourseFields> {
    let mut v = Validator::new();
    let title = v.required("title", body.title.as_deref()).map(str::to_string);
    let description = v
        .required("description", body.description.as_deref())
        .map(str::to_string);
    v.finish()?;

    Ok(CourseFields {
        title: title.unwrap_or_default(),
        description: description.unwrap_or_default(),
        estimated_time: body.estimated_time,
        materials_needed: body.materials_needed,
    })
}

async fn load_course(state: &AppState, id: i64) -> ApiResult<CourseRow> {
    state
        .store
        .find_course(id)
        .await?
        .ok_or_else(ApiError::course_not_found)
}

#[instrument(skip(state))]
pub async fn list_courses(State(state): State<AppState>) -> ApiResult<Json<Vec<CourseResponse>>> {
    let courses = state.store.list_courses().await?;
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

#[instrument(skip(state, id))]
pub async fn get_course(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<CourseResponse>> {
    let Path(id) = id?;
    let course = state
        .store
        .find_course_with_owner(id)
        .await?
        .ok_or_else(ApiError::course_not_found)?;
    Ok(Json(course.into()))
}

#[instrument(skip_all)]
pub async fn create_course(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<CourseRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = payload?;
    let fields = validate(body)?;

    let course = state
        .store
        .create_course(NewCourse {
            user_id: user.id,
            title: fields.title,
            description: fields.description,
            estimated_time: fields.estimated_time.flatten(),
            materials_needed: fields.materials_needed.flatten(),
        })
        .await?;

    info!(course_id = course.id, user_id = user.id, "course created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/courses/{}", course.id))],
    ))
}

#[instrument(skip_all)]
pub async fn update_course(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CourseRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    let Json(body) = payload?;
    let fields = validate(body)?;

    let course = load_course(&state, id).await?;
    ensure_owner(&user, &course, CourseAction::Update)?;

    let updated = state
        .store
        .update_course(
            id,
            CourseChanges {
                title: fields.title,
                description: fields.description,
                estimated_time: fields.estimated_time,
                materials_needed: fields.materials_needed,
            },
        )
        .await?;
    if !updated {
        return Err(ApiError::course_not_found());
    }

    info!(course_id = id, user_id = user.id, "course updated");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip_all)]
pub async fn delete_course(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;

    let course = load_course(&state, id).await?;
    ensure_owner(&user, &course, CourseAction::Delete)?;

    if !state.store.delete_course(id).await? {
        return Err(ApiError::course_not_found());
    }

    info!(course_id = id, user_id = user.id, "course deleted");
    Ok(StatusCode::NO_CONTENT)
}
