use serde::{Deserialize, Deserializer, Serialize};

use crate::auth::PublicUser;
use crate::store::CourseWithOwnerRow;

/// Course as returned to clients, joined with its owner's public fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i64,
    pub owner: PublicUser,
}

impl From<CourseWithOwnerRow> for CourseResponse {
    fn from(r: CourseWithOwnerRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            estimated_time: r.estimated_time,
            materials_needed: r.materials_needed,
            user_id: r.user_id,
            owner: PublicUser {
                id: r.user_id,
                first_name: r.owner_first_name,
                last_name: r.owner_last_name,
                email_address: r.owner_email_address,
            },
        }
    }
}

/// Body for both course creation and update. Any `userId` sent by the client
/// is ignored; ownership always comes from the authenticated caller.
///
/// Optional fields are three-state: absent (`None`), explicit `null`
/// (`Some(None)`), or a value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub estimated_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub materials_needed: Option<Option<String>>,
}

// Only called when the key exists, so `null` lands as `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
