use serde::Deserialize;

/// Request body for signup. Fields are optional so that missing ones reach
/// the validator instead of failing deserialization. No `Debug`: it holds
/// the plaintext password.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
}
