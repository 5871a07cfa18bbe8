use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct RegisterPayload {
    pub username: String,
    pub password: String,
    /// Parsed against [`crate::model::user::Role`] in the handler so an
    /// unknown role yields a 400 instead of a deserialization rejection.
    pub role: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}
