use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct ListUsersParams {
    pub role: Option<String>,
}
