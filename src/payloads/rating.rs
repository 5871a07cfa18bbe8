use serde::Deserialize;

/// Rating submission body. The rating student is always the authenticated
/// caller; a body-supplied student id is never trusted.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RatingPayload {
    pub report_id: i32,
    pub rating: i32,
    pub feedback: Option<String>,
}
