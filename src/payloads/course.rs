use serde::Deserialize;

/// Body for course creation and update.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    pub name: String,
    pub code: String,
    pub lecturer_id: Option<i32>,
}
