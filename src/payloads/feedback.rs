use serde::Deserialize;

/// Feedback submission body. Like ratings, the submitting student is the
/// authenticated caller.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPayload {
    pub report_id: i32,
    pub feedback: String,
    pub topic: Option<String>,
}
