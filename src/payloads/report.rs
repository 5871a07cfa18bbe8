use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

/// Report submission body. Field names follow the frontend's camelCase
/// convention.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewReportPayload {
    pub faculty: String,
    pub class_name: String,
    pub week_of_reporting: String,
    pub date_of_lecture: NaiveDate,
    pub course_name: String,
    pub course_code: String,
    pub lecturer_name: String,
    pub actual_present: i32,
    pub total_registered: i32,
    pub venue: String,
    pub scheduled_time: NaiveTime,
    pub topic_taught: String,
    pub learning_outcomes: String,
    pub recommendations: String,
}

/// Body for both the PRL and PL feedback endpoints.
#[derive(Deserialize, Debug)]
pub struct ReportFeedbackPayload {
    pub feedback: String,
}
