use crate::schema::feedback;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Insertable, Debug)]
#[diesel(table_name = feedback)]
pub struct NewFeedback {
    pub report_id: i32,
    pub student_id: Option<i32>,
    #[diesel(column_name = feedback_text)]
    pub feedback: String,
    pub topic: Option<String>,
    // created_at has a DB default (CURRENT_TIMESTAMP)
}

/// A feedback row joined with the submitting student's username.
#[derive(Queryable, Serialize, Deserialize, Debug)]
pub struct FeedbackWithStudent {
    pub id: i32,
    pub report_id: i32,
    pub student_id: Option<i32>,
    pub feedback: String,
    pub topic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub student_name: String,
}
