use crate::schema::reports;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Insertable, Debug)]
#[diesel(table_name = reports)]
pub struct NewReport {
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
    pub created_by: Option<i32>,
    // prl_feedback / pl_feedback start NULL, created_at has a DB default
}

/// Full report row as stored.
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug)]
#[diesel(table_name = reports)]
pub struct Report {
    pub id: i32,
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
    pub prl_feedback: Option<String>,
    pub pl_feedback: Option<String>,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// A report joined with its creator's username. `created_by_name` is None
/// when the creating lecturer has since been deleted (FK SET NULL).
#[derive(Serialize, Deserialize, Debug)]
pub struct ReportWithAuthor {
    #[serde(flatten)]
    pub report: Report,
    pub created_by_name: Option<String>,
}

impl From<(Report, Option<String>)> for ReportWithAuthor {
    fn from((report, created_by_name): (Report, Option<String>)) -> Self {
        ReportWithAuthor {
            report,
            created_by_name,
        }
    }
}
