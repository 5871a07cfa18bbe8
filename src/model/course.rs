use crate::schema::courses;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Insertable, Debug)]
#[diesel(table_name = courses)]
pub struct NewCourse {
    pub name: String,
    pub code: String,
    pub lecturer_id: Option<i32>,
    // created_at has a DB default (CURRENT_TIMESTAMP)
}

/// A course row joined with its lecturer's username (if any).
#[derive(Queryable, Serialize, Deserialize, Debug)]
pub struct CourseWithLecturer {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub lecturer_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub lecturer_name: Option<String>,
}
