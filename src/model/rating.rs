use crate::schema::ratings;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Insertable, Debug)]
#[diesel(table_name = ratings)]
pub struct NewRating {
    pub report_id: i32,
    pub student_id: i32,
    pub rating: i32,
    pub feedback: Option<String>,
    // created_at has a DB default (CURRENT_TIMESTAMP)
}

/// A rating joined with the rating student's username and the rated
/// report's course name.
#[derive(Queryable, Serialize, Deserialize, Debug)]
pub struct RatingWithContext {
    pub id: i32,
    pub report_id: i32,
    pub student_id: i32,
    pub rating: i32,
    pub feedback: Option<String>,
    pub student_name: String,
    pub course_name: String,
}
