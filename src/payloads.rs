pub mod auth;
pub mod course;
pub mod feedback;
pub mod rating;
pub mod report;
pub mod user;
