use crate::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every account carries exactly one of these roles. Stored as lowercase
/// text in the `users.role` column.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Lecturer,
    Pl,
    Prl,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Lecturer => "lecturer",
            Role::Pl => "pl",
            Role::Prl => "prl",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "lecturer" => Ok(Role::Lecturer),
            "pl" => Ok(Role::Pl),
            "prl" => Ok(Role::Prl),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub username: String,
    /// Argon2 hash, never the plaintext password.
    pub password: String,
    pub role: String,
    // created_at has a DB default (CURRENT_TIMESTAMP)
}

/// Credential columns loaded for login verification. Never serialized.
#[derive(Queryable, Debug)]
pub struct UserCredentials {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Public listing shape; the password hash is excluded at the query level.
#[derive(Queryable, Serialize, Deserialize, Debug)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i32,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub role: Role,
    pub user_id: i32,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Student, Role::Lecturer, Role::Pl, Role::Prl] {
            assert_eq!(Role::from_str(role.as_str()), Ok(role));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("admin").is_err());
        assert!(Role::from_str("").is_err());
        assert!(Role::from_str("Student").is_err());
    }
}
