use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub fname: String,
    pub lname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub image: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Fields for a user about to be inserted; the id is store-assigned.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub fname: &'a str,
    pub lname: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub image: Option<&'a str>,
}
