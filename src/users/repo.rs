use sqlx::PgPool;

use crate::users::repo_types::{NewUser, User};

impl User {
    /// Find a user by email. Exact match; the store does not normalize case.
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, fname, lname, email, password_hash, image, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// All users, oldest first.
    pub async fn find_all(db: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, fname, lname, email, password_hash, image, created_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(db)
        .await
    }

    /// Insert a new user. The UNIQUE constraint on email is the hard
    /// backstop; a duplicate insert fails with a unique violation.
    pub async fn create(db: &PgPool, new: &NewUser<'_>) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (fname, lname, email, password_hash, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, fname, lname, email, password_hash, image, created_at
            "#,
        )
        .bind(new.fname)
        .bind(new.lname)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.image)
        .fetch_one(db)
        .await
    }
}
