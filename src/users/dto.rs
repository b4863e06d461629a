use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::users::repo_types::User;

/// Request body for signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub fname: String,
    pub lname: String,
    pub email: String,
    pub password: String,
    /// Optional image path attached at registration; absent by default.
    #[serde(default)]
    pub image: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after signup or login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_id: Uuid,
    pub email: String,
    pub fname: String,
    pub lname: String,
    pub token: String,
}

/// Public projection of a user: everything except the password hash.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub fname: String,
    pub lname: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            fname: user.fname,
            lname: user.lname,
            email: user.email,
            image: user.image,
        }
    }
}

/// Response for the listing endpoint.
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<PublicUser>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            fname: "A".into(),
            lname: "B".into(),
            email: "a@b.com".into(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".into(),
            image: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn public_user_never_serializes_password() {
        let json = serde_json::to_string(&PublicUser::from(sample_user())).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$"));
        assert!(json.contains("a@b.com"));
    }

    #[test]
    fn user_row_skips_password_hash_too() {
        // Even the raw row type keeps the hash out of any JSON it ends up in.
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$2b$"));
    }

    #[test]
    fn auth_response_uses_camel_case_user_id() {
        let resp = AuthResponse {
            user_id: Uuid::new_v4(),
            email: "a@b.com".into(),
            fname: "A".into(),
            lname: "B".into(),
            token: "tok".into(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"userId\""));
        assert!(!json.contains("\"user_id\""));
    }

    #[test]
    fn absent_image_is_omitted_from_listing() {
        let json = serde_json::to_string(&PublicUser::from(sample_user())).unwrap();
        assert!(!json.contains("image"));
    }

    #[test]
    fn signup_request_image_defaults_to_none() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"fname":"A","lname":"B","email":"a@b.com","password":"secret1"}"#,
        )
        .unwrap();
        assert!(req.image.is_none());
    }
}
