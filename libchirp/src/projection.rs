//! Projection of full user records to their client-safe shape

use crate::types::{Author, User};

/// Trim a directory [`User`] down to the fields that may leave the server.
pub fn filter_user_for_client(user: &User) -> Author {
    Author {
        id: user.id.clone(),
        username: user.username.clone(),
        profile_image_url: user.profile_image_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn full_user() -> User {
        User {
            id: "user_2abc".to_string(),
            username: "asherman-ca".to_string(),
            profile_image_url: "https://img.example.com/a.png".to_string(),
            email_address: Some("secret@example.com".to_string()),
            first_name: Some("Ash".to_string()),
            last_name: Some("Sherman".to_string()),
            private_metadata: Some(r#"{"plan":"pro"}"#.to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_projection_copies_public_fields() {
        let author = filter_user_for_client(&full_user());
        assert_eq!(author.id, "user_2abc");
        assert_eq!(author.username, "asherman-ca");
        assert_eq!(author.profile_image_url, "https://img.example.com/a.png");
    }

    #[test]
    fn test_projection_does_not_leak_private_fields() {
        let author = filter_user_for_client(&full_user());
        let json = serde_json::to_value(&author).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 3);
        let rendered = json.to_string();
        assert!(!rendered.contains("secret@example.com"));
        assert!(!rendered.contains("plan"));
        assert!(!rendered.contains("Sherman"));
    }
}
