//! Shared response envelope and the hash-free client views.

use chrono::{DateTime, Utc};
use domains::models::{Project, Role, User};
use serde::Serialize;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// A project as clients see it. The admin password hash stays inside the
/// process.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub admin_username: String,
    pub admin_email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Project> for ProjectView {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            admin_username: project.admin_username,
            admin_email: project.admin_email,
            created_at: project.created_at,
        }
    }
}

/// A user as clients see it, password hash stripped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub project_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            project_id: user.project_id,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_user_view_has_no_hash_field() {
        let user = User {
            id: "u1".into(),
            username: "alice".into(),
            password_hash: "$argon2id$secret".into(),
            email: "alice@example.com".into(),
            role: Role::User,
            project_id: "p1".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&UserView::from(user)).unwrap();
        assert!(!json.contains("passwordHash"));
        assert!(!json.contains("argon2id"));
        assert!(json.contains("\"username\":\"alice\""));
    }

    #[test]
    fn test_project_view_has_no_hash_field() {
        let project = Project {
            id: "p1".into(),
            name: "Demo".into(),
            description: String::new(),
            admin_username: "admin".into(),
            admin_password_hash: "$argon2id$secret".into(),
            admin_email: "admin@example.com".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&ProjectView::from(project)).unwrap();
        assert!(!json.contains("adminPasswordHash"));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn test_error_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::<()>::error("nope".into())).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert_eq!(json["error"], "nope");
    }
}
