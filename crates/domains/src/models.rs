//! # Domain Models
//!
//! These structs represent the core entities of sitekit. Every record is
//! stored as a JSON document with camelCase field names, and reads are
//! tolerant of fields older records never carried (see the serde defaults).
//! Ids are strings: generated ones are UUID v7 (time-ordered), while the
//! sentinel actors `super_admin` and `admin` keep their literal ids.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role, closed set. Records written before roles existed
/// deserialize as `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    ProjectAdmin,
    SuperAdmin,
}

/// The two shapes a navigation entry can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Static HTML content rendered inline.
    Page,
    /// A post list keyed by `board_type`.
    Board,
}

/// Kind of a projected navigation tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKind {
    Home,
    Page,
    Board,
}

/// What the permission evaluator decided an actor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorClass {
    Anonymous,
    SuperAdmin,
    ProjectAdmin,
    User,
}

/// A tenant site managed through the super-admin console.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub admin_username: String,
    /// Argon2 hash; never leaves the service layer.
    pub admin_password_hash: String,
    pub admin_email: String,
    pub created_at: DateTime<Utc>,
}

/// A project-scoped account. The same shape doubles as the per-project
/// session record under the `<projectId>_user` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    /// Argon2 hash; empty for the synthesized super-admin actor, whose
    /// credentials live in configuration.
    #[serde(default)]
    pub password_hash: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    pub project_id: String,
    pub created_at: DateTime<Utc>,
}

/// A navigation entry: either a static page or a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    /// Bucket key into the posts map for boards; a derived slug for pages.
    pub board_type: String,
    /// Page HTML; empty for boards.
    #[serde(default)]
    pub content: String,
    /// Position + 1. Display ordering is the stored array order; this field
    /// is renumbered after every structural change.
    pub order: u32,
}

/// Attachment metadata captured at upload time. No blob is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentMeta {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type", default)]
    pub content_type: String,
    /// Client-side mtime in milliseconds, when the uploader sent one.
    #[serde(default)]
    pub last_modified: i64,
}

/// A board post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Display name of the category the author filed this under.
    #[serde(default)]
    pub category: String,
    pub author: String,
    #[serde(default)]
    pub author_id: String,
    /// Creation date as rendered in lists (YYYY-MM-DD); stable across edits.
    pub date: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
    #[serde(default)]
    pub board_type: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub files: Vec<AttachmentMeta>,
    #[serde(default = "epoch")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "epoch")]
    pub updated_at: DateTime<Utc>,
}

/// Map of board type to its post list, newest first.
pub type BoardPosts = BTreeMap<String, Vec<Post>>;

/// A post paired with the display name of the board it lives on. Produced
/// by search, recent-post listings and the stats summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPost {
    #[serde(flatten)]
    pub post: Post,
    pub board_name: String,
}

/// A comment on a post, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author: String,
    #[serde(default)]
    pub author_id: String,
    pub content: String,
    /// YYYY-MM-DD, refreshed on edit.
    pub date: String,
    /// HH:MM, refreshed on edit.
    pub time: String,
}

/// Uploaded file bookkeeping entry (metadata only).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub project_id: String,
}

/// Global super-admin session record under the `superAdmin` key.
/// Holds no credential copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperAdminSession {
    pub username: String,
    pub login_time: DateTime<Utc>,
}

/// One projected navigation tab. Never stored; computed from categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TabKind,
}

/// Admin dashboard summary for one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_posts: usize,
    pub total_users: usize,
    pub total_categories: usize,
    /// Board-kind categories only.
    pub total_boards: usize,
    pub recent_posts: Vec<BoardPost>,
}

fn default_is_public() -> bool {
    true
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_tolerates_sparse_records() {
        // Seed posts written by early versions had no visibility flag,
        // no attachments and no machine timestamps.
        let json = r#"{
            "id": "1",
            "title": "The board is now open!",
            "content": "Feel free to write a post.",
            "author": "Admin",
            "date": "2024-01-01"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.is_public);
        assert_eq!(post.views, 0);
        assert!(post.files.is_empty());
        assert_eq!(post.created_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_board_post_flattens_on_the_wire() {
        let post: Post = serde_json::from_str(
            r#"{"id":"1","title":"t","content":"c","author":"a","date":"2024-01-01"}"#,
        )
        .unwrap();
        let hit = BoardPost { post, board_name: "Notice".into() };
        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["title"], "t");
        assert_eq!(json["boardName"], "Notice");
    }

    #[test]
    fn test_attachment_uses_type_field() {
        let json = r#"{"name":"a.png","size":10,"type":"image/png","lastModified":1700000000000}"#;
        let meta: AttachmentMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.content_type, "image/png");
        let back = serde_json::to_value(&meta).unwrap();
        assert_eq!(back["type"], "image/png");
    }
}
