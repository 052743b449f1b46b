//! # Store Key Layout
//!
//! The single place that knows how store keys are spelled. Project ids
//! already carry their `project_` prefix, so per-project keys concatenate
//! the id directly.

/// Registry of all projects.
pub const PROJECTS: &str = "projects";

/// Global super-admin session record.
pub const SUPER_ADMIN: &str = "superAdmin";

/// Current session user for one project.
pub fn session(project_id: &str) -> String {
    format!("{project_id}_user")
}

/// All user accounts of one project.
pub fn users(project_id: &str) -> String {
    format!("{project_id}_users")
}

/// Ordered category list of one project.
pub fn categories(project_id: &str) -> String {
    format!("{project_id}_categories")
}

/// Map of board type to post list.
pub fn posts(project_id: &str) -> String {
    format!("{project_id}_posts")
}

/// Comment list of one post.
pub fn comments(project_id: &str, post_id: &str) -> String {
    format!("{project_id}_comments_{post_id}")
}

/// Uploaded file metadata of one project.
pub fn files(project_id: &str) -> String {
    format!("{project_id}_files")
}

/// Prefix shared by every key belonging to one project; used for the
/// delete cascade and the change feed filter.
pub fn project_prefix(project_id: &str) -> String {
    format!("{project_id}_")
}
