//! sitekit/crates/services/src/lib.rs
//!
//! Business logic for sitekit, built purely against the domain ports. Every
//! service reads the acting session out of the store itself, so callers
//! never pass identity around.

pub mod auth;
pub mod categories;
pub mod comments;
pub mod files;
mod loaders;
pub mod permissions;
pub mod posts;
pub mod projection;
pub mod projects;
pub mod sample;
pub mod stats;
pub mod users;

pub use auth::{AuthService, LoginRequest, SignupRequest, SuperAdminCredentials};
pub use categories::{CategoryService, CategoryUpdate, MoveDirection, NewCategory};
pub use comments::CommentService;
pub use files::{FileService, FileUploadRequest, MAX_FILES_PER_UPLOAD, MAX_FILE_SIZE};
pub use permissions::{classify, PermissionService, SUPER_ADMIN_ID};
pub use posts::{PostDraft, PostService};
pub use projection::tabs_for;
pub use projects::{NewProject, ProjectService, ProjectSettings};
pub use stats::StatsService;
pub use users::{NewUser, PasswordChange, ProfileUpdate, UserService, UserUpdate};
