//! # Permission Evaluator
//!
//! Session interpretation and the management/creation permission rules.
//! Admin-facing checks fail closed: a missing, unreadable or foreign
//! session always reads as "no". Public content never needs a session.

use std::sync::Arc;

use domains::error::{DomainError, Result};
use domains::keys;
use domains::models::{ActorClass, Role, SuperAdminSession, User};
use domains::ports::KeyValueStore;
use tracing::{debug, warn};

/// Id carried by the synthesized super-admin actor. The super admin has no
/// stored user record; its credentials live in configuration.
pub const SUPER_ADMIN_ID: &str = "super_admin";

/// Pure classification of an actor from its session records, exhaustive
/// over the role set.
pub fn classify(
    super_session: Option<&SuperAdminSession>,
    project_user: Option<&User>,
) -> ActorClass {
    if super_session.is_some_and(|session| !session.username.is_empty()) {
        return ActorClass::SuperAdmin;
    }
    match project_user.map(|user| user.role) {
        // Written by the super-admin login passthrough into a project.
        Some(Role::SuperAdmin) => ActorClass::SuperAdmin,
        Some(Role::ProjectAdmin) => ActorClass::ProjectAdmin,
        Some(Role::User) => ActorClass::User,
        None => ActorClass::Anonymous,
    }
}

/// Content modification gate shared by posts and comments: the author
/// (matched by id, falling back to the display name) or any admin.
pub(crate) fn can_modify_content(user: &User, author_id: &str, author: &str) -> bool {
    match user.role {
        Role::SuperAdmin | Role::ProjectAdmin => true,
        Role::User => {
            (!author_id.is_empty() && user.id == author_id) || user.username == author
        }
    }
}

pub struct PermissionService {
    store: Arc<dyn KeyValueStore>,
}

impl PermissionService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The global super-admin session, if one is present and well-formed.
    /// A record without a username does not count.
    pub async fn super_admin_session(&self) -> Result<Option<SuperAdminSession>> {
        let Some(value) = self.store.get(keys::SUPER_ADMIN).await? else {
            return Ok(None);
        };
        match serde_json::from_value::<SuperAdminSession>(value) {
            Ok(session) if !session.username.is_empty() => Ok(Some(session)),
            Ok(_) => Ok(None),
            Err(err) => {
                debug!(%err, "super admin session is unreadable");
                Ok(None)
            }
        }
    }

    /// The session user of one project. A session recorded for a different
    /// project, or one that does not parse, is removed and reads as absent.
    pub async fn project_session(&self, project_id: &str) -> Result<Option<User>> {
        let key = keys::session(project_id);
        let Some(value) = self.store.get(&key).await? else {
            return Ok(None);
        };
        match serde_json::from_value::<User>(value) {
            Ok(user) if user.project_id == project_id => Ok(Some(user)),
            Ok(user) => {
                warn!(
                    session_project = %user.project_id,
                    project_id,
                    "session belongs to another project, clearing it"
                );
                self.store.remove(&key).await?;
                Ok(None)
            }
            Err(err) => {
                warn!(project_id, %err, "project session is unreadable, clearing it");
                self.store.remove(&key).await?;
                Ok(None)
            }
        }
    }

    pub async fn is_super_admin(&self) -> bool {
        matches!(self.super_admin_session().await, Ok(Some(_)))
    }

    pub async fn is_project_admin(&self, project_id: &str) -> bool {
        matches!(
            self.project_session(project_id).await,
            Ok(Some(user)) if user.role == Role::ProjectAdmin
        )
    }

    /// Super admins manage every project; project admins only their own.
    pub async fn has_project_management_permission(&self, project_id: &str) -> bool {
        self.is_super_admin().await || self.is_project_admin(project_id).await
    }

    /// Only super admins create projects.
    pub async fn has_project_creation_permission(&self) -> bool {
        self.is_super_admin().await
    }

    /// The acting user for a project. A live super-admin session takes
    /// precedence over the project session.
    pub async fn current_user(&self, project_id: &str) -> Result<Option<User>> {
        if let Some(session) = self.super_admin_session().await? {
            return Ok(Some(super_actor(&session, project_id)));
        }
        self.project_session(project_id).await
    }

    pub async fn require_login(&self, project_id: &str) -> Result<User> {
        self.current_user(project_id)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("login required".into()))
    }

    pub async fn require_management(&self, project_id: &str) -> Result<()> {
        if self.has_project_management_permission(project_id).await {
            Ok(())
        } else {
            Err(DomainError::Unauthorized(
                "project management permission required".into(),
            ))
        }
    }

    pub async fn require_super_admin(&self) -> Result<()> {
        if self.is_super_admin().await {
            Ok(())
        } else {
            Err(DomainError::Unauthorized(
                "super admin permission required".into(),
            ))
        }
    }
}

/// The super admin acting inside a project, synthesized from the global
/// session record.
pub(crate) fn super_actor(session: &SuperAdminSession, project_id: &str) -> User {
    User {
        id: SUPER_ADMIN_ID.into(),
        username: session.username.clone(),
        password_hash: String::new(),
        email: String::new(),
        role: Role::SuperAdmin,
        project_id: project_id.into(),
        created_at: session.login_time,
    }
}
