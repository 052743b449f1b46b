//! # Users
//!
//! Account management for the admin console, plus the self-service profile
//! and password operations. Profile operations always act on the session
//! user and keep the session record and the stored list in sync.

use std::sync::Arc;

use chrono::Utc;
use domains::error::{DomainError, Result};
use domains::keys;
use domains::models::{Role, User};
use domains::ports::{KeyValueStore, PasswordHasher};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::loaders;
use crate::permissions::PermissionService;

const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

/// Admin edit payload. A missing or empty password keeps the stored hash.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

pub struct UserService {
    store: Arc<dyn KeyValueStore>,
    hasher: Arc<dyn PasswordHasher>,
    permissions: Arc<PermissionService>,
}

impl UserService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        hasher: Arc<dyn PasswordHasher>,
        permissions: Arc<PermissionService>,
    ) -> Self {
        Self {
            store,
            hasher,
            permissions,
        }
    }

    /// User list with an optional case-insensitive username/email filter.
    pub async fn list(&self, project_id: &str, search: Option<&str>) -> Result<Vec<User>> {
        self.permissions.require_management(project_id).await?;
        let users = loaders::load_users(&*self.store, project_id, &*self.hasher).await?;
        Ok(match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(query) => {
                let query = query.to_lowercase();
                users
                    .into_iter()
                    .filter(|user| {
                        user.username.to_lowercase().contains(&query)
                            || user.email.to_lowercase().contains(&query)
                    })
                    .collect()
            }
            None => users,
        })
    }

    pub async fn add(&self, project_id: &str, request: &NewUser) -> Result<User> {
        self.permissions.require_management(project_id).await?;
        let username = request.username.trim();
        let email = request.email.trim();
        if username.is_empty() || email.is_empty() {
            return Err(DomainError::Validation(
                "username and email are required".into(),
            ));
        }
        if request.password.is_empty() {
            return Err(DomainError::Validation("password is required".into()));
        }

        let user = User {
            id: Uuid::now_v7().to_string(),
            username: username.into(),
            password_hash: self.hasher.hash(&request.password)?,
            email: email.into(),
            role: request.role,
            project_id: project_id.into(),
            created_at: Utc::now(),
        };
        let mut users = loaders::load_users(&*self.store, project_id, &*self.hasher).await?;
        users.push(user.clone());
        loaders::save_users(&*self.store, project_id, &users).await?;
        info!(project_id, username = %user.username, role = ?user.role, "added user");
        Ok(user)
    }

    pub async fn update(
        &self,
        project_id: &str,
        user_id: &str,
        request: &UserUpdate,
    ) -> Result<User> {
        self.permissions.require_management(project_id).await?;
        let mut users = loaders::load_users(&*self.store, project_id, &*self.hasher).await?;
        let user = users
            .iter_mut()
            .find(|user| user.id == user_id)
            .ok_or_else(|| DomainError::not_found("User", user_id))?;

        if let Some(username) = request.username.as_deref() {
            if !username.trim().is_empty() {
                user.username = username.trim().into();
            }
        }
        if let Some(email) = request.email.as_deref() {
            if !email.trim().is_empty() {
                user.email = email.trim().into();
            }
        }
        if let Some(role) = request.role {
            user.role = role;
        }
        // Blank password means "leave it alone" on the edit form.
        if let Some(password) = request.password.as_deref() {
            if !password.is_empty() {
                user.password_hash = self.hasher.hash(password)?;
            }
        }
        let updated = user.clone();
        loaders::save_users(&*self.store, project_id, &users).await?;
        info!(project_id, user_id, "updated user");
        Ok(updated)
    }

    pub async fn remove(&self, project_id: &str, user_id: &str) -> Result<()> {
        self.permissions.require_management(project_id).await?;
        let mut users = loaders::load_users(&*self.store, project_id, &*self.hasher).await?;
        let before = users.len();
        users.retain(|user| user.id != user_id);
        if users.len() == before {
            return Err(DomainError::not_found("User", user_id));
        }
        loaders::save_users(&*self.store, project_id, &users).await?;
        info!(project_id, user_id, "removed user");
        Ok(())
    }

    /// Updates the session user's display identity and syncs the stored
    /// list entry. The synthesized super-admin actor has no stored record
    /// and is refused.
    pub async fn update_profile(&self, project_id: &str, request: &ProfileUpdate) -> Result<User> {
        let mut user = self.require_stored_session(project_id).await?;
        let username = request.username.trim();
        let email = request.email.trim();
        if username.is_empty() || email.is_empty() {
            return Err(DomainError::Validation(
                "username and email are required".into(),
            ));
        }
        user.username = username.into();
        user.email = email.into();
        self.sync_session_and_list(project_id, &user).await?;
        info!(project_id, user_id = %user.id, "updated profile");
        Ok(user)
    }

    /// Verifies the current password and stores a new hash, in both the
    /// session record and the user list.
    pub async fn change_password(
        &self,
        project_id: &str,
        request: &PasswordChange,
    ) -> Result<()> {
        let mut user = self.require_stored_session(project_id).await?;
        if !self
            .hasher
            .verify(&request.current_password, &user.password_hash)
        {
            return Err(DomainError::Unauthorized(
                "current password is incorrect".into(),
            ));
        }
        if request.new_password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(DomainError::Validation(format!(
                "new password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }
        user.password_hash = self.hasher.hash(&request.new_password)?;
        self.sync_session_and_list(project_id, &user).await?;
        info!(project_id, user_id = %user.id, "changed password");
        Ok(())
    }

    /// The session user, provided it is a stored account rather than the
    /// configuration-owned super admin.
    async fn require_stored_session(&self, project_id: &str) -> Result<User> {
        let user = self.permissions.require_login(project_id).await?;
        match user.role {
            Role::SuperAdmin => Err(DomainError::Validation(
                "the super admin profile is fixed by server configuration".into(),
            )),
            Role::ProjectAdmin | Role::User => Ok(user),
        }
    }

    async fn sync_session_and_list(&self, project_id: &str, user: &User) -> Result<()> {
        self.store
            .put(&keys::session(project_id), serde_json::to_value(user)?)
            .await?;
        let mut users = loaders::load_users(&*self.store, project_id, &*self.hasher).await?;
        if let Some(entry) = users.iter_mut().find(|entry| entry.id == user.id) {
            *entry = user.clone();
            loaders::save_users(&*self.store, project_id, &users).await?;
        }
        Ok(())
    }
}
