//! # Authentication
//!
//! Super-admin login against configured credentials, and the per-project
//! login cascade. Sessions ARE store records; there is no token scheme.
//! All secrets are verified against argon2 hashes, never compared as
//! plaintext.

use std::sync::Arc;

use chrono::Utc;
use domains::error::{DomainError, Result};
use domains::keys;
use domains::models::{Role, SuperAdminSession, User};
use domains::ports::{KeyValueStore, PasswordHasher};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::loaders;
use crate::permissions::SUPER_ADMIN_ID;

/// Super-admin credentials as loaded from configuration, with the password
/// already hashed at startup.
#[derive(Debug, Clone)]
pub struct SuperAdminCredentials {
    pub username: String,
    pub password_hash: String,
}

impl SuperAdminCredentials {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

pub struct AuthService {
    store: Arc<dyn KeyValueStore>,
    hasher: Arc<dyn PasswordHasher>,
    super_creds: SuperAdminCredentials,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        hasher: Arc<dyn PasswordHasher>,
        super_creds: SuperAdminCredentials,
    ) -> Self {
        Self {
            store,
            hasher,
            super_creds,
        }
    }

    fn is_super_credentials(&self, username: &str, password: &str) -> bool {
        username == self.super_creds.username
            && self.hasher.verify(password, &self.super_creds.password_hash)
    }

    /// Global super-admin login. Success writes the `superAdmin` session
    /// record; anything else is a generic credential failure.
    pub async fn super_login(&self, request: &LoginRequest) -> Result<SuperAdminSession> {
        if !self.is_super_credentials(&request.username, &request.password) {
            warn!(username = %request.username, "failed super admin login");
            return Err(DomainError::Unauthorized(
                "invalid username or password".into(),
            ));
        }
        let session = SuperAdminSession {
            username: request.username.clone(),
            login_time: Utc::now(),
        };
        self.store
            .put(keys::SUPER_ADMIN, serde_json::to_value(&session)?)
            .await?;
        info!(username = %session.username, "super admin logged in");
        Ok(session)
    }

    /// Removes the global session and every per-project session the super
    /// admin may have left behind.
    pub async fn super_logout(&self) -> Result<()> {
        self.store.remove(keys::SUPER_ADMIN).await?;
        for project in loaders::read_registry_lenient(&*self.store).await? {
            self.store.remove(&keys::session(&project.id)).await?;
        }
        info!("super admin logged out");
        Ok(())
    }

    /// Project login cascade, first match wins:
    /// 1. configured super-admin credentials (writes BOTH sessions),
    /// 2. the project's registry admin credentials,
    /// 3. an admin-role account from the project's user list,
    /// 4. any account from the project's user list.
    ///
    /// A missing project simply skips step 2; the caller always gets the
    /// same generic failure, never a project-existence probe.
    pub async fn login(&self, project_id: &str, request: &LoginRequest) -> Result<User> {
        // 1. Super-admin passthrough.
        if self.is_super_credentials(&request.username, &request.password) {
            let now = Utc::now();
            let session = SuperAdminSession {
                username: request.username.clone(),
                login_time: now,
            };
            self.store
                .put(keys::SUPER_ADMIN, serde_json::to_value(&session)?)
                .await?;
            let actor = User {
                id: SUPER_ADMIN_ID.into(),
                username: request.username.clone(),
                password_hash: String::new(),
                email: String::new(),
                role: Role::SuperAdmin,
                project_id: project_id.into(),
                created_at: now,
            };
            self.write_session(project_id, &actor).await?;
            info!(project_id, "super admin logged into project");
            return Ok(actor);
        }

        // 2. Registry admin credentials.
        let registry = loaders::load_registry(&*self.store, &*self.hasher).await?;
        if let Some(project) = registry.iter().find(|project| project.id == project_id) {
            if request.username == project.admin_username
                && self
                    .hasher
                    .verify(&request.password, &project.admin_password_hash)
            {
                let user = User {
                    id: Uuid::now_v7().to_string(),
                    username: project.admin_username.clone(),
                    password_hash: project.admin_password_hash.clone(),
                    email: project.admin_email.clone(),
                    role: Role::ProjectAdmin,
                    project_id: project_id.into(),
                    created_at: project.created_at,
                };
                self.write_session(project_id, &user).await?;
                info!(project_id, username = %user.username, "project admin logged in");
                return Ok(user);
            }
        }

        // 3 + 4. Stored accounts, admins first.
        let users = loaders::load_users(&*self.store, project_id, &*self.hasher).await?;
        let admin_match = users.iter().find(|user| {
            user.role == Role::ProjectAdmin
                && user.username == request.username
                && self.hasher.verify(&request.password, &user.password_hash)
        });
        let any_match = admin_match.or_else(|| {
            users.iter().find(|user| {
                user.username == request.username
                    && self.hasher.verify(&request.password, &user.password_hash)
            })
        });
        if let Some(user) = any_match {
            self.write_session(project_id, user).await?;
            info!(project_id, username = %user.username, role = ?user.role, "user logged in");
            return Ok(user.clone());
        }

        warn!(project_id, username = %request.username, "failed project login");
        Err(DomainError::Unauthorized(
            "invalid username or password".into(),
        ))
    }

    /// Creates an account and signs it straight in. Usernames are not
    /// deduplicated; login picks the first match.
    pub async fn signup(&self, project_id: &str, request: &SignupRequest) -> Result<User> {
        let username = request.username.trim();
        let email = request.email.trim();
        if username.is_empty() || request.password.is_empty() || email.is_empty() {
            return Err(DomainError::Validation(
                "username, password and email are required".into(),
            ));
        }
        let mut users = loaders::load_users(&*self.store, project_id, &*self.hasher).await?;
        let user = User {
            id: Uuid::now_v7().to_string(),
            username: username.into(),
            password_hash: self.hasher.hash(&request.password)?,
            email: email.into(),
            role: Role::User,
            project_id: project_id.into(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        loaders::save_users(&*self.store, project_id, &users).await?;
        self.write_session(project_id, &user).await?;
        info!(project_id, username = %user.username, "user signed up");
        Ok(user)
    }

    pub async fn logout(&self, project_id: &str) -> Result<()> {
        self.store.remove(&keys::session(project_id)).await
    }

    async fn write_session(&self, project_id: &str, user: &User) -> Result<()> {
        self.store
            .put(&keys::session(project_id), serde_json::to_value(user)?)
            .await
    }
}
