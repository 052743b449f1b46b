//! # Project Registry
//!
//! Create, list, update and delete tenant projects, plus first-run sample
//! seeding. Creation seeds the default categories, the welcome posts and
//! the admin account; deletion sweeps every key under the project prefix.

use std::sync::Arc;

use chrono::Utc;
use domains::error::{DomainError, Result};
use domains::keys;
use domains::models::{Project, Role, User};
use domains::ports::{KeyValueStore, PasswordHasher};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::loaders;
use crate::permissions::PermissionService;
use crate::sample;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub admin_username: String,
    pub admin_password: String,
    pub admin_email: String,
}

/// Settings form payload. Empty strings mean "keep the current value",
/// matching the admin console behavior.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectSettings {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

pub struct ProjectService {
    store: Arc<dyn KeyValueStore>,
    hasher: Arc<dyn PasswordHasher>,
    permissions: Arc<PermissionService>,
}

impl ProjectService {
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

    /// Full registry; the super-admin dashboard view.
    pub async fn list(&self) -> Result<Vec<Project>> {
        self.permissions.require_super_admin().await?;
        loaders::load_registry(&*self.store, &*self.hasher).await
    }

    /// Single project lookup, available without a session so public pages
    /// can render the name and description.
    pub async fn get(&self, project_id: &str) -> Result<Project> {
        loaders::load_registry(&*self.store, &*self.hasher)
            .await?
            .into_iter()
            .find(|project| project.id == project_id)
            .ok_or_else(|| DomainError::not_found("Project", project_id))
    }

    /// Creates a project and seeds its starting content: the admin account,
    /// the four default categories and the welcome posts.
    pub async fn create(&self, request: &NewProject) -> Result<Project> {
        if !self.permissions.has_project_creation_permission().await {
            return Err(DomainError::Unauthorized(
                "only the super admin can create projects".into(),
            ));
        }
        let name = request.name.trim();
        let description = request.description.trim();
        let admin_username = request.admin_username.trim();
        let admin_email = request.admin_email.trim();
        if name.is_empty()
            || description.is_empty()
            || admin_username.is_empty()
            || request.admin_password.is_empty()
            || admin_email.is_empty()
        {
            return Err(DomainError::Validation(
                "name, description and admin credentials are required".into(),
            ));
        }

        let now = Utc::now();
        let project = Project {
            id: format!("project_{}", Uuid::now_v7().simple()),
            name: name.into(),
            description: description.into(),
            admin_username: admin_username.into(),
            admin_password_hash: self.hasher.hash(&request.admin_password)?,
            admin_email: admin_email.into(),
            created_at: now,
        };

        let mut registry = loaders::load_registry(&*self.store, &*self.hasher).await?;
        registry.push(project.clone());
        loaders::save_registry(&*self.store, &registry).await?;

        let admin = User {
            id: Uuid::now_v7().to_string(),
            username: project.admin_username.clone(),
            password_hash: project.admin_password_hash.clone(),
            email: project.admin_email.clone(),
            role: Role::ProjectAdmin,
            project_id: project.id.clone(),
            created_at: now,
        };
        loaders::save_users(&*self.store, &project.id, &[admin]).await?;
        loaders::save_categories(&*self.store, &project.id, &sample::default_categories())
            .await?;
        loaders::save_posts(&*self.store, &project.id, &sample::default_posts(&project.id))
            .await?;

        info!(project_id = %project.id, name = %project.name, "created project");
        Ok(project)
    }

    /// Updates name/description. Empty or missing fields keep the stored
    /// value.
    pub async fn update_settings(
        &self,
        project_id: &str,
        settings: &ProjectSettings,
    ) -> Result<Project> {
        self.permissions.require_management(project_id).await?;
        let mut registry = loaders::load_registry(&*self.store, &*self.hasher).await?;
        let project = registry
            .iter_mut()
            .find(|project| project.id == project_id)
            .ok_or_else(|| DomainError::not_found("Project", project_id))?;

        if let Some(name) = settings.name.as_deref() {
            if !name.trim().is_empty() {
                project.name = name.trim().into();
            }
        }
        if let Some(description) = settings.description.as_deref() {
            if !description.trim().is_empty() {
                project.description = description.trim().into();
            }
        }
        let updated = project.clone();
        loaders::save_registry(&*self.store, &registry).await?;
        info!(project_id, "updated project settings");
        Ok(updated)
    }

    /// Removes the registry entry, then every key under the project prefix:
    /// users, categories, posts, all comment lists, files and the session.
    /// No rollback; a failure mid-sweep leaves the remaining keys behind.
    pub async fn delete(&self, project_id: &str) -> Result<()> {
        self.permissions.require_super_admin().await?;
        let mut registry = loaders::load_registry(&*self.store, &*self.hasher).await?;
        let before = registry.len();
        registry.retain(|project| project.id != project_id);
        if registry.len() == before {
            return Err(DomainError::not_found("Project", project_id));
        }
        loaders::save_registry(&*self.store, &registry).await?;

        let scoped = self.store.keys(&keys::project_prefix(project_id)).await?;
        for key in &scoped {
            self.store.remove(key).await?;
        }
        info!(project_id, swept = scoped.len(), "deleted project");
        Ok(())
    }

    /// First-run seeding: writes the sample registry when no `projects` key
    /// exists yet. A present-but-empty registry is left alone so deleting
    /// every project does not resurrect the samples.
    pub async fn ensure_sample_data(&self) -> Result<bool> {
        if self.store.get(keys::PROJECTS).await?.is_some() {
            return Ok(false);
        }
        let registry = sample::sample_projects(&*self.hasher)?;
        loaders::save_registry(&*self.store, &registry).await?;
        info!(projects = registry.len(), "seeded sample projects into an empty store");
        Ok(true)
    }
}
