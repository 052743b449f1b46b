//! # Stats
//!
//! Dashboard counters for a single project. Everything here is derived
//! from the stored records at read time, so the numbers track whatever
//! the content services last wrote.

use std::sync::Arc;

use domains::error::Result;
use domains::models::{CategoryKind, ProjectStats};
use domains::ports::{KeyValueStore, PasswordHasher};

use crate::permissions::PermissionService;
use crate::{loaders, posts};

const RECENT_POST_LIMIT: usize = 5;

pub struct StatsService {
    store: Arc<dyn KeyValueStore>,
    hasher: Arc<dyn PasswordHasher>,
    permissions: Arc<PermissionService>,
}

impl StatsService {
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

    pub async fn project_stats(&self, project_id: &str) -> Result<ProjectStats> {
        self.permissions.require_management(project_id).await?;
        let posts = loaders::load_posts(&*self.store, project_id).await?;
        let users = loaders::load_users(&*self.store, project_id, &*self.hasher).await?;
        let categories = loaders::load_categories(&*self.store, project_id).await?;

        Ok(ProjectStats {
            total_posts: posts.values().map(Vec::len).sum(),
            total_users: users.len(),
            total_categories: categories.len(),
            total_boards: categories
                .iter()
                .filter(|category| category.kind == CategoryKind::Board)
                .count(),
            recent_posts: posts::recent_from(&posts, &categories, RECENT_POST_LIMIT),
        })
    }
}
