//! # Categories
//!
//! The ordered navigation structure of a project: static pages and boards.
//! Writes require management permission; reads are public and self-heal to
//! the default four categories.

use std::sync::Arc;

use domains::error::{DomainError, Result};
use domains::models::{Category, CategoryKind, Tab};
use domains::ports::KeyValueStore;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::loaders;
use crate::permissions::PermissionService;
use crate::projection;
use crate::sample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    #[serde(default)]
    pub board_type: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<CategoryKind>,
    #[serde(default)]
    pub board_type: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

pub struct CategoryService {
    store: Arc<dyn KeyValueStore>,
    permissions: Arc<PermissionService>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn KeyValueStore>, permissions: Arc<PermissionService>) -> Self {
        Self { store, permissions }
    }

    pub async fn list(&self, project_id: &str) -> Result<Vec<Category>> {
        loaders::load_categories(&*self.store, project_id).await
    }

    /// The navigation tabs derived from the category list.
    pub async fn tabs(&self, project_id: &str) -> Result<Vec<Tab>> {
        Ok(projection::tabs_for(&self.list(project_id).await?))
    }

    /// Adds a category at the end of the list.
    ///
    /// Pages get a derived `page_<slug>` board type and, when none was
    /// written, placeholder content. Boards must name a board type; a board
    /// type without a posts bucket gets a welcome post so the new board is
    /// never blank.
    pub async fn create(&self, project_id: &str, request: &NewCategory) -> Result<Category> {
        self.permissions.require_management(project_id).await?;
        let name = request.name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("category name is required".into()));
        }

        let (board_type, content) = match request.kind {
            CategoryKind::Page => {
                let content = if request.content.trim().is_empty() {
                    format!("<h1>{name}</h1><p>Write the page content here.</p>")
                } else {
                    request.content.clone()
                };
                (format!("page_{}", page_slug(name)), content)
            }
            CategoryKind::Board => {
                let board_type = request.board_type.trim().to_string();
                if board_type.is_empty() {
                    return Err(DomainError::Validation(
                        "a board category needs a board type".into(),
                    ));
                }
                self.seed_board_bucket(project_id, &board_type, name).await?;
                (board_type, request.content.clone())
            }
        };

        let mut categories = loaders::load_categories(&*self.store, project_id).await?;
        let category = Category {
            id: Uuid::now_v7().to_string(),
            name: name.into(),
            kind: request.kind,
            board_type,
            content,
            order: (categories.len() + 1) as u32,
        };
        categories.push(category.clone());
        renumber(&mut categories);
        loaders::save_categories(&*self.store, project_id, &categories).await?;
        info!(project_id, name = %category.name, kind = ?category.kind, "added category");
        Ok(category)
    }

    /// Merges the provided fields into an existing category. The board
    /// type is never re-derived from the name on update.
    pub async fn update(
        &self,
        project_id: &str,
        category_id: &str,
        request: &CategoryUpdate,
    ) -> Result<Category> {
        self.permissions.require_management(project_id).await?;
        let mut categories = loaders::load_categories(&*self.store, project_id).await?;
        let category = categories
            .iter_mut()
            .find(|category| category.id == category_id)
            .ok_or_else(|| DomainError::not_found("Category", category_id))?;

        if let Some(name) = request.name.as_deref() {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::Validation("category name is required".into()));
            }
            category.name = name.into();
        }
        if let Some(kind) = request.kind {
            category.kind = kind;
        }
        if let Some(board_type) = request.board_type.as_deref() {
            if !board_type.trim().is_empty() {
                category.board_type = board_type.trim().into();
            }
        }
        if let Some(content) = request.content.as_deref() {
            category.content = content.into();
        }
        let updated = category.clone();
        loaders::save_categories(&*self.store, project_id, &categories).await?;
        info!(project_id, category_id, "updated category");
        Ok(updated)
    }

    /// Replaces the page content of a category; the page editor path.
    pub async fn update_page_content(
        &self,
        project_id: &str,
        category_id: &str,
        content: &str,
    ) -> Result<Category> {
        self.update(
            project_id,
            category_id,
            &CategoryUpdate {
                content: Some(content.to_string()),
                ..CategoryUpdate::default()
            },
        )
        .await
    }

    /// Removes a category. The posts bucket it pointed at is kept; orphaned
    /// buckets keep rendering under their fallback board name.
    pub async fn delete(&self, project_id: &str, category_id: &str) -> Result<()> {
        self.permissions.require_management(project_id).await?;
        let mut categories = loaders::load_categories(&*self.store, project_id).await?;
        let before = categories.len();
        categories.retain(|category| category.id != category_id);
        if categories.len() == before {
            return Err(DomainError::not_found("Category", category_id));
        }
        renumber(&mut categories);
        loaders::save_categories(&*self.store, project_id, &categories).await?;
        info!(project_id, category_id, "deleted category");
        Ok(())
    }

    /// Moves a category one position up or down. Moves past either end are
    /// silent no-ops. Returns the full reordered list.
    pub async fn move_category(
        &self,
        project_id: &str,
        category_id: &str,
        direction: MoveDirection,
    ) -> Result<Vec<Category>> {
        self.permissions.require_management(project_id).await?;
        let mut categories = loaders::load_categories(&*self.store, project_id).await?;
        let index = categories
            .iter()
            .position(|category| category.id == category_id)
            .ok_or_else(|| DomainError::not_found("Category", category_id))?;

        match direction {
            MoveDirection::Up if index > 0 => categories.swap(index, index - 1),
            MoveDirection::Down if index + 1 < categories.len() => {
                categories.swap(index, index + 1)
            }
            _ => return Ok(categories),
        }
        renumber(&mut categories);
        loaders::save_categories(&*self.store, project_id, &categories).await?;
        Ok(categories)
    }

    async fn seed_board_bucket(
        &self,
        project_id: &str,
        board_type: &str,
        board_name: &str,
    ) -> Result<()> {
        let mut posts = loaders::load_posts_or_empty(&*self.store, project_id).await?;
        if posts.contains_key(board_type) {
            return Ok(());
        }
        posts.insert(
            board_type.to_string(),
            vec![sample::welcome_post(project_id, board_type, board_name)],
        );
        loaders::save_posts(&*self.store, project_id, &posts).await
    }
}

fn renumber(categories: &mut [Category]) {
    for (index, category) in categories.iter_mut().enumerate() {
        category.order = (index + 1) as u32;
    }
}

/// Lowercased name with whitespace runs collapsed to underscores.
fn page_slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
