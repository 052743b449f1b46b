//! # Comments
//!
//! Per-post comment lists, newest first. Writes need a session; edits and
//! deletes use the same author-or-admin gate as posts. Comment lists live
//! under their own key per post and are not consulted when posts move, so
//! there is no referential check that the post still exists.

use std::sync::Arc;

use chrono::Utc;
use domains::error::{DomainError, Result};
use domains::models::Comment;
use domains::ports::KeyValueStore;
use tracing::info;
use uuid::Uuid;

use crate::loaders;
use crate::permissions::{can_modify_content, PermissionService};

pub struct CommentService {
    store: Arc<dyn KeyValueStore>,
    permissions: Arc<PermissionService>,
}

impl CommentService {
    pub fn new(store: Arc<dyn KeyValueStore>, permissions: Arc<PermissionService>) -> Self {
        Self { store, permissions }
    }

    pub async fn list(&self, project_id: &str, post_id: &str) -> Result<Vec<Comment>> {
        loaders::load_comments(&*self.store, project_id, post_id).await
    }

    pub async fn add(&self, project_id: &str, post_id: &str, content: &str) -> Result<Comment> {
        let user = self.permissions.require_login(project_id).await?;
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::Validation(
                "comment content is required".into(),
            ));
        }

        let now = Utc::now();
        let comment = Comment {
            id: Uuid::now_v7().to_string(),
            post_id: post_id.into(),
            author: user.username.clone(),
            author_id: user.id.clone(),
            content: content.into(),
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M").to_string(),
        };
        let mut comments = loaders::load_comments(&*self.store, project_id, post_id).await?;
        comments.insert(0, comment.clone());
        loaders::save_comments(&*self.store, project_id, post_id, &comments).await?;
        info!(project_id, post_id, comment_id = %comment.id, "added comment");
        Ok(comment)
    }

    /// Rewrites a comment's content; the shown date and time move to the
    /// edit, which is how the thread view marks edited comments.
    pub async fn update(
        &self,
        project_id: &str,
        post_id: &str,
        comment_id: &str,
        content: &str,
    ) -> Result<Comment> {
        let user = self.permissions.require_login(project_id).await?;
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::Validation(
                "comment content is required".into(),
            ));
        }

        let mut comments = loaders::load_comments(&*self.store, project_id, post_id).await?;
        let comment = comments
            .iter_mut()
            .find(|comment| comment.id == comment_id)
            .ok_or_else(|| DomainError::not_found("Comment", comment_id))?;
        if !can_modify_content(&user, &comment.author_id, &comment.author) {
            return Err(DomainError::Unauthorized(
                "only the author or an admin can modify this comment".into(),
            ));
        }

        let now = Utc::now();
        comment.content = content.into();
        comment.date = now.format("%Y-%m-%d").to_string();
        comment.time = now.format("%H:%M").to_string();
        let updated = comment.clone();
        loaders::save_comments(&*self.store, project_id, post_id, &comments).await?;
        Ok(updated)
    }

    pub async fn delete(
        &self,
        project_id: &str,
        post_id: &str,
        comment_id: &str,
    ) -> Result<()> {
        let user = self.permissions.require_login(project_id).await?;
        let mut comments = loaders::load_comments(&*self.store, project_id, post_id).await?;
        let comment = comments
            .iter()
            .find(|comment| comment.id == comment_id)
            .ok_or_else(|| DomainError::not_found("Comment", comment_id))?;
        if !can_modify_content(&user, &comment.author_id, &comment.author) {
            return Err(DomainError::Unauthorized(
                "only the author or an admin can modify this comment".into(),
            ));
        }

        comments.retain(|comment| comment.id != comment_id);
        loaders::save_comments(&*self.store, project_id, post_id, &comments).await?;
        info!(project_id, post_id, comment_id, "deleted comment");
        Ok(())
    }
}
