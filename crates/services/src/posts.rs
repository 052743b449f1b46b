//! # Posts
//!
//! Board content: create/read/update/delete with the author-or-admin gate,
//! plus search across all boards and the recent-posts feed. Reads are
//! public; writes need a logged-in session. The stored view counter is
//! surfaced but never incremented anywhere, which mirrors the way the
//! admin console reports it.

use std::sync::Arc;

use chrono::Utc;
use domains::error::{DomainError, Result};
use domains::keys;
use domains::models::{AttachmentMeta, BoardPost, BoardPosts, Category, Post, User};
use domains::ports::KeyValueStore;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::loaders;
use crate::permissions::{can_modify_content, PermissionService};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
    #[serde(default)]
    pub files: Vec<AttachmentMeta>,
}

fn default_is_public() -> bool {
    true
}

pub struct PostService {
    store: Arc<dyn KeyValueStore>,
    permissions: Arc<PermissionService>,
}

impl PostService {
    pub fn new(store: Arc<dyn KeyValueStore>, permissions: Arc<PermissionService>) -> Self {
        Self { store, permissions }
    }

    /// The whole posts map, self-healing to the welcome buckets.
    pub async fn boards(&self, project_id: &str) -> Result<BoardPosts> {
        loaders::load_posts(&*self.store, project_id).await
    }

    /// One board's posts, newest first. An unknown board type is an empty
    /// list, not an error; boards appear lazily with their first post.
    pub async fn list(&self, project_id: &str, board_type: &str) -> Result<Vec<Post>> {
        let posts = loaders::load_posts(&*self.store, project_id).await?;
        Ok(posts.get(board_type).cloned().unwrap_or_default())
    }

    pub async fn get(&self, project_id: &str, board_type: &str, post_id: &str) -> Result<Post> {
        let posts = loaders::load_posts(&*self.store, project_id).await?;
        posts
            .get(board_type)
            .and_then(|bucket| bucket.iter().find(|post| post.id == post_id))
            .cloned()
            .ok_or_else(|| DomainError::not_found("Post", post_id))
    }

    /// Creates a post at the top of its board. Author fields come from the
    /// session; the display date is fixed at creation.
    pub async fn create(
        &self,
        project_id: &str,
        board_type: &str,
        draft: &PostDraft,
    ) -> Result<Post> {
        let user = self.permissions.require_login(project_id).await?;
        let (title, content) = validated(draft)?;

        let now = Utc::now();
        let post = Post {
            id: Uuid::now_v7().to_string(),
            title,
            content,
            category: draft.category.clone(),
            author: user.username.clone(),
            author_id: user.id.clone(),
            date: now.format("%Y-%m-%d").to_string(),
            views: 0,
            is_public: draft.is_public,
            board_type: board_type.into(),
            project_id: project_id.into(),
            files: draft.files.clone(),
            created_at: now,
            updated_at: now,
        };

        let mut posts = loaders::load_posts(&*self.store, project_id).await?;
        posts
            .entry(board_type.to_string())
            .or_default()
            .insert(0, post.clone());
        loaders::save_posts(&*self.store, project_id, &posts).await?;
        info!(project_id, board_type, post_id = %post.id, "created post");
        Ok(post)
    }

    /// Replaces the editable fields of a post. Only the author or an admin
    /// may edit; `updated_at` moves, the display date and view count do not.
    pub async fn update(
        &self,
        project_id: &str,
        board_type: &str,
        post_id: &str,
        draft: &PostDraft,
    ) -> Result<Post> {
        let user = self.permissions.require_login(project_id).await?;
        let (title, content) = validated(draft)?;

        let mut posts = loaders::load_posts(&*self.store, project_id).await?;
        let bucket = posts
            .get_mut(board_type)
            .ok_or_else(|| DomainError::not_found("Post", post_id))?;
        let post = bucket
            .iter_mut()
            .find(|post| post.id == post_id)
            .ok_or_else(|| DomainError::not_found("Post", post_id))?;
        require_author_or_admin(&user, post)?;

        post.title = title;
        post.content = content;
        post.category = draft.category.clone();
        post.is_public = draft.is_public;
        post.files = draft.files.clone();
        post.updated_at = Utc::now();
        let updated = post.clone();
        loaders::save_posts(&*self.store, project_id, &posts).await?;
        info!(project_id, board_type, post_id, "updated post");
        Ok(updated)
    }

    /// Deletes a post and its comment list.
    pub async fn delete(&self, project_id: &str, board_type: &str, post_id: &str) -> Result<()> {
        let user = self.permissions.require_login(project_id).await?;
        let mut posts = loaders::load_posts(&*self.store, project_id).await?;
        let bucket = posts
            .get_mut(board_type)
            .ok_or_else(|| DomainError::not_found("Post", post_id))?;
        let post = bucket
            .iter()
            .find(|post| post.id == post_id)
            .ok_or_else(|| DomainError::not_found("Post", post_id))?;
        require_author_or_admin(&user, post)?;

        bucket.retain(|post| post.id != post_id);
        loaders::save_posts(&*self.store, project_id, &posts).await?;
        self.store
            .remove(&keys::comments(project_id, post_id))
            .await?;
        info!(project_id, board_type, post_id, "deleted post");
        Ok(())
    }

    /// Case-insensitive substring search over title, content and author
    /// across every board.
    pub async fn search(&self, project_id: &str, query: &str) -> Result<Vec<BoardPost>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Err(DomainError::Validation("a search term is required".into()));
        }
        let posts = loaders::load_posts(&*self.store, project_id).await?;
        let categories = loaders::load_categories(&*self.store, project_id).await?;

        let mut hits = Vec::new();
        for (board_type, bucket) in &posts {
            let board_name = board_name_for(&categories, board_type);
            for post in bucket {
                let matched = post.title.to_lowercase().contains(&query)
                    || post.content.to_lowercase().contains(&query)
                    || post.author.to_lowercase().contains(&query);
                if matched {
                    hits.push(annotate(post, board_type, &board_name));
                }
            }
        }
        Ok(hits)
    }

    /// The newest posts across every board.
    pub async fn recent(&self, project_id: &str, limit: usize) -> Result<Vec<BoardPost>> {
        let posts = loaders::load_posts(&*self.store, project_id).await?;
        let categories = loaders::load_categories(&*self.store, project_id).await?;
        Ok(recent_from(&posts, &categories, limit))
    }
}

fn validated(draft: &PostDraft) -> Result<(String, String)> {
    let title = draft.title.trim();
    let content = draft.content.trim();
    if title.is_empty() || content.is_empty() {
        return Err(DomainError::Validation(
            "title and content are required".into(),
        ));
    }
    Ok((title.into(), content.into()))
}

fn require_author_or_admin(user: &User, post: &Post) -> Result<()> {
    if can_modify_content(user, &post.author_id, &post.author) {
        Ok(())
    } else {
        Err(DomainError::Unauthorized(
            "only the author or an admin can modify this post".into(),
        ))
    }
}

/// Flattens the posts map, annotates each post with its board display name
/// and returns the newest `limit` entries.
pub(crate) fn recent_from(
    posts: &BoardPosts,
    categories: &[Category],
    limit: usize,
) -> Vec<BoardPost> {
    let mut all: Vec<BoardPost> = Vec::new();
    for (board_type, bucket) in posts {
        let board_name = board_name_for(categories, board_type);
        for post in bucket {
            all.push(annotate(post, board_type, &board_name));
        }
    }
    all.sort_by(|a, b| b.post.created_at.cmp(&a.post.created_at));
    all.truncate(limit);
    all
}

fn annotate(post: &Post, board_type: &str, board_name: &str) -> BoardPost {
    let mut post = post.clone();
    // The bucket key wins over whatever the record carries; moved or
    // hand-edited posts stay attributed to the board they live on.
    post.board_type = board_type.into();
    BoardPost {
        post,
        board_name: board_name.into(),
    }
}

/// Display name for a board type: the category that points at it, a stock
/// name for the well-known defaults, or the raw board type for orphans.
fn board_name_for(categories: &[Category], board_type: &str) -> String {
    if let Some(category) = categories
        .iter()
        .find(|category| category.board_type == board_type)
    {
        return category.name.clone();
    }
    match board_type {
        "notice" => "Notice Board".into(),
        "free" => "Free Board".into(),
        "qna" => "Q&A Board".into(),
        "gallery" => "Gallery Board".into(),
        other => other.into(),
    }
}
