//! Heal-on-read accessors for the content keys.
//!
//! Reads that hit a missing or unreadable value fall back to the hardcoded
//! datasets and write them back, so the store repairs itself instead of
//! erroring pages out. Comments and files degrade to empty lists without a
//! write-back; sessions are handled in the permission service.

use domains::error::Result;
use domains::keys;
use domains::models::{BoardPosts, Category, Comment, FileMeta, Project, User};
use domains::ports::{KeyValueStore, PasswordHasher};
use serde_json::Value;
use tracing::warn;

use crate::sample;

fn parse<T: serde::de::DeserializeOwned>(key: &str, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(key, %err, "stored value is unreadable, falling back");
            None
        }
    }
}

/// Project registry; missing or unreadable heals to the sample projects.
/// An empty list is a valid state and stays empty.
pub(crate) async fn load_registry(
    store: &dyn KeyValueStore,
    hasher: &dyn PasswordHasher,
) -> Result<Vec<Project>> {
    if let Some(value) = store.get(keys::PROJECTS).await? {
        if let Some(registry) = parse::<Vec<Project>>(keys::PROJECTS, value) {
            return Ok(registry);
        }
    }
    let registry = sample::sample_projects(hasher)?;
    store
        .put(keys::PROJECTS, serde_json::to_value(&registry)?)
        .await?;
    Ok(registry)
}

/// Registry read for paths that must not seed anything (e.g. clearing
/// sessions on logout). Missing or unreadable reads as empty.
pub(crate) async fn read_registry_lenient(store: &dyn KeyValueStore) -> Result<Vec<Project>> {
    match store.get(keys::PROJECTS).await? {
        Some(value) => Ok(parse(keys::PROJECTS, value).unwrap_or_default()),
        None => Ok(Vec::new()),
    }
}

pub(crate) async fn save_registry(
    store: &dyn KeyValueStore,
    registry: &[Project],
) -> Result<()> {
    store
        .put(keys::PROJECTS, serde_json::to_value(registry)?)
        .await
}

pub(crate) async fn load_categories(
    store: &dyn KeyValueStore,
    project_id: &str,
) -> Result<Vec<Category>> {
    let key = keys::categories(project_id);
    if let Some(value) = store.get(&key).await? {
        if let Some(categories) = parse::<Vec<Category>>(&key, value) {
            return Ok(categories);
        }
    }
    let categories = sample::default_categories();
    store.put(&key, serde_json::to_value(&categories)?).await?;
    Ok(categories)
}

pub(crate) async fn save_categories(
    store: &dyn KeyValueStore,
    project_id: &str,
    categories: &[Category],
) -> Result<()> {
    store
        .put(&keys::categories(project_id), serde_json::to_value(categories)?)
        .await
}

pub(crate) async fn load_posts(
    store: &dyn KeyValueStore,
    project_id: &str,
) -> Result<BoardPosts> {
    let key = keys::posts(project_id);
    if let Some(value) = store.get(&key).await? {
        if let Some(posts) = parse::<BoardPosts>(&key, value) {
            return Ok(posts);
        }
    }
    let posts = sample::default_posts(project_id);
    store.put(&key, serde_json::to_value(&posts)?).await?;
    Ok(posts)
}

pub(crate) async fn save_posts(
    store: &dyn KeyValueStore,
    project_id: &str,
    posts: &BoardPosts,
) -> Result<()> {
    store
        .put(&keys::posts(project_id), serde_json::to_value(posts)?)
        .await
}

pub(crate) async fn load_users(
    store: &dyn KeyValueStore,
    project_id: &str,
    hasher: &dyn PasswordHasher,
) -> Result<Vec<User>> {
    let key = keys::users(project_id);
    if let Some(value) = store.get(&key).await? {
        if let Some(users) = parse::<Vec<User>>(&key, value) {
            return Ok(users);
        }
    }
    let users = sample::sample_users(project_id, hasher)?;
    store.put(&key, serde_json::to_value(&users)?).await?;
    Ok(users)
}

pub(crate) async fn save_users(
    store: &dyn KeyValueStore,
    project_id: &str,
    users: &[User],
) -> Result<()> {
    store
        .put(&keys::users(project_id), serde_json::to_value(users)?)
        .await
}

/// Comments degrade to empty without writing back.
pub(crate) async fn load_comments(
    store: &dyn KeyValueStore,
    project_id: &str,
    post_id: &str,
) -> Result<Vec<Comment>> {
    let key = keys::comments(project_id, post_id);
    match store.get(&key).await? {
        Some(value) => Ok(parse(&key, value).unwrap_or_default()),
        None => Ok(Vec::new()),
    }
}

pub(crate) async fn save_comments(
    store: &dyn KeyValueStore,
    project_id: &str,
    post_id: &str,
    comments: &[Comment],
) -> Result<()> {
    store
        .put(
            &keys::comments(project_id, post_id),
            serde_json::to_value(comments)?,
        )
        .await
}

/// File metadata degrades to empty without writing back.
pub(crate) async fn load_files(
    store: &dyn KeyValueStore,
    project_id: &str,
) -> Result<Vec<FileMeta>> {
    let key = keys::files(project_id);
    match store.get(&key).await? {
        Some(value) => Ok(parse(&key, value).unwrap_or_default()),
        None => Ok(Vec::new()),
    }
}

pub(crate) async fn save_files(
    store: &dyn KeyValueStore,
    project_id: &str,
    files: &[FileMeta],
) -> Result<()> {
    store
        .put(&keys::files(project_id), serde_json::to_value(files)?)
        .await
}

/// Posts map read for the add-board-category path: a missing key is an
/// empty map (no default buckets), while an unreadable one still heals to
/// the defaults so existing data is never clobbered by a blind overwrite.
pub(crate) async fn load_posts_or_empty(
    store: &dyn KeyValueStore,
    project_id: &str,
) -> Result<BoardPosts> {
    let key = keys::posts(project_id);
    match store.get(&key).await? {
        Some(value) => match parse::<BoardPosts>(&key, value) {
            Some(posts) => Ok(posts),
            None => {
                let posts = sample::default_posts(project_id);
                store.put(&key, serde_json::to_value(&posts)?).await?;
                Ok(posts)
            }
        },
        None => Ok(BoardPosts::new()),
    }
}
