//! # seed
//!
//! Offline demo seeding. Writes the same first-run state the server would
//! create lazily, then gives the first sample project a larger showcase
//! dataset with notice, free and Q&A boards. Every write is guarded by a
//! key-exists check, so re-running converges instead of stacking
//! duplicates.

use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};
use domains::keys;
use domains::models::{BoardPosts, Category, CategoryKind, Comment, Post, Project};
use domains::ports::{KeyValueStore, PasswordHasher};
use serde_json::Value;
use services::sample;
use services::{PermissionService, ProjectService};
use storage_adapters::JsonFileStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = configs::AppConfig::load().context("loading configuration")?;

    // Seeding only makes sense against the data file; the backend setting
    // is for the server process.
    let store: Arc<dyn KeyValueStore> =
        Arc::new(JsonFileStore::open(&config.storage.path).context("opening data file")?);
    let hasher: Arc<dyn PasswordHasher> = Arc::new(auth_adapters::Argon2PasswordHasher::new());

    let permissions = Arc::new(PermissionService::new(store.clone()));
    let projects = ProjectService::new(store.clone(), hasher.clone(), permissions);

    let mut written = 0usize;
    let mut skipped = 0usize;

    if projects.ensure_sample_data().await? {
        written += 1;
    } else {
        skipped += 1;
    }

    let registry: Vec<Project> = match store.get(keys::PROJECTS).await? {
        Some(value) => serde_json::from_value(value).context("project registry is unreadable")?,
        None => Vec::new(),
    };

    for project in &registry {
        let showcase = project.id == "sample_project_1";

        let categories = if showcase {
            showcase_categories()
        } else {
            sample::default_categories()
        };
        let posts = if showcase {
            showcase_posts(&project.id)
        } else {
            sample::default_posts(&project.id)
        };
        let users = sample::sample_users(&project.id, &*hasher)?;

        write_missing(
            &*store,
            &keys::categories(&project.id),
            serde_json::to_value(&categories)?,
            &mut written,
            &mut skipped,
        )
        .await?;
        write_missing(
            &*store,
            &keys::posts(&project.id),
            serde_json::to_value(&posts)?,
            &mut written,
            &mut skipped,
        )
        .await?;
        write_missing(
            &*store,
            &keys::users(&project.id),
            serde_json::to_value(&users)?,
            &mut written,
            &mut skipped,
        )
        .await?;

        if showcase {
            // A short thread on the first free-board post.
            write_missing(
                &*store,
                &keys::comments(&project.id, "5"),
                serde_json::to_value(showcase_comments())?,
                &mut written,
                &mut skipped,
            )
            .await?;
        }
    }

    info!(projects = registry.len(), written, skipped, "seeding finished");
    Ok(())
}

/// Writes `value` under `key` unless the key already holds something.
async fn write_missing(
    store: &dyn KeyValueStore,
    key: &str,
    value: Value,
    written: &mut usize,
    skipped: &mut usize,
) -> anyhow::Result<()> {
    if store.get(key).await?.is_some() {
        info!(key, "already seeded, leaving as is");
        *skipped += 1;
        return Ok(());
    }
    store.put(key, value).await?;
    info!(key, "seeded");
    *written += 1;
    Ok(())
}

/// Default navigation plus three extra boards for the showcase project.
fn showcase_categories() -> Vec<Category> {
    let mut categories = sample::default_categories();
    for (name, board_type) in [
        ("Notice Board", "notice"),
        ("Free Board", "free"),
        ("Q&A Board", "qna"),
    ] {
        let order = categories.len() as u32 + 1;
        categories.push(Category {
            id: order.to_string(),
            name: name.into(),
            kind: CategoryKind::Board,
            board_type: board_type.into(),
            content: String::new(),
            order,
        });
    }
    categories
}

/// Welcome posts plus a handful of demo posts, backdated so the recent
/// listing has an ordering worth looking at.
fn showcase_posts(project_id: &str) -> BoardPosts {
    let mut posts = sample::default_posts(project_id);
    posts.insert(
        "notice".into(),
        vec![
            demo_post(
                project_id,
                "notice",
                "Notice Board",
                "3",
                "Scheduled maintenance this Friday",
                "The site will be read-only between 02:00 and 03:00 while we move storage.",
                2,
            ),
            demo_post(
                project_id,
                "notice",
                "Notice Board",
                "4",
                "Community guidelines",
                "Be kind, stay on topic, and report anything that looks broken.",
                30,
            ),
        ],
    );
    posts.insert(
        "free".into(),
        vec![
            demo_post(
                project_id,
                "free",
                "Free Board",
                "5",
                "Show us your workspace",
                "Post a photo of your desk setup. Bonus points for cable management.",
                1,
            ),
            demo_post(
                project_id,
                "free",
                "Free Board",
                "6",
                "Weekly small wins",
                "Share something that went well this week, however small.",
                8,
            ),
            demo_post(
                project_id,
                "free",
                "Free Board",
                "7",
                "Hello from the new admin",
                "I will be looking after this board from now on. Say hi!",
                26,
            ),
        ],
    );
    posts.insert(
        "qna".into(),
        vec![
            demo_post(
                project_id,
                "qna",
                "Q&A Board",
                "8",
                "How do I change my password?",
                "I found the profile page but not the password form. Where is it?",
                4,
            ),
            demo_post(
                project_id,
                "qna",
                "Q&A Board",
                "9",
                "Can I attach files to a post?",
                "Images up to 10 MB work for me, but what about documents?",
                12,
            ),
        ],
    );
    posts
}

fn showcase_comments() -> Vec<Comment> {
    vec![
        Comment {
            id: "2".into(),
            post_id: "5".into(),
            author: "test_user".into(),
            author_id: "1".into(),
            content: "Mine is mostly coffee cups, but fine.".into(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
            time: "10:42".into(),
        },
        Comment {
            id: "1".into(),
            post_id: "5".into(),
            author: sample::SEED_AUTHOR.into(),
            author_id: sample::SEED_AUTHOR_ID.into(),
            content: "Looking forward to the photos.".into(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
            time: "09:15".into(),
        },
    ]
}

fn demo_post(
    project_id: &str,
    board_type: &str,
    category: &str,
    id: &str,
    title: &str,
    content: &str,
    hours_ago: i64,
) -> Post {
    let at = Utc::now() - Duration::hours(hours_ago);
    Post {
        id: id.into(),
        title: title.into(),
        content: content.into(),
        category: category.into(),
        author: sample::SEED_AUTHOR.into(),
        author_id: sample::SEED_AUTHOR_ID.into(),
        date: at.format("%Y-%m-%d").to_string(),
        views: 0,
        is_public: true,
        board_type: board_type.into(),
        project_id: project_id.into(),
        files: Vec::new(),
        created_at: at,
        updated_at: at,
    }
}
