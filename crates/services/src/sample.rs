//! Hardcoded default and sample datasets.
//!
//! These are written whenever a content key is missing or unreadable, so a
//! freshly created (or damaged) project always renders something sensible.

use chrono::{Duration, Utc};
use domains::error::Result;
use domains::models::{BoardPosts, Category, CategoryKind, Post, Project, Role, User};
use domains::ports::PasswordHasher;
use uuid::Uuid;

/// Display name used on seeded content.
pub const SEED_AUTHOR: &str = "Admin";
/// Author id used on seeded content.
pub const SEED_AUTHOR_ID: &str = "admin";

/// The four categories every new project starts with.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category {
            id: "1".into(),
            name: "Introduction".into(),
            kind: CategoryKind::Page,
            board_type: "intro".into(),
            content: "<h1>About This Project</h1>\
                      <p>Write an introduction for your project here.</p>"
                .into(),
            order: 1,
        },
        Category {
            id: "2".into(),
            name: "General".into(),
            kind: CategoryKind::Page,
            board_type: "general".into(),
            content: "<h1>General Information</h1>\
                      <p>Write general information about your project here.</p>"
                .into(),
            order: 2,
        },
        Category {
            id: "3".into(),
            name: "Board".into(),
            kind: CategoryKind::Board,
            board_type: "board".into(),
            content: String::new(),
            order: 3,
        },
        Category {
            id: "4".into(),
            name: "Gallery".into(),
            kind: CategoryKind::Board,
            board_type: "gallery".into(),
            content: String::new(),
            order: 4,
        },
    ]
}

/// The posts map every new project starts with: one welcome post on each
/// default board.
pub fn default_posts(project_id: &str) -> BoardPosts {
    let mut posts = BoardPosts::new();
    posts.insert(
        "board".into(),
        vec![seed_post(
            project_id,
            "board",
            "Board",
            "The board is now open!",
            "This is the general board. Feel free to write a post.",
        )],
    );
    posts.insert(
        "gallery".into(),
        vec![seed_post(
            project_id,
            "gallery",
            "Gallery",
            "The gallery is now open!",
            "This is the gallery board. Share a post with an image.",
        )],
    );
    posts
}

/// Welcome post seeded when an admin adds a board category whose bucket
/// does not exist yet.
pub fn welcome_post(project_id: &str, board_type: &str, board_name: &str) -> Post {
    let mut post = seed_post(
        project_id,
        board_type,
        board_name,
        &format!("{board_name} is now open!"),
        &format!("Welcome to {board_name}. Write the first post."),
    );
    post.id = Uuid::now_v7().to_string();
    post
}

/// The registry written when no `projects` key exists at all.
pub fn sample_projects(hasher: &dyn PasswordHasher) -> Result<Vec<Project>> {
    let now = Utc::now();
    Ok(vec![
        Project {
            id: "sample_project_1".into(),
            name: "Company Website".into(),
            description: "The official homepage introducing the company and its services.".into(),
            admin_username: "company_admin".into(),
            admin_password_hash: hasher.hash("company123")?,
            admin_email: "admin@company.com".into(),
            created_at: now - Duration::days(2),
        },
        Project {
            id: "sample_project_2".into(),
            name: "Online Store".into(),
            description: "An e-commerce storefront for browsing and ordering products.".into(),
            admin_username: "shop_admin".into(),
            admin_password_hash: hasher.hash("shop123")?,
            admin_email: "admin@shop.com".into(),
            created_at: now - Duration::days(5),
        },
        Project {
            id: "sample_project_3".into(),
            name: "Blog".into(),
            description: "A blog for sharing notes and longer write-ups.".into(),
            admin_username: "blog_admin".into(),
            admin_password_hash: hasher.hash("blog123")?,
            admin_email: "admin@blog.com".into(),
            created_at: now - Duration::days(7),
        },
    ])
}

/// The user list written when a project has none: a single demo account.
pub fn sample_users(project_id: &str, hasher: &dyn PasswordHasher) -> Result<Vec<User>> {
    Ok(vec![User {
        id: "1".into(),
        username: "test_user".into(),
        password_hash: hasher.hash("test123")?,
        email: "test@example.com".into(),
        role: Role::User,
        project_id: project_id.into(),
        created_at: Utc::now(),
    }])
}

fn seed_post(
    project_id: &str,
    board_type: &str,
    category: &str,
    title: &str,
    content: &str,
) -> Post {
    let now = Utc::now();
    Post {
        id: "1".into(),
        title: title.into(),
        content: content.into(),
        category: category.into(),
        author: SEED_AUTHOR.into(),
        author_id: SEED_AUTHOR_ID.into(),
        date: now.format("%Y-%m-%d").to_string(),
        views: 0,
        is_public: true,
        board_type: board_type.into(),
        project_id: project_id.into(),
        files: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}
