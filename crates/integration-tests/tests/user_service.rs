//! Account management and the self-service profile operations.

mod common;

use common::*;
use domains::error::DomainError;
use domains::models::Role;
use services::{NewUser, PasswordChange, ProfileUpdate, UserUpdate};

fn new_user(username: &str, role: Role) -> NewUser {
    NewUser {
        username: username.into(),
        email: format!("{username}@example.com"),
        password: "secret1".into(),
        role,
    }
}

#[tokio::test]
async fn test_listing_users_requires_management() {
    let env = TestEnv::new();
    assert!(matches!(
        env.users.list(SAMPLE_PROJECT, None).await.unwrap_err(),
        DomainError::Unauthorized(_)
    ));

    env.login_sample_user().await;
    assert!(matches!(
        env.users.list(SAMPLE_PROJECT, None).await.unwrap_err(),
        DomainError::Unauthorized(_)
    ));

    env.login_sample_admin().await;
    let users = env.users.list(SAMPLE_PROJECT, None).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, SAMPLE_USER);
}

#[tokio::test]
async fn test_search_filters_username_and_email() {
    let env = TestEnv::new();
    env.login_sample_admin().await;
    env.users
        .add(SAMPLE_PROJECT, &new_user("alice", Role::User))
        .await
        .unwrap();
    env.users
        .add(SAMPLE_PROJECT, &new_user("bob", Role::User))
        .await
        .unwrap();

    let hits = env.users.list(SAMPLE_PROJECT, Some("ALICE")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].username, "alice");

    // Email side of the filter, and blank queries fall back to everyone.
    let hits = env
        .users
        .list(SAMPLE_PROJECT, Some("bob@example"))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    let all = env.users.list(SAMPLE_PROJECT, Some("   ")).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_adding_a_user_hashes_the_password() {
    let env = TestEnv::new();
    env.login_sample_admin().await;
    let user = env
        .users
        .add(SAMPLE_PROJECT, &new_user("carol", Role::ProjectAdmin))
        .await
        .unwrap();
    assert!(user.password_hash.starts_with("$argon2"));
    assert!(env.hasher.verify("secret1", &user.password_hash));
    assert_eq!(user.role, Role::ProjectAdmin);
    assert_eq!(user.project_id, SAMPLE_PROJECT);

    // The new account can log straight in.
    env.logout(SAMPLE_PROJECT).await;
    let signed_in = env
        .auth
        .login(SAMPLE_PROJECT, &login("carol", "secret1"))
        .await
        .unwrap();
    assert_eq!(signed_in.id, user.id);
}

#[tokio::test]
async fn test_add_validates_fields() {
    let env = TestEnv::new();
    env.login_sample_admin().await;

    let mut blank_name = new_user("dave", Role::User);
    blank_name.username = "   ".into();
    assert!(matches!(
        env.users.add(SAMPLE_PROJECT, &blank_name).await.unwrap_err(),
        DomainError::Validation(_)
    ));

    let mut no_password = new_user("dave", Role::User);
    no_password.password.clear();
    assert!(matches!(
        env.users
            .add(SAMPLE_PROJECT, &no_password)
            .await
            .unwrap_err(),
        DomainError::Validation(_)
    ));
}

#[tokio::test]
async fn test_update_merges_and_blank_password_keeps_hash() {
    let env = TestEnv::new();
    env.login_sample_admin().await;
    let user = env
        .users
        .add(SAMPLE_PROJECT, &new_user("erin", Role::User))
        .await
        .unwrap();

    let updated = env
        .users
        .update(
            SAMPLE_PROJECT,
            &user.id,
            &UserUpdate {
                email: Some("erin@corp.example.com".into()),
                password: Some(String::new()),
                role: Some(Role::ProjectAdmin),
                ..UserUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.username, "erin");
    assert_eq!(updated.email, "erin@corp.example.com");
    assert_eq!(updated.role, Role::ProjectAdmin);
    assert_eq!(updated.password_hash, user.password_hash);

    assert!(matches!(
        env.users
            .update(SAMPLE_PROJECT, "missing", &UserUpdate::default())
            .await
            .unwrap_err(),
        DomainError::NotFound(..)
    ));
}

#[tokio::test]
async fn test_remove_deletes_only_the_target() {
    let env = TestEnv::new();
    env.login_sample_admin().await;
    let doomed = env
        .users
        .add(SAMPLE_PROJECT, &new_user("frank", Role::User))
        .await
        .unwrap();

    env.users.remove(SAMPLE_PROJECT, &doomed.id).await.unwrap();
    let users = env.users.list(SAMPLE_PROJECT, None).await.unwrap();
    assert!(users.iter().all(|user| user.id != doomed.id));
    assert!(users.iter().any(|user| user.username == SAMPLE_USER));

    assert!(matches!(
        env.users.remove(SAMPLE_PROJECT, &doomed.id).await.unwrap_err(),
        DomainError::NotFound(..)
    ));
}

#[tokio::test]
async fn test_profile_update_syncs_session_and_list() {
    let env = TestEnv::new();
    env.login_sample_user().await;

    let updated = env
        .users
        .update_profile(
            SAMPLE_PROJECT,
            &ProfileUpdate {
                username: "renamed_user".into(),
                email: "renamed@example.com".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.username, "renamed_user");

    // Session reflects the change without a fresh login.
    let session = env
        .permissions
        .current_user(SAMPLE_PROJECT)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.username, "renamed_user");

    // So does the stored list.
    env.login_sample_admin().await;
    let users = env.users.list(SAMPLE_PROJECT, None).await.unwrap();
    assert!(users.iter().any(|user| user.username == "renamed_user"));
}

#[tokio::test]
async fn test_registry_admin_profile_lives_in_the_session_only() {
    let env = TestEnv::new();
    env.login_sample_admin().await;

    // The registry admin has no row in the user list, so only the
    // session record changes.
    let updated = env
        .users
        .update_profile(
            SAMPLE_PROJECT,
            &ProfileUpdate {
                username: "head_admin".into(),
                email: "head@example.com".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.username, "head_admin");

    let users = env.users.list(SAMPLE_PROJECT, None).await.unwrap();
    assert!(users.iter().all(|user| user.username != "head_admin"));
}

#[tokio::test]
async fn test_super_admin_profile_is_refused() {
    let env = TestEnv::new();
    env.super_login().await;
    let err = env
        .users
        .update_profile(
            SAMPLE_PROJECT,
            &ProfileUpdate {
                username: "root".into(),
                email: "root@example.com".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn test_change_password_verifies_and_rotates() {
    let env = TestEnv::new();
    env.login_sample_user().await;

    assert!(matches!(
        env.users
            .change_password(
                SAMPLE_PROJECT,
                &PasswordChange {
                    current_password: "wrong".into(),
                    new_password: "longenough".into(),
                },
            )
            .await
            .unwrap_err(),
        DomainError::Unauthorized(_)
    ));

    assert!(matches!(
        env.users
            .change_password(
                SAMPLE_PROJECT,
                &PasswordChange {
                    current_password: SAMPLE_USER_PASSWORD.into(),
                    new_password: "short".into(),
                },
            )
            .await
            .unwrap_err(),
        DomainError::Validation(_)
    ));

    env.users
        .change_password(
            SAMPLE_PROJECT,
            &PasswordChange {
                current_password: SAMPLE_USER_PASSWORD.into(),
                new_password: "brand-new-pass".into(),
            },
        )
        .await
        .unwrap();

    // Old credential is dead, new one works.
    env.logout(SAMPLE_PROJECT).await;
    assert!(env
        .auth
        .login(SAMPLE_PROJECT, &login(SAMPLE_USER, SAMPLE_USER_PASSWORD))
        .await
        .is_err());
    env.auth
        .login(SAMPLE_PROJECT, &login(SAMPLE_USER, "brand-new-pass"))
        .await
        .unwrap();
}
