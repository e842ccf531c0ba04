//! Integration tests for colab-db
//!
//! Tests entity operations with a real SQLite in-memory database

use chrono::Utc;
use colab_db::entities::{
    join_request::{self, RequestStatus},
    message, notification, project, project_member, user, JoinRequest, Message, Notification,
    Project, ProjectMember, User,
};
use colab_db::{connect, migrate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

/// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    migrate(&db).await.expect("Failed to run migrations");

    db
}

async fn insert_user(db: &DatabaseConnection, email: &str) -> user::Model {
    let now = Utc::now();
    user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set("$argon2id$fake".to_string()),
        display_name: Set(email.split('@').next().unwrap_or("user").to_string()),
        bio: Set(None),
        avatar_url: Set(None),
        is_premium: Set(false),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert user")
}

async fn insert_project(db: &DatabaseConnection, owner: &user::Model) -> project::Model {
    let now = Utc::now();
    project::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set("Test Project".to_string()),
        description: Set("A project for testing".to_string()),
        category: Set("web".to_string()),
        status: Set("open".to_string()),
        member_limit: Set(5),
        owner_id: Set(owner.id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert project")
}

#[tokio::test]
async fn test_database_connection() {
    let db = connect("sqlite::memory:").await.expect("Failed to connect");

    let backend = db.get_database_backend();
    assert!(matches!(backend, sea_orm::DatabaseBackend::Sqlite));
}

#[tokio::test]
async fn test_migrations_run_successfully() {
    let db = connect("sqlite::memory:").await.expect("Failed to connect");

    let result = migrate(&db).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let db = setup_test_db().await;

    // Running up() again must be a no-op
    let result = migrate(&db).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_and_read_user() {
    let db = setup_test_db().await;

    let inserted = insert_user(&db, "alice@example.com").await;

    let found = User::find_by_id(inserted.id)
        .one(&db)
        .await
        .expect("Query failed")
        .expect("User not found");

    assert_eq!(found.email, "alice@example.com");
    assert_eq!(found.display_name, "alice");
    assert!(found.is_active);
    assert!(!found.is_premium);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let db = setup_test_db().await;

    insert_user(&db, "dup@example.com").await;

    let now = Utc::now();
    let result = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set("dup@example.com".to_string()),
        password_hash: Set("$argon2id$other".to_string()),
        display_name: Set("dup2".to_string()),
        bio: Set(None),
        avatar_url: Set(None),
        is_premium: Set(false),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_optional_columns_accept_none() {
    let db = setup_test_db().await;

    // bio and avatar_url are nullable
    let user = insert_user(&db, "minimal@example.com").await;
    assert!(user.bio.is_none());
    assert!(user.avatar_url.is_none());

    let project = insert_project(&db, &user).await;

    // last_read_at starts out unset for new members
    let membership = project_member::ActiveModel {
        project_id: Set(project.id),
        user_id: Set(user.id),
        role: Set("Owner".to_string()),
        joined_at: Set(Utc::now()),
        last_read_at: Set(None),
    }
    .insert(&db)
    .await
    .expect("Membership without last_read_at should insert");
    assert!(membership.last_read_at.is_none());

    // image_url is only present on image posts
    let now = Utc::now();
    let msg = message::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project.id),
        sender_id: Set(Some(user.id)),
        content: Set("plain text".to_string()),
        image_url: Set(None),
        edited: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await
    .expect("Message without image should insert");
    assert!(msg.image_url.is_none());
}

#[tokio::test]
async fn test_membership_composite_primary_key() {
    let db = setup_test_db().await;

    let owner = insert_user(&db, "owner@example.com").await;
    let member = insert_user(&db, "member@example.com").await;
    let project = insert_project(&db, &owner).await;

    let now = Utc::now();
    project_member::ActiveModel {
        project_id: Set(project.id),
        user_id: Set(member.id),
        role: Set("Member".to_string()),
        joined_at: Set(now),
        last_read_at: Set(None),
    }
    .insert(&db)
    .await
    .expect("Failed to insert membership");

    // The pair is the primary key
    let found = ProjectMember::find_by_id((project.id, member.id))
        .one(&db)
        .await
        .expect("Query failed")
        .expect("Membership not found");
    assert_eq!(found.role, "Member");

    // Inserting the same pair again violates the key
    let duplicate = project_member::ActiveModel {
        project_id: Set(project.id),
        user_id: Set(member.id),
        role: Set("Designer".to_string()),
        joined_at: Set(Utc::now()),
        last_read_at: Set(None),
    }
    .insert(&db)
    .await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_request_status_enum_round_trip() {
    let db = setup_test_db().await;

    let owner = insert_user(&db, "owner@example.com").await;
    let requester = insert_user(&db, "requester@example.com").await;
    let project = insert_project(&db, &owner).await;

    let now = Utc::now();
    let request = join_request::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project.id),
        user_id: Set(requester.id),
        role: Set("Backend".to_string()),
        note: Set("I would like to help".to_string()),
        status: Set(RequestStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await
    .expect("Failed to insert request");

    assert_eq!(request.status, RequestStatus::Pending);

    let mut active: join_request::ActiveModel = request.into();
    active.status = Set(RequestStatus::Accepted);
    let updated = active.update(&db).await.expect("Failed to update");

    let found = JoinRequest::find_by_id(updated.id)
        .one(&db)
        .await
        .expect("Query failed")
        .expect("Request not found");
    assert_eq!(found.status, RequestStatus::Accepted);
    assert_eq!(found.status.as_str(), "accepted");
}

#[tokio::test]
async fn test_system_message_has_no_sender() {
    let db = setup_test_db().await;

    let owner = insert_user(&db, "owner@example.com").await;
    let project = insert_project(&db, &owner).await;

    let now = Utc::now();
    let msg = message::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project.id),
        sender_id: Set(None),
        content: Set("alice has joined the project.".to_string()),
        image_url: Set(None),
        edited: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await
    .expect("Failed to insert system message");

    assert!(msg.sender_id.is_none());
    assert!(!msg.edited);
}

#[tokio::test]
async fn test_project_delete_cascades() {
    let db = setup_test_db().await;

    let owner = insert_user(&db, "owner@example.com").await;
    let member = insert_user(&db, "member@example.com").await;
    let project = insert_project(&db, &owner).await;

    let now = Utc::now();
    project_member::ActiveModel {
        project_id: Set(project.id),
        user_id: Set(member.id),
        role: Set("Member".to_string()),
        joined_at: Set(now),
        last_read_at: Set(None),
    }
    .insert(&db)
    .await
    .expect("Failed to insert membership");

    message::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project.id),
        sender_id: Set(Some(member.id)),
        content: Set("hello".to_string()),
        image_url: Set(None),
        edited: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await
    .expect("Failed to insert message");

    join_request::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project.id),
        user_id: Set(member.id),
        role: Set("Member".to_string()),
        note: Set(String::new()),
        status: Set(RequestStatus::Accepted),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await
    .expect("Failed to insert request");

    let project_id = project.id;
    project.delete(&db).await.expect("Failed to delete project");

    let members = ProjectMember::find()
        .filter(project_member::Column::ProjectId.eq(project_id))
        .count(&db)
        .await
        .expect("Count failed");
    assert_eq!(members, 0);

    let messages = Message::find()
        .filter(message::Column::ProjectId.eq(project_id))
        .count(&db)
        .await
        .expect("Count failed");
    assert_eq!(messages, 0);

    let requests = JoinRequest::find()
        .filter(join_request::Column::ProjectId.eq(project_id))
        .count(&db)
        .await
        .expect("Count failed");
    assert_eq!(requests, 0);
}

#[tokio::test]
async fn test_notification_defaults_unread() {
    let db = setup_test_db().await;

    let recipient = insert_user(&db, "recipient@example.com").await;

    let row = notification::ActiveModel {
        id: Set(Uuid::new_v4()),
        recipient_id: Set(recipient.id),
        kind: Set("new_request".to_string()),
        content: Set("bob wants to join \"Test Project\"".to_string()),
        related_id: Set(None),
        from_user_id: Set(None),
        is_read: Set(false),
        created_at: Set(Utc::now()),
    }
    .insert(&db)
    .await
    .expect("Failed to insert notification");

    let found = Notification::find_by_id(row.id)
        .one(&db)
        .await
        .expect("Query failed")
        .expect("Notification not found");
    assert!(!found.is_read);
    assert_eq!(found.kind, "new_request");
}

#[tokio::test]
async fn test_find_projects_by_owner() {
    let db = setup_test_db().await;

    let alice = insert_user(&db, "alice@example.com").await;
    let bob = insert_user(&db, "bob@example.com").await;

    insert_project(&db, &alice).await;
    insert_project(&db, &alice).await;
    insert_project(&db, &bob).await;

    let alices = Project::find()
        .filter(project::Column::OwnerId.eq(alice.id))
        .count(&db)
        .await
        .expect("Count failed");
    assert_eq!(alices, 2);
}
