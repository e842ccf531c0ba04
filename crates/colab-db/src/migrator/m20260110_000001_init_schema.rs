//! Consolidated initial schema migration

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // 1. Create users table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(uuid(User::Id).primary_key())
                    .col(string_len(User::Email, 255).not_null().unique_key())
                    .col(string_len(User::PasswordHash, 255).not_null())
                    .col(string_len(User::DisplayName, 255).not_null())
                    .col(text_null(User::Bio))
                    .col(string_len_null(User::AvatarUrl, 1024))
                    .col(boolean(User::IsPremium).not_null().default(false))
                    .col(boolean(User::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(User::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_email")
                    .table(User::Table)
                    .col(User::Email)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 2. Create projects table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Project::Table)
                    .if_not_exists()
                    .col(uuid(Project::Id).primary_key())
                    .col(string_len(Project::Title, 255).not_null())
                    .col(text(Project::Description).not_null())
                    .col(string_len(Project::Category, 64).not_null())
                    .col(string_len(Project::Status, 32).not_null().default("open"))
                    .col(integer(Project::MemberLimit).not_null().default(5))
                    .col(uuid(Project::OwnerId).not_null())
                    .col(
                        timestamp_with_time_zone(Project::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Project::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_owner_id")
                            .from(Project::Table, Project::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_projects_owner_id")
                    .table(Project::Table)
                    .col(Project::OwnerId)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 3. Create project_members junction table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(ProjectMember::Table)
                    .if_not_exists()
                    .col(uuid(ProjectMember::ProjectId).not_null())
                    .col(uuid(ProjectMember::UserId).not_null())
                    .col(
                        string_len(ProjectMember::Role, 64)
                            .not_null()
                            .default("Member"),
                    )
                    .col(
                        timestamp_with_time_zone(ProjectMember::JoinedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(ProjectMember::LastReadAt))
                    .primary_key(
                        Index::create()
                            .col(ProjectMember::ProjectId)
                            .col(ProjectMember::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_members_project_id")
                            .from(ProjectMember::Table, ProjectMember::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_members_user_id")
                            .from(ProjectMember::Table, ProjectMember::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_project_members_user_id")
                    .table(ProjectMember::Table)
                    .col(ProjectMember::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_project_members_project_id")
                    .table(ProjectMember::Table)
                    .col(ProjectMember::ProjectId)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 4. Create join_requests table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(JoinRequest::Table)
                    .if_not_exists()
                    .col(uuid(JoinRequest::Id).primary_key())
                    .col(uuid(JoinRequest::ProjectId).not_null())
                    .col(uuid(JoinRequest::UserId).not_null())
                    .col(string_len(JoinRequest::Role, 64).not_null())
                    .col(text(JoinRequest::Note).not_null())
                    .col(
                        string_len(JoinRequest::Status, 32)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        timestamp_with_time_zone(JoinRequest::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(JoinRequest::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_join_requests_project_id")
                            .from(JoinRequest::Table, JoinRequest::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_join_requests_user_id")
                            .from(JoinRequest::Table, JoinRequest::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_join_requests_project_id")
                    .table(JoinRequest::Table)
                    .col(JoinRequest::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_join_requests_user_id")
                    .table(JoinRequest::Table)
                    .col(JoinRequest::UserId)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 5. Create notifications table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(uuid(Notification::Id).primary_key())
                    .col(uuid(Notification::RecipientId).not_null())
                    .col(string_len(Notification::Kind, 64).not_null())
                    .col(text(Notification::Content).not_null())
                    .col(ColumnDef::new(Notification::RelatedId).uuid().null())
                    .col(ColumnDef::new(Notification::FromUserId).uuid().null())
                    .col(boolean(Notification::IsRead).not_null().default(false))
                    .col(
                        timestamp_with_time_zone(Notification::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notifications_recipient_id")
                            .from(Notification::Table, Notification::RecipientId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notifications_recipient_id")
                    .table(Notification::Table)
                    .col(Notification::RecipientId)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 6. Create messages table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Message::Table)
                    .if_not_exists()
                    .col(uuid(Message::Id).primary_key())
                    .col(uuid(Message::ProjectId).not_null())
                    .col(ColumnDef::new(Message::SenderId).uuid().null())
                    .col(text(Message::Content).not_null())
                    .col(string_len_null(Message::ImageUrl, 1024))
                    .col(boolean(Message::Edited).not_null().default(false))
                    .col(
                        timestamp_with_time_zone(Message::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Message::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_messages_project_id")
                            .from(Message::Table, Message::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_messages_sender_id")
                            .from(Message::Table, Message::SenderId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_messages_project_id")
                    .table(Message::Table)
                    .col(Message::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_messages_created_at")
                    .table(Message::Table)
                    .col(Message::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Message::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JoinRequest::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectMember::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Project::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

// ============================================================
// Table identifiers
// ============================================================

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Email,
    PasswordHash,
    DisplayName,
    Bio,
    AvatarUrl,
    IsPremium,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Project {
    #[sea_orm(iden = "projects")]
    Table,
    Id,
    Title,
    Description,
    Category,
    Status,
    MemberLimit,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProjectMember {
    #[sea_orm(iden = "project_members")]
    Table,
    ProjectId,
    UserId,
    Role,
    JoinedAt,
    LastReadAt,
}

#[derive(DeriveIden)]
enum JoinRequest {
    #[sea_orm(iden = "join_requests")]
    Table,
    Id,
    ProjectId,
    UserId,
    Role,
    Note,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Notification {
    #[sea_orm(iden = "notifications")]
    Table,
    Id,
    RecipientId,
    Kind,
    Content,
    RelatedId,
    FromUserId,
    IsRead,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Message {
    #[sea_orm(iden = "messages")]
    Table,
    Id,
    ProjectId,
    SenderId,
    Content,
    ImageUrl,
    Edited,
    CreatedAt,
    UpdatedAt,
}
