use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    Department,
    EmployeeId,
    Phone,
    Location,
    ReportingTo,
    JoinDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Review {
    Table,
    Id,
    EmployeeId,
    EmployeeName,
    EmployeeRole,
    ReviewType,
    Period,
    Status,
    Score,
    Reviewer,
    ReviewerId,
    DueDate,
    CompletedDate,
    Ratings,
    Goals,
    Achievements,
    Improvements,
    Comments,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Goal {
    Table,
    Id,
    Title,
    Description,
    EmployeeId,
    EmployeeName,
    EmployeeRole,
    Category,
    Priority,
    Status,
    Progress,
    StartDate,
    DueDate,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ReviewCriteria {
    Table,
    Id,
    Key,
    Label,
    Description,
    Position,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(User::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(User::Name).string().not_null())
                    .col(
                        ColumnDef::new(User::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(User::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(User::Role)
                            .string_len(16)
                            .not_null()
                            .default("employee"),
                    )
                    .col(ColumnDef::new(User::Department).string().not_null())
                    .col(
                        ColumnDef::new(User::EmployeeId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(User::Phone).string())
                    .col(ColumnDef::new(User::Location).string())
                    .col(ColumnDef::new(User::ReportingTo).string())
                    .col(
                        ColumnDef::new(User::JoinDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(User::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Review::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Review::EmployeeId).string().not_null())
                    .col(ColumnDef::new(Review::EmployeeName).string().not_null())
                    .col(ColumnDef::new(Review::EmployeeRole).string())
                    .col(ColumnDef::new(Review::ReviewType).string().not_null())
                    .col(ColumnDef::new(Review::Period).string().not_null())
                    .col(
                        ColumnDef::new(Review::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Review::Score).double())
                    .col(ColumnDef::new(Review::Reviewer).string())
                    .col(ColumnDef::new(Review::ReviewerId).string())
                    .col(ColumnDef::new(Review::DueDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Review::CompletedDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Review::Ratings).json().not_null())
                    .col(ColumnDef::new(Review::Goals).text())
                    .col(ColumnDef::new(Review::Achievements).text())
                    .col(ColumnDef::new(Review::Improvements).text())
                    .col(ColumnDef::new(Review::Comments).text())
                    .col(
                        ColumnDef::new(Review::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Review::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_review_employee_id")
                    .table(Review::Table)
                    .col(Review::EmployeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Goal::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Goal::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Goal::Title).string().not_null())
                    .col(ColumnDef::new(Goal::Description).text().not_null())
                    .col(ColumnDef::new(Goal::EmployeeId).string().not_null())
                    .col(ColumnDef::new(Goal::EmployeeName).string().not_null())
                    .col(ColumnDef::new(Goal::EmployeeRole).string())
                    .col(ColumnDef::new(Goal::Category).string().not_null())
                    .col(
                        ColumnDef::new(Goal::Priority)
                            .string_len(16)
                            .not_null()
                            .default("medium"),
                    )
                    .col(
                        ColumnDef::new(Goal::Status)
                            .string_len(16)
                            .not_null()
                            .default("in_progress"),
                    )
                    .col(
                        ColumnDef::new(Goal::Progress)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Goal::StartDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Goal::DueDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Goal::CreatedBy).string())
                    .col(
                        ColumnDef::new(Goal::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Goal::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_goal_employee_id")
                    .table(Goal::Table)
                    .col(Goal::EmployeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReviewCriteria::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReviewCriteria::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ReviewCriteria::Key)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ReviewCriteria::Label).string().not_null())
                    .col(
                        ColumnDef::new(ReviewCriteria::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReviewCriteria::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ReviewCriteria::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReviewCriteria::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReviewCriteria::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Goal::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Review::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        Ok(())
    }
}
