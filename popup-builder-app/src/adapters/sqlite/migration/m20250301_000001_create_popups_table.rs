use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Popup::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Popup::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Popup::Name).string().not_null())
                    .col(ColumnDef::new(Popup::Template).string().null())
                    .col(ColumnDef::new(Popup::Headline).string().not_null())
                    .col(ColumnDef::new(Popup::Subheadline).string().null())
                    .col(ColumnDef::new(Popup::ButtonText).string().not_null())
                    .col(
                        ColumnDef::new(Popup::BackgroundColor)
                            .string()
                            .not_null()
                            .default("#ffffff"),
                    )
                    .col(
                        ColumnDef::new(Popup::TextColor)
                            .string()
                            .not_null()
                            .default("#000000"),
                    )
                    .col(
                        ColumnDef::new(Popup::ButtonColor)
                            .string()
                            .not_null()
                            .default("#6366f1"),
                    )
                    .col(
                        ColumnDef::new(Popup::BorderRadius)
                            .integer()
                            .not_null()
                            .default(12),
                    )
                    .col(flag(Popup::ShowImage, 1))
                    .col(flag(Popup::ShowCloseButton, 1))
                    .col(flag(Popup::ShowOverlay, 1))
                    .col(flag(Popup::CloseOnOutsideClick, 1))
                    .col(flag(Popup::AnimationEnabled, 1))
                    .col(
                        ColumnDef::new(Popup::AnimationStyle)
                            .string()
                            .not_null()
                            .default("fade"),
                    )
                    .col(ColumnDef::new(Popup::EmbedCode).string().null())
                    .col(flag(Popup::IsPublished, 0))
                    .col(ColumnDef::new(Popup::FlowData).text().null())
                    .col(ColumnDef::new(Popup::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Popup::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_popups_created_at")
                    .table(Popup::Table)
                    .col(Popup::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Popup::Table).to_owned())
            .await?;

        Ok(())
    }
}

/// Boolean column stored as 0/1.
fn flag(column: Popup, default: i32) -> ColumnDef {
    ColumnDef::new(column)
        .integer()
        .not_null()
        .default(default)
        .to_owned()
}

#[derive(DeriveIden)]
enum Popup {
    #[sea_orm(iden = "popups")]
    Table,
    Id,
    Name,
    Template,
    Headline,
    Subheadline,
    ButtonText,
    BackgroundColor,
    TextColor,
    ButtonColor,
    BorderRadius,
    ShowImage,
    ShowCloseButton,
    ShowOverlay,
    CloseOnOutsideClick,
    AnimationEnabled,
    AnimationStyle,
    EmbedCode,
    IsPublished,
    FlowData,
    CreatedAt,
    UpdatedAt,
}
