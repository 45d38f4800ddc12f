use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 games 表
        manager
            .create_table(
                Table::create()
                    .table(Game::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Game::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Game::Name).string().not_null())
                    .col(ColumnDef::new(Game::Description).text().null())
                    .col(ColumnDef::new(Game::Company).string().null())
                    .col(ColumnDef::new(Game::Genre).string().not_null())
                    .col(ColumnDef::new(Game::ReleaseDate).date().null())
                    .col(ColumnDef::new(Game::MinPlayers).integer().not_null())
                    .col(ColumnDef::new(Game::MaxPlayers).integer().not_null())
                    .col(ColumnDef::new(Game::Duration).integer().not_null())
                    .col(ColumnDef::new(Game::Image).text().null())
                    .col(ColumnDef::new(Game::AvgRating).double().null())
                    .to_owned(),
            )
            .await?;

        // games 常用过滤字段索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_games_name")
                    .table(Game::Table)
                    .col(Game::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_games_genre")
                    .table(Game::Table)
                    .col(Game::Genre)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_games_avg_rating")
                    .table(Game::Table)
                    .col(Game::AvgRating)
                    .to_owned(),
            )
            .await?;

        // 创建 reviews 表（game_id 级联删除）
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Review::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Review::GameId).integer().not_null())
                    .col(ColumnDef::new(Review::Rating).integer().not_null())
                    .col(ColumnDef::new(Review::Description).text().null())
                    .col(
                        ColumnDef::new(Review::CreatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Review::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_game_id")
                            .from(Review::Table, Review::GameId)
                            .to(Game::Table, Game::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // reviews 先删（外键依赖 games）
        manager
            .drop_table(Table::drop().table(Review::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_games_avg_rating").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_games_genre").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_games_name").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Game::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Game {
    #[sea_orm(iden = "games")]
    Table,
    Id,
    Name,
    Description,
    Company,
    Genre,
    ReleaseDate,
    MinPlayers,
    MaxPlayers,
    Duration,
    Image,
    AvgRating,
}

#[derive(DeriveIden)]
enum Review {
    #[sea_orm(iden = "reviews")]
    Table,
    Id,
    GameId,
    Rating,
    Description,
    CreatedAt,
    UpdatedAt,
}
