use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按游戏查评论、按评分过滤都是热路径
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reviews_game_id")
                    .table(Review::Table)
                    .col(Review::GameId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reviews_rating")
                    .table(Review::Table)
                    .col(Review::Rating)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_reviews_rating").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_reviews_game_id").to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Review {
    #[sea_orm(iden = "reviews")]
    Table,
    GameId,
    Rating,
}
