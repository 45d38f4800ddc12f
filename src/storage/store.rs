use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use tracing::{error, info, warn};

use crate::errors::{GamedexError, Result};

use super::models::{GamePatch, GameQuery, NewGame, NewReview, ReviewPatch};
use migration::{
    Migrator, MigratorTrait,
    entities::{game, review},
};

#[derive(Clone)]
pub struct GameStore {
    db: DatabaseConnection,
    backend_name: String,
}

impl GameStore {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(GamedexError::database_config(
                "DATABASE_URL 未设置".to_string(),
            ));
        }

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            Self::connect_sqlite(database_url).await?
        } else {
            Self::connect_generic(database_url, backend_name).await?
        };

        let store = GameStore {
            db,
            backend_name: backend_name.to_string(),
        };

        // 运行迁移
        store.run_migrations().await?;

        warn!("{} GameStore initialized.", store.backend_name.to_uppercase());
        Ok(store)
    }

    /// 连接 SQLite 数据库（带自动创建和性能优化）
    async fn connect_sqlite(database_url: &str) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::SqlitePool;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| GamedexError::database_config(format!("SQLite URL 解析失败: {}", e)))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5))
            // reviews.game_id 的级联删除依赖外键开关
            .foreign_keys(true)
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 使用 sqlx 的连接池
        let pool = SqlitePool::connect_with(opt).await.map_err(|e| {
            GamedexError::database_connection(format!("无法连接到 SQLite 数据库: {}", e))
        })?;

        // 转换为 Sea-ORM 的 DatabaseConnection
        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 连接通用数据库（MySQL/PostgreSQL）
    async fn connect_generic(database_url: &str, backend_name: &str) -> Result<DatabaseConnection> {
        let config = crate::config::get_config();
        let timeout = std::time::Duration::from_secs(config.database.timeout);

        let mut opt = ConnectOptions::new(database_url.to_owned());
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(timeout)
            .acquire_timeout(timeout)
            .sqlx_logging(false);

        Database::connect(opt).await.map_err(|e| {
            GamedexError::database_connection(format!(
                "无法连接到 {} 数据库: {}",
                backend_name.to_uppercase(),
                e
            ))
        })
    }

    async fn run_migrations(&self) -> Result<()> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| GamedexError::database_operation(format!("迁移失败: {}", e)))?;

        info!("Database migrations completed");
        Ok(())
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// 健康检查用：数据库是否可达
    pub async fn ping(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| GamedexError::database_connection(e.to_string()))
    }

    // -------------------------------------------------------------------
    // Games
    // -------------------------------------------------------------------

    pub async fn create_game(&self, input: NewGame) -> Result<game::Model> {
        input.validate()?;

        let active = game::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            company: Set(input.company),
            genre: Set(input.genre),
            release_date: Set(input.release_date),
            min_players: Set(input.min_players),
            max_players: Set(input.max_players),
            duration: Set(input.duration),
            image: Set(input.image),
            avg_rating: Set(None),
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| GamedexError::database_operation(format!("创建游戏失败: {}", e)))?;

        info!("Game created: {} (id {})", model.name, model.id);
        Ok(model)
    }

    pub async fn list_games(&self, query: &GameQuery) -> Result<Vec<game::Model>> {
        let mut select = game::Entity::find();

        if let Some(ref name) = query.name {
            select = select.filter(game::Column::Name.eq(name.clone()));
        }
        if let Some(ge) = query.avg_rating_ge {
            select = select.filter(game::Column::AvgRating.gte(ge));
        }
        if let Some(le) = query.avg_rating_le {
            select = select.filter(game::Column::AvgRating.lte(le));
        }

        select
            .order_by_asc(game::Column::Id)
            .offset(query.offset)
            .limit(query.page_size())
            .all(&self.db)
            .await
            .map_err(|e| GamedexError::database_operation(format!("查询游戏列表失败: {}", e)))
    }

    pub async fn get_game(&self, game_id: i32) -> Result<game::Model> {
        game::Entity::find_by_id(game_id)
            .one(&self.db)
            .await
            .map_err(|e| GamedexError::database_operation(format!("查询游戏失败: {}", e)))?
            .ok_or_else(|| GamedexError::not_found("Game not found"))
    }

    /// Game plus its reviews, ordered by review id
    pub async fn get_game_with_reviews(
        &self,
        game_id: i32,
    ) -> Result<(game::Model, Vec<review::Model>)> {
        let game = self.get_game(game_id).await?;
        let reviews = game
            .find_related(review::Entity)
            .order_by_asc(review::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GamedexError::database_operation(format!("查询游戏评论失败: {}", e)))?;
        Ok((game, reviews))
    }

    /// Apply a partial update; the merged record must still satisfy all
    /// game invariants.
    pub async fn update_game(&self, game_id: i32, patch: GamePatch) -> Result<game::Model> {
        let existing = self.get_game(game_id).await?;

        // 合并后整体校验，避免 PATCH 绕过 create 时的约束
        let merged = NewGame {
            name: patch.name.clone().unwrap_or(existing.name.clone()),
            description: patch
                .description
                .clone()
                .or_else(|| existing.description.clone()),
            company: patch.company.clone().or_else(|| existing.company.clone()),
            genre: patch.genre.clone().unwrap_or(existing.genre.clone()),
            release_date: patch.release_date.or(existing.release_date),
            min_players: patch.min_players.unwrap_or(existing.min_players),
            max_players: patch.max_players.unwrap_or(existing.max_players),
            duration: patch.duration.unwrap_or(existing.duration),
            image: patch.image.clone().or_else(|| existing.image.clone()),
        };
        merged.validate()?;

        let active = game::ActiveModel {
            id: Unchanged(game_id),
            name: Set(merged.name),
            description: Set(merged.description),
            company: Set(merged.company),
            genre: Set(merged.genre),
            release_date: Set(merged.release_date),
            min_players: Set(merged.min_players),
            max_players: Set(merged.max_players),
            duration: Set(merged.duration),
            image: Set(merged.image),
            avg_rating: Unchanged(existing.avg_rating),
        };

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| GamedexError::database_operation(format!("更新游戏失败: {}", e)))?;

        info!("Game updated: {} (id {})", model.name, model.id);
        Ok(model)
    }

    /// Delete a game; its reviews go with it via the FK cascade.
    pub async fn delete_game(&self, game_id: i32) -> Result<()> {
        let result = game::Entity::delete_by_id(game_id)
            .exec(&self.db)
            .await
            .map_err(|e| GamedexError::database_operation(format!("删除游戏失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(GamedexError::not_found("Game not found"));
        }

        info!("Game deleted: id {}", game_id);
        Ok(())
    }

    // -------------------------------------------------------------------
    // Reviews
    // -------------------------------------------------------------------

    pub async fn create_review(&self, input: NewReview) -> Result<review::Model> {
        input.validate()?;

        // 结构化存在性检查，而不是解析数据库驱动的外键错误
        let game_exists = game::Entity::find_by_id(input.game_id)
            .count(&self.db)
            .await
            .map_err(|e| GamedexError::database_operation(format!("查询游戏失败: {}", e)))?
            > 0;
        if !game_exists {
            return Err(GamedexError::not_found(format!(
                "game.id {} does not exist.",
                input.game_id
            )));
        }

        let active = review::ActiveModel {
            id: NotSet,
            game_id: Set(input.game_id),
            rating: Set(input.rating),
            description: Set(input.description),
            created_at: Set(Some(Utc::now())),
            updated_at: Set(None),
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| GamedexError::database_operation(format!("创建评论失败: {}", e)))?;

        self.refresh_avg_rating(model.game_id).await?;

        info!("Review created: id {} for game {}", model.id, model.game_id);
        Ok(model)
    }

    pub async fn list_reviews(&self, offset: u64, limit: Option<u64>) -> Result<Vec<review::Model>> {
        let limit = limit
            .unwrap_or(super::models::DEFAULT_PAGE_SIZE)
            .clamp(1, super::models::MAX_PAGE_SIZE);

        review::Entity::find()
            .order_by_asc(review::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| GamedexError::database_operation(format!("查询评论列表失败: {}", e)))
    }

    pub async fn get_review(&self, review_id: i32) -> Result<review::Model> {
        review::Entity::find_by_id(review_id)
            .one(&self.db)
            .await
            .map_err(|e| GamedexError::database_operation(format!("查询评论失败: {}", e)))?
            .ok_or_else(|| GamedexError::not_found("Review not found"))
    }

    /// Review plus the game it belongs to
    pub async fn get_review_with_game(
        &self,
        review_id: i32,
    ) -> Result<(review::Model, game::Model)> {
        let review = self.get_review(review_id).await?;
        let game = review
            .find_related(game::Entity)
            .one(&self.db)
            .await
            .map_err(|e| GamedexError::database_operation(format!("查询评论关联游戏失败: {}", e)))?
            .ok_or_else(|| {
                // FK 保证下不应发生
                error!("Review {} has no owning game", review_id);
                GamedexError::database_operation(format!("review {} 缺少关联游戏", review_id))
            })?;
        Ok((review, game))
    }

    pub async fn update_review(&self, review_id: i32, patch: ReviewPatch) -> Result<review::Model> {
        patch.validate()?;

        let existing = self.get_review(review_id).await?;

        let active = review::ActiveModel {
            id: Unchanged(review_id),
            game_id: Unchanged(existing.game_id),
            rating: match patch.rating {
                Some(rating) => Set(rating),
                None => Unchanged(existing.rating),
            },
            description: match patch.description {
                Some(description) => Set(Some(description)),
                None => Unchanged(existing.description.clone()),
            },
            created_at: Unchanged(existing.created_at),
            updated_at: Set(Some(Utc::now())),
        };

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| GamedexError::database_operation(format!("更新评论失败: {}", e)))?;

        self.refresh_avg_rating(model.game_id).await?;

        info!("Review updated: id {}", model.id);
        Ok(model)
    }

    pub async fn delete_review(&self, review_id: i32) -> Result<()> {
        // 先取 game_id，删除后还要重算均分
        let existing = self.get_review(review_id).await?;
        let game_id = existing.game_id;

        existing
            .delete(&self.db)
            .await
            .map_err(|e| GamedexError::database_operation(format!("删除评论失败: {}", e)))?;

        self.refresh_avg_rating(game_id).await?;

        info!("Review deleted: id {}", review_id);
        Ok(())
    }

    /// Recompute a game's average rating from its current reviews.
    ///
    /// Mean of all ratings rounded to one decimal; cleared to NULL when the
    /// game has no reviews left.
    pub async fn refresh_avg_rating(&self, game_id: i32) -> Result<()> {
        let ratings: Vec<i32> = review::Entity::find()
            .filter(review::Column::GameId.eq(game_id))
            .all(&self.db)
            .await
            .map_err(|e| GamedexError::database_operation(format!("查询评分失败: {}", e)))?
            .into_iter()
            .map(|r| r.rating)
            .collect();

        let avg_rating = if ratings.is_empty() {
            None
        } else {
            let mean = ratings.iter().sum::<i32>() as f64 / ratings.len() as f64;
            Some((mean * 10.0).round() / 10.0)
        };

        let active = game::ActiveModel {
            id: Unchanged(game_id),
            avg_rating: Set(avg_rating),
            ..Default::default()
        };
        active
            .update(&self.db)
            .await
            .map_err(|e| GamedexError::database_operation(format!("更新平均评分失败: {}", e)))?;

        Ok(())
    }
}
