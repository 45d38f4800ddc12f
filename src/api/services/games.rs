//! /games 端点

use std::sync::Arc;

use actix_web::{Responder, Result as ActixResult, web};
use tracing::{info, trace, warn};

use crate::api::helpers::{created_response, error_from, success_response};
use crate::api::types::{DeleteOk, GameRead, GameReadWithReviews, ListGamesQuery, ReviewRead};
use crate::storage::{GamePatch, GameQuery, GameStore, NewGame};

/// 注册 /games 路由
pub fn game_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/games")
            .route("", web::post().to(create_game))
            .route("", web::get().to(read_games))
            .route("/{game_id}", web::get().to(read_game))
            .route("/{game_id}", web::patch().to(update_game))
            .route("/{game_id}", web::delete().to(delete_game)),
    );
}

/// 创建新游戏
pub async fn create_game(
    store: web::Data<Arc<GameStore>>,
    game: web::Json<NewGame>,
) -> ActixResult<impl Responder> {
    info!("Games API: create game request - name: {}", game.name);

    match store.create_game(game.into_inner()).await {
        Ok(model) => Ok(created_response(GameRead::from(model))),
        Err(e) => {
            warn!("Games API: failed to create game - {}", e);
            Ok(error_from(&e))
        }
    }
}

/// 列出游戏（支持分页和过滤）
pub async fn read_games(
    store: web::Data<Arc<GameStore>>,
    query: web::Query<ListGamesQuery>,
) -> ActixResult<impl Responder> {
    trace!("Games API: list request with filters: {:?}", query);

    if let Err(e) = query.validate() {
        return Ok(error_from(&e));
    }

    let game_query = GameQuery {
        offset: query.offset.unwrap_or(0),
        limit: query.limit,
        name: query.name.clone(),
        avg_rating_ge: query.avg_rating_ge,
        avg_rating_le: query.avg_rating_le,
    };

    match store.list_games(&game_query).await {
        Ok(models) => {
            let games: Vec<GameRead> = models.into_iter().map(GameRead::from).collect();
            Ok(success_response(games))
        }
        Err(e) => {
            warn!("Games API: failed to list games - {}", e);
            Ok(error_from(&e))
        }
    }
}

/// 获取单个游戏（包含评论）
pub async fn read_game(
    store: web::Data<Arc<GameStore>>,
    game_id: web::Path<i32>,
) -> ActixResult<impl Responder> {
    let game_id = game_id.into_inner();
    trace!("Games API: get game request - id: {}", game_id);

    match store.get_game_with_reviews(game_id).await {
        Ok((game, reviews)) => Ok(success_response(GameReadWithReviews {
            game: GameRead::from(game),
            reviews: reviews.into_iter().map(ReviewRead::from).collect(),
        })),
        Err(e) => {
            info!("Games API: get game {} failed - {}", game_id, e);
            Ok(error_from(&e))
        }
    }
}

/// 部分更新游戏
pub async fn update_game(
    store: web::Data<Arc<GameStore>>,
    game_id: web::Path<i32>,
    patch: web::Json<GamePatch>,
) -> ActixResult<impl Responder> {
    let game_id = game_id.into_inner();
    info!("Games API: update game request - id: {}", game_id);

    match store.update_game(game_id, patch.into_inner()).await {
        Ok(model) => Ok(success_response(GameRead::from(model))),
        Err(e) => {
            warn!("Games API: failed to update game {} - {}", game_id, e);
            Ok(error_from(&e))
        }
    }
}

/// 删除游戏（评论随级联一起删除）
pub async fn delete_game(
    store: web::Data<Arc<GameStore>>,
    game_id: web::Path<i32>,
) -> ActixResult<impl Responder> {
    let game_id = game_id.into_inner();
    info!("Games API: delete game request - id: {}", game_id);

    match store.delete_game(game_id).await {
        Ok(()) => Ok(success_response(DeleteOk::default())),
        Err(e) => {
            warn!("Games API: failed to delete game {} - {}", game_id, e);
            Ok(error_from(&e))
        }
    }
}
