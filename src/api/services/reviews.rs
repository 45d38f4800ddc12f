//! /reviews 端点

use std::sync::Arc;

use actix_web::{Responder, Result as ActixResult, web};
use tracing::{info, trace, warn};

use crate::api::helpers::{created_response, error_from, success_response};
use crate::api::types::{DeleteOk, GameRead, ListReviewsQuery, ReviewRead, ReviewReadWithGame};
use crate::storage::{GameStore, NewReview, ReviewPatch};

/// 注册 /reviews 路由
pub fn review_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reviews")
            .route("", web::post().to(create_review))
            .route("", web::get().to(read_reviews))
            .route("/{review_id}", web::get().to(read_review))
            .route("/{review_id}", web::patch().to(update_review))
            .route("/{review_id}", web::delete().to(delete_review)),
    );
}

/// 创建新评论
///
/// 成功后所属游戏的平均评分会被重新计算。
pub async fn create_review(
    store: web::Data<Arc<GameStore>>,
    review: web::Json<NewReview>,
) -> ActixResult<impl Responder> {
    info!(
        "Reviews API: create review request - game_id: {}, rating: {}",
        review.game_id, review.rating
    );

    match store.create_review(review.into_inner()).await {
        Ok(model) => Ok(created_response(ReviewRead::from(model))),
        Err(e) => {
            warn!("Reviews API: failed to create review - {}", e);
            Ok(error_from(&e))
        }
    }
}

/// 列出评论
pub async fn read_reviews(
    store: web::Data<Arc<GameStore>>,
    query: web::Query<ListReviewsQuery>,
) -> ActixResult<impl Responder> {
    trace!("Reviews API: list request: {:?}", query);

    match store
        .list_reviews(query.offset.unwrap_or(0), query.limit)
        .await
    {
        Ok(models) => {
            let reviews: Vec<ReviewRead> = models.into_iter().map(ReviewRead::from).collect();
            Ok(success_response(reviews))
        }
        Err(e) => {
            warn!("Reviews API: failed to list reviews - {}", e);
            Ok(error_from(&e))
        }
    }
}

/// 获取单个评论（包含所属游戏）
pub async fn read_review(
    store: web::Data<Arc<GameStore>>,
    review_id: web::Path<i32>,
) -> ActixResult<impl Responder> {
    let review_id = review_id.into_inner();
    trace!("Reviews API: get review request - id: {}", review_id);

    match store.get_review_with_game(review_id).await {
        Ok((review, game)) => Ok(success_response(ReviewReadWithGame {
            review: ReviewRead::from(review),
            game: GameRead::from(game),
        })),
        Err(e) => {
            info!("Reviews API: get review {} failed - {}", review_id, e);
            Ok(error_from(&e))
        }
    }
}

/// 部分更新评论（game_id 不可变）
pub async fn update_review(
    store: web::Data<Arc<GameStore>>,
    review_id: web::Path<i32>,
    patch: web::Json<ReviewPatch>,
) -> ActixResult<impl Responder> {
    let review_id = review_id.into_inner();
    info!("Reviews API: update review request - id: {}", review_id);

    match store.update_review(review_id, patch.into_inner()).await {
        Ok(model) => Ok(success_response(ReviewRead::from(model))),
        Err(e) => {
            warn!("Reviews API: failed to update review {} - {}", review_id, e);
            Ok(error_from(&e))
        }
    }
}

/// 删除评论并重算所属游戏的平均评分
pub async fn delete_review(
    store: web::Data<Arc<GameStore>>,
    review_id: web::Path<i32>,
) -> ActixResult<impl Responder> {
    let review_id = review_id.into_inner();
    info!("Reviews API: delete review request - id: {}", review_id);

    match store.delete_review(review_id).await {
        Ok(()) => Ok(success_response(DeleteOk::default())),
        Err(e) => {
            warn!("Reviews API: failed to delete review {} - {}", review_id, e);
            Ok(error_from(&e))
        }
    }
}
