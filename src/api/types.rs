//! API 输出类型与查询参数定义

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{GamedexError, Result};
use migration::entities::{game, review};

/// Game representation for read output; `id` is always present
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRead {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub company: Option<String>,
    pub genre: String,
    pub release_date: Option<NaiveDate>,
    pub min_players: i32,
    pub max_players: i32,
    pub duration: i32,
    pub image: Option<String>,
    pub avg_rating: Option<f64>,
}

impl From<game::Model> for GameRead {
    fn from(model: game::Model) -> Self {
        GameRead {
            id: model.id,
            name: model.name,
            description: model.description,
            company: model.company,
            genre: model.genre,
            release_date: model.release_date,
            min_players: model.min_players,
            max_players: model.max_players,
            duration: model.duration,
            image: model.image,
            avg_rating: model.avg_rating,
        }
    }
}

/// Game read output including its reviews
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameReadWithReviews {
    #[serde(flatten)]
    pub game: GameRead,
    pub reviews: Vec<ReviewRead>,
}

/// Review representation for read output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRead {
    pub id: i32,
    pub game_id: i32,
    pub rating: i32,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<review::Model> for ReviewRead {
    fn from(model: review::Model) -> Self {
        ReviewRead {
            id: model.id,
            game_id: model.game_id,
            rating: model.rating,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Review read output including the owning game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReadWithGame {
    #[serde(flatten)]
    pub review: ReviewRead,
    pub game: GameRead,
}

/// Delete 输出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOk {
    pub ok: bool,
}

impl Default for DeleteOk {
    fn default() -> Self {
        DeleteOk { ok: true }
    }
}

/// `GET /games` 查询参数
///
/// The bracketed aliases mirror the public query grammar:
/// `filter[name]`, `filter[avg_rating][ge]`, `filter[avg_rating][le]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListGamesQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    #[serde(rename = "filter[name]")]
    pub name: Option<String>,
    #[serde(rename = "filter[avg_rating][ge]")]
    pub avg_rating_ge: Option<f64>,
    #[serde(rename = "filter[avg_rating][le]")]
    pub avg_rating_le: Option<f64>,
}

impl ListGamesQuery {
    pub fn validate(&self) -> Result<()> {
        for (label, value) in [
            ("filter[avg_rating][ge]", self.avg_rating_ge),
            ("filter[avg_rating][le]", self.avg_rating_le),
        ] {
            if let Some(v) = value
                && !(0.0..=5.0).contains(&v)
            {
                return Err(GamedexError::validation(format!(
                    "{} must be between 0 and 5",
                    label
                )));
            }
        }
        if let Some(ref name) = self.name
            && name.is_empty()
        {
            return Err(GamedexError::validation("filter[name] must not be empty"));
        }
        Ok(())
    }
}

/// `GET /reviews` 查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListReviewsQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}
