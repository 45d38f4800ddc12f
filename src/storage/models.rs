use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{GamedexError, Result};

/// 游戏列表查询上限
pub const MAX_PAGE_SIZE: u64 = 100;
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Input payload for creating a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGame {
    pub name: String,
    pub description: Option<String>,
    pub company: Option<String>,
    pub genre: String,
    pub release_date: Option<NaiveDate>,
    pub min_players: i32,
    pub max_players: i32,
    pub duration: i32,
    pub image: Option<String>,
}

impl NewGame {
    /// Field invariants shared by create and update paths
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(GamedexError::validation("name must not be empty"));
        }
        if self.min_players < 0 {
            return Err(GamedexError::validation("min_players must be >= 0"));
        }
        if self.max_players < self.min_players {
            return Err(GamedexError::validation("max_players must be >= min_players"));
        }
        if self.duration < 0 {
            return Err(GamedexError::validation("duration must be >= 0"));
        }
        Ok(())
    }
}

/// Partial update for a game; absent fields stay unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GamePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub company: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub min_players: Option<i32>,
    pub max_players: Option<i32>,
    pub duration: Option<i32>,
    pub image: Option<String>,
}

/// Input payload for creating a review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub game_id: i32,
    pub rating: i32,
    pub description: Option<String>,
}

impl NewReview {
    pub fn validate(&self) -> Result<()> {
        validate_rating(self.rating)
    }
}

/// Partial update for a review
///
/// `game_id` is deliberately absent: re-pointing a review at another game
/// would be a new review.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewPatch {
    pub rating: Option<i32>,
    pub description: Option<String>,
}

impl ReviewPatch {
    pub fn validate(&self) -> Result<()> {
        match self.rating {
            Some(rating) => validate_rating(rating),
            None => Ok(()),
        }
    }
}

fn validate_rating(rating: i32) -> Result<()> {
    if !(1..=5).contains(&rating) {
        return Err(GamedexError::validation("rating must be between 1 and 5"));
    }
    Ok(())
}

/// Listing filters for games
#[derive(Debug, Clone, Default)]
pub struct GameQuery {
    pub offset: u64,
    pub limit: Option<u64>,
    /// Exact name match
    pub name: Option<String>,
    pub avg_rating_ge: Option<f64>,
    pub avg_rating_le: Option<f64>,
}

impl GameQuery {
    /// Effective page size, clamped to 1..=MAX_PAGE_SIZE
    pub fn page_size(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}
