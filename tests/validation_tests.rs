//! Input validation tests for the storage payload types

use gamedex::storage::{NewGame, NewReview, ReviewPatch};

fn sample_game() -> NewGame {
    NewGame {
        name: "Ricochet Robots".to_string(),
        description: None,
        company: Some("Rio Grande Games".to_string()),
        genre: "puzzle".to_string(),
        release_date: None,
        min_players: 1,
        max_players: 8,
        duration: 30,
        image: None,
    }
}

#[cfg(test)]
mod game_validation_tests {
    use super::*;

    #[test]
    fn test_valid_game_passes() {
        assert!(sample_game().validate().is_ok());
    }

    #[test]
    fn test_empty_name_fails() {
        let mut game = sample_game();
        game.name = String::new();
        assert!(game.validate().is_err());
    }

    #[test]
    fn test_negative_min_players_fails() {
        let mut game = sample_game();
        game.min_players = -1;
        let err = game.validate().unwrap_err();
        assert!(err.to_string().contains("min_players must be >= 0"));
    }

    #[test]
    fn test_max_less_than_min_fails() {
        let mut game = sample_game();
        game.min_players = 5;
        game.max_players = 4;
        let err = game.validate().unwrap_err();
        assert!(err.to_string().contains("max_players must be >= min_players"));
    }

    #[test]
    fn test_min_equals_max_is_ok() {
        let mut game = sample_game();
        game.min_players = 2;
        game.max_players = 2;
        assert!(game.validate().is_ok());
    }

    #[test]
    fn test_negative_duration_fails() {
        let mut game = sample_game();
        game.duration = -1;
        let err = game.validate().unwrap_err();
        assert!(err.to_string().contains("duration must be >= 0"));
    }

    #[test]
    fn test_zero_player_game_is_ok() {
        // solitaire-style entries list min_players = 0 in the source data
        let mut game = sample_game();
        game.min_players = 0;
        game.max_players = 0;
        assert!(game.validate().is_ok());
    }
}

#[cfg(test)]
mod review_validation_tests {
    use super::*;

    #[test]
    fn test_valid_review_passes() {
        let review = NewReview {
            game_id: 1,
            rating: 4,
            description: Some("solid".to_string()),
        };
        assert!(review.validate().is_ok());
    }

    #[test]
    fn test_rating_bounds() {
        for rating in 1..=5 {
            let review = NewReview {
                game_id: 1,
                rating,
                description: None,
            };
            assert!(review.validate().is_ok(), "rating {} should pass", rating);
        }

        for rating in [0, 6, -1, 100] {
            let review = NewReview {
                game_id: 1,
                rating,
                description: None,
            };
            let err = review.validate().unwrap_err();
            assert!(
                err.to_string().contains("rating must be between 1 and 5"),
                "rating {} should fail",
                rating
            );
        }
    }

    #[test]
    fn test_patch_without_rating_passes() {
        let patch = ReviewPatch {
            rating: None,
            description: Some("updated".to_string()),
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_patch_with_bad_rating_fails() {
        let patch = ReviewPatch {
            rating: Some(0),
            description: None,
        };
        assert!(patch.validate().is_err());
    }
}
