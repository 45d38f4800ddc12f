pub mod games;
pub mod health;
pub mod reviews;

pub use games::game_routes;
pub use health::{AppStartTime, health_routes};
pub use reviews::review_routes;
