pub mod game;
pub mod review;

pub use game::Entity as GameEntity;
pub use review::Entity as ReviewEntity;
