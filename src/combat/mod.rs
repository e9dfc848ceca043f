//! Combat primitives: health, strike checks, and combat messages.
pub mod events;
pub mod health;
pub mod targeting;

pub use events::{PickupCollected, PlayerDamaged, TreeFelled, ZombieKilled};
pub use health::Health;
