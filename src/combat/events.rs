//! Combat messages passed between the entity modules and the player.
use bevy::prelude::{Entity, Message};

/// A zombie bit the player.
#[derive(Message, Debug, Clone)]
pub struct PlayerDamaged {
    pub source: Entity,
    pub amount: f32,
}

/// The player walked over a health pickup.
#[derive(Message, Debug, Clone)]
pub struct PickupCollected {
    pub pickup: Entity,
    pub amount: f32,
}

/// A zombie entered its death animation.
#[derive(Message, Debug, Clone, Copy)]
pub struct ZombieKilled {
    pub zombie: Entity,
}

/// A tree started falling.
#[derive(Message, Debug, Clone, Copy)]
pub struct TreeFelled {
    pub tree: Entity,
}
