//! Gameplay tuning loaded from `config/game.toml`.
use bevy::prelude::*;
use serde::Deserialize;

use super::config::load_toml_or_default;

const CONFIG_PATH: &str = "config/game.toml";
const MIN_DURATION_SECS: f32 = 0.01;
const MAX_ZOMBIES: usize = 200;
const MAX_TREES: usize = 1_000;
const MAX_PICKUPS: usize = 100;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawGameConfig {
    #[serde(default)]
    player: RawPlayer,
    #[serde(default)]
    controls: RawControls,
    #[serde(default)]
    zombies: RawZombies,
    #[serde(default)]
    trees: RawTrees,
    #[serde(default)]
    pickups: RawPickups,
    #[serde(default)]
    spawning: RawSpawning,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPlayer {
    height: f32,
    max_health: f32,
    collision_radius: f32,
    attack_range: f32,
    facing_threshold: f32,
    sword_damage: f32,
    tree_damage: f32,
    attack_duration_secs: f32,
    invulnerability_secs: f32,
    damage_flash_secs: f32,
}

impl Default for RawPlayer {
    fn default() -> Self {
        Self {
            height: 5.0,
            max_health: 100.0,
            collision_radius: 0.6,
            attack_range: 3.0,
            facing_threshold: 0.5,
            sword_damage: 34.0,
            tree_damage: 50.0,
            attack_duration_secs: 0.3,
            invulnerability_secs: 1.0,
            damage_flash_secs: 0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawControls {
    look_sensitivity: f32,
    friction: f32,
    acceleration: f32,
    jump_velocity: f32,
    gravity: f32,
}

impl Default for RawControls {
    fn default() -> Self {
        Self {
            look_sensitivity: 0.2,
            friction: 10.0,
            acceleration: 100.0,
            jump_velocity: 5.0,
            gravity: -9.8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawZombies {
    max_health: f32,
    move_speed: f32,
    sprint_speed: f32,
    sprint_distance: f32,
    stop_distance: f32,
    attack_range: f32,
    attack_damage: f32,
    attack_cooldown_secs: f32,
    hit_flash_secs: f32,
    death_duration_secs: f32,
    initial_count: u32,
    initial_spread: f32,
    spawn_height: f32,
    spawn_interval_secs: f32,
    spawn_distance: f32,
    max_population: u32,
    respawn_delay_secs: f32,
}

impl Default for RawZombies {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            move_speed: 1.2,
            sprint_speed: 3.0,
            sprint_distance: 12.0,
            stop_distance: 1.2,
            attack_range: 2.0,
            attack_damage: 10.0,
            attack_cooldown_secs: 1.0,
            hit_flash_secs: 0.1,
            death_duration_secs: 1.0,
            initial_count: 5,
            initial_spread: 20.0,
            spawn_height: 2.0,
            spawn_interval_secs: 5.0,
            spawn_distance: 30.0,
            max_population: 10,
            respawn_delay_secs: 3.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawTrees {
    count: u32,
    spread: f32,
    max_health: f32,
    trunk_radius: f32,
    fall_duration_secs: f32,
    linger_secs: f32,
    respawn_delay_secs: f32,
}

impl Default for RawTrees {
    fn default() -> Self {
        Self {
            count: 100,
            spread: 200.0,
            max_health: 100.0,
            trunk_radius: 0.5,
            fall_duration_secs: 2.0,
            linger_secs: 3.0,
            respawn_delay_secs: 30.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPickups {
    count: u32,
    spread: f32,
    heal_amount: f32,
    collect_radius: f32,
    spawn_height: f32,
    hover_height: f32,
    hover_speed: f32,
    rotation_speed: f32,
    respawn_delay_secs: f32,
}

impl Default for RawPickups {
    fn default() -> Self {
        Self {
            count: 4,
            spread: 60.0,
            heal_amount: 50.0,
            collect_radius: 1.5,
            spawn_height: 1.5,
            hover_height: 0.5,
            hover_speed: 2.0,
            rotation_speed: 1.0,
            respawn_delay_secs: 15.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawSpawning {
    min_player_distance: f32,
    seed: Option<u64>,
}

impl Default for RawSpawning {
    fn default() -> Self {
        Self {
            min_player_distance: 8.0,
            seed: None,
        }
    }
}

/// Runtime tuning for every gameplay module.
#[derive(Resource, Debug, Clone)]
pub struct GameSettings {
    pub player: PlayerSettings,
    pub controls: ControlSettings,
    pub zombies: ZombieSettings,
    pub trees: TreeSettings,
    pub pickups: PickupSettings,
    pub spawning: SpawnSettings,
}

#[derive(Debug, Clone)]
pub struct PlayerSettings {
    pub height: f32,
    pub max_health: f32,
    pub collision_radius: f32,
    pub attack_range: f32,
    pub facing_threshold: f32,
    pub sword_damage: f32,
    pub tree_damage: f32,
    pub attack_duration_secs: f32,
    pub invulnerability_secs: f32,
    pub damage_flash_secs: f32,
}

#[derive(Debug, Clone)]
pub struct ControlSettings {
    pub look_sensitivity: f32,
    pub friction: f32,
    pub acceleration: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
}

#[derive(Debug, Clone)]
pub struct ZombieSettings {
    pub max_health: f32,
    pub move_speed: f32,
    pub sprint_speed: f32,
    pub sprint_distance: f32,
    pub stop_distance: f32,
    pub attack_range: f32,
    pub attack_damage: f32,
    pub attack_cooldown_secs: f32,
    pub hit_flash_secs: f32,
    pub death_duration_secs: f32,
    pub initial_count: usize,
    pub initial_spread: f32,
    pub spawn_height: f32,
    pub spawn_interval_secs: f32,
    pub spawn_distance: f32,
    pub max_population: usize,
    pub respawn_delay_secs: f32,
}

#[derive(Debug, Clone)]
pub struct TreeSettings {
    pub count: usize,
    pub spread: f32,
    pub max_health: f32,
    pub trunk_radius: f32,
    pub fall_duration_secs: f32,
    pub linger_secs: f32,
    pub respawn_delay_secs: f32,
}

#[derive(Debug, Clone)]
pub struct PickupSettings {
    pub count: usize,
    pub spread: f32,
    pub heal_amount: f32,
    pub collect_radius: f32,
    pub spawn_height: f32,
    pub hover_height: f32,
    pub hover_speed: f32,
    pub rotation_speed: f32,
    pub respawn_delay_secs: f32,
}

#[derive(Debug, Clone)]
pub struct SpawnSettings {
    pub min_player_distance: f32,
    pub seed: Option<u64>,
}

impl GameSettings {
    pub fn load_or_default() -> Self {
        load_toml_or_default::<RawGameConfig>(CONFIG_PATH).into()
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        RawGameConfig::default().into()
    }
}

impl From<RawGameConfig> for GameSettings {
    fn from(value: RawGameConfig) -> Self {
        let player = value.player;
        let controls = value.controls;
        let zombies = value.zombies;
        let trees = value.trees;
        let pickups = value.pickups;

        let max_health = player.max_health.max(1.0);
        let sprint_speed = zombies.sprint_speed.max(zombies.move_speed.max(0.0));
        let max_population = (zombies.max_population as usize).min(MAX_ZOMBIES);

        Self {
            player: PlayerSettings {
                height: player.height.max(0.1),
                max_health,
                collision_radius: player.collision_radius.max(0.0),
                attack_range: player.attack_range.max(0.0),
                facing_threshold: player.facing_threshold.clamp(-1.0, 1.0),
                sword_damage: player.sword_damage.max(0.0),
                tree_damage: player.tree_damage.max(0.0),
                attack_duration_secs: player.attack_duration_secs.max(MIN_DURATION_SECS),
                invulnerability_secs: player.invulnerability_secs.max(0.0),
                damage_flash_secs: player.damage_flash_secs.max(MIN_DURATION_SECS),
            },
            controls: ControlSettings {
                look_sensitivity: controls.look_sensitivity.max(0.0),
                friction: controls.friction.max(0.0),
                acceleration: controls.acceleration.max(0.0),
                jump_velocity: controls.jump_velocity.max(0.0),
                // Gravity must pull down or a jump never lands.
                gravity: controls.gravity.min(-0.1),
            },
            zombies: ZombieSettings {
                max_health: zombies.max_health.max(1.0),
                move_speed: zombies.move_speed.max(0.0),
                sprint_speed,
                sprint_distance: zombies.sprint_distance.max(0.0),
                stop_distance: zombies.stop_distance.max(0.0),
                attack_range: zombies.attack_range.max(0.0),
                attack_damage: zombies.attack_damage.max(0.0),
                attack_cooldown_secs: zombies.attack_cooldown_secs.max(MIN_DURATION_SECS),
                hit_flash_secs: zombies.hit_flash_secs.max(MIN_DURATION_SECS),
                death_duration_secs: zombies.death_duration_secs.max(MIN_DURATION_SECS),
                initial_count: (zombies.initial_count as usize).min(max_population),
                initial_spread: zombies.initial_spread.max(0.0),
                spawn_height: zombies.spawn_height,
                spawn_interval_secs: zombies.spawn_interval_secs.max(MIN_DURATION_SECS),
                spawn_distance: zombies.spawn_distance.max(0.0),
                max_population,
                respawn_delay_secs: zombies.respawn_delay_secs.max(0.0),
            },
            trees: TreeSettings {
                count: (trees.count as usize).min(MAX_TREES),
                spread: trees.spread.max(0.0),
                max_health: trees.max_health.max(1.0),
                trunk_radius: trees.trunk_radius.max(0.0),
                fall_duration_secs: trees.fall_duration_secs.max(MIN_DURATION_SECS),
                linger_secs: trees.linger_secs.max(0.0),
                respawn_delay_secs: trees.respawn_delay_secs.max(0.0),
            },
            pickups: PickupSettings {
                count: (pickups.count as usize).min(MAX_PICKUPS),
                spread: pickups.spread.max(0.0),
                heal_amount: pickups.heal_amount.max(0.0),
                collect_radius: pickups.collect_radius.max(0.0),
                spawn_height: pickups.spawn_height,
                hover_height: pickups.hover_height.max(0.0),
                hover_speed: pickups.hover_speed,
                rotation_speed: pickups.rotation_speed,
                respawn_delay_secs: pickups.respawn_delay_secs.max(0.0),
            },
            spawning: SpawnSettings {
                min_player_distance: value.spawning.min_player_distance.max(0.0),
                seed: value.spawning.seed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::parse_toml;

    #[test]
    fn defaults_match_shipped_tuning() {
        let settings = GameSettings::default();
        assert_eq!(settings.player.height, 5.0);
        assert_eq!(settings.player.sword_damage, 34.0);
        assert_eq!(settings.player.tree_damage, 50.0);
        assert_eq!(settings.zombies.max_population, 10);
        assert_eq!(settings.pickups.heal_amount, 50.0);
        assert!(settings.spawning.seed.is_none());
    }

    #[test]
    fn sanitises_nonsensical_values() {
        let raw: RawGameConfig = parse_toml(
            r#"
            [controls]
            gravity = 3.0

            [zombies]
            move_speed = 2.0
            sprint_speed = 1.0
            death_duration_secs = -4.0

            [player]
            facing_threshold = 7.0
            "#,
            "inline.toml",
        )
        .expect("valid toml");
        let settings = GameSettings::from(raw);

        assert!(settings.controls.gravity < 0.0);
        assert_eq!(settings.zombies.sprint_speed, 2.0);
        assert!(settings.zombies.death_duration_secs > 0.0);
        assert_eq!(settings.player.facing_threshold, 1.0);
        // Untouched sections keep their defaults.
        assert_eq!(settings.trees.count, 100);
    }

    #[test]
    fn caps_oversized_counts() {
        let raw: RawGameConfig = parse_toml(
            r#"
            [zombies]
            initial_count = 4000000000
            max_population = 4000000000

            [trees]
            count = 4000000000

            [pickups]
            count = 4000000000
            "#,
            "inline.toml",
        )
        .expect("valid toml");
        let settings = GameSettings::from(raw);

        assert_eq!(settings.trees.count, MAX_TREES);
        assert_eq!(settings.pickups.count, MAX_PICKUPS);
        assert_eq!(settings.zombies.max_population, MAX_ZOMBIES);
        assert!(settings.zombies.initial_count <= settings.zombies.max_population);
    }

    #[test]
    fn reads_optional_seed() {
        let raw: RawGameConfig =
            parse_toml("[spawning]\nseed = 42", "inline.toml").expect("valid toml");
        assert_eq!(GameSettings::from(raw).spawning.seed, Some(42));
    }
}
