//! World population, periodic zombie spawns, queued respawns, and restart.
use bevy::{
    ecs::system::SystemParam,
    log::{debug, info},
    prelude::*,
    time::TimerMode,
};

use crate::{
    combat::{targeting::horizontal_distance, Health},
    controls::components::{FirstPersonCamera, Locomotion},
    core::{GameSettings, SimulationClock, SpawnRng},
    game::{
        respawn::{RespawnKind, RespawnQueue},
        roster::EntityRoster,
        session::GameSession,
    },
    pickup::spawn::{spawn_health_pickup, PickupVisuals},
    player::{
        components::{DamageFlash, Invulnerability, Player, SwordAttack},
        systems::reset_player,
    },
    tree::spawn::{spawn_tree, TreeVisuals},
    zombie::spawn::{spawn_zombie, ZombieVisuals},
};

const MAX_PLACEMENT_ATTEMPTS: usize = 16;

/// Fires every `zombies.spawn_interval_secs`.
#[derive(Resource, Debug)]
pub struct ZombieSpawnTimer(pub Timer);

impl ZombieSpawnTimer {
    pub fn new(interval_secs: f32) -> Self {
        Self(Timer::from_seconds(interval_secs, TimerMode::Repeating))
    }
}

/// Everything needed to put a tree, zombie, or pickup into the world and the roster.
#[derive(SystemParam)]
pub struct Spawner<'w, 's> {
    commands: Commands<'w, 's>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    zombie_visuals: Res<'w, ZombieVisuals>,
    tree_visuals: Res<'w, TreeVisuals>,
    pickup_visuals: Res<'w, PickupVisuals>,
    roster: ResMut<'w, EntityRoster>,
    rng: ResMut<'w, SpawnRng>,
    settings: Res<'w, GameSettings>,
    clock: Res<'w, SimulationClock>,
}

impl Spawner<'_, '_> {
    pub fn roster(&self) -> &EntityRoster {
        &self.roster
    }

    pub fn has_zombie_room(&self) -> bool {
        has_room(self.roster.zombie_population(), self.settings.zombies.max_population)
    }

    pub fn zombie_at(&mut self, position: Vec3) -> Entity {
        let zombie = spawn_zombie(
            &mut self.commands,
            &mut self.materials,
            &self.zombie_visuals,
            position,
            self.settings.zombies.max_health,
        );
        self.roster.register_zombie(zombie);
        zombie
    }

    /// Spawns a zombie on the ring around `player` at a random angle.
    pub fn zombie_near(&mut self, player: Vec3) -> Entity {
        let zombies = &self.settings.zombies;
        let (distance, height) = (zombies.spawn_distance, zombies.spawn_height);
        let angle = self.rng.angle();
        self.zombie_at(ring_point(player, angle, distance, height))
    }

    pub fn tree(&mut self, player: Vec3) -> Entity {
        let trees = &self.settings.trees;
        let (spread, radius, health) = (trees.spread, trees.trunk_radius, trees.max_health);
        let point = self.scatter(spread, player);
        let tree = spawn_tree(
            &mut self.commands,
            &self.tree_visuals,
            &mut self.rng,
            Vec3::new(point.x, 0.0, point.y),
            radius,
            health,
        );
        self.roster.register_tree(tree);
        tree
    }

    pub fn pickup(&mut self, player: Vec3) -> Entity {
        let pickups = &self.settings.pickups;
        let (spread, height, amount) = (pickups.spread, pickups.spawn_height, pickups.heal_amount);
        let point = self.scatter(spread, player);
        let pickup = spawn_health_pickup(
            &mut self.commands,
            &self.pickup_visuals,
            Vec3::new(point.x, height, point.y),
            amount,
            self.clock.elapsed_secs(),
        );
        self.roster.register_pickup(pickup);
        pickup
    }

    /// Initial trees, zombies, and pickups.
    pub fn populate(&mut self, player: Vec3) {
        for _ in 0..self.settings.trees.count {
            self.tree(player);
        }
        for _ in 0..self.settings.zombies.initial_count {
            let zombies = &self.settings.zombies;
            let (spread, height) = (zombies.initial_spread, zombies.spawn_height);
            let point = self.scatter(spread, player);
            self.zombie_at(Vec3::new(point.x, height, point.y));
        }
        for _ in 0..self.settings.pickups.count {
            self.pickup(player);
        }
        info!(
            "World populated: {} trees, {} zombies, {} pickups",
            self.roster.standing_trees().len(),
            self.roster.live_zombies().len(),
            self.roster.active_pickups().len()
        );
    }

    fn scatter(&mut self, half_extent: f32, player: Vec3) -> Vec2 {
        scatter_point(
            &mut self.rng,
            half_extent,
            player,
            self.settings.spawning.min_player_distance,
        )
    }
}

pub fn has_room(population: usize, cap: usize) -> bool {
    population < cap
}

pub fn ring_point(center: Vec3, angle: f32, distance: f32, height: f32) -> Vec3 {
    Vec3::new(
        center.x + angle.cos() * distance,
        height,
        center.z + angle.sin() * distance,
    )
}

/// Uniform point in the square of `half_extent` around the origin, re-rolled
/// while it lands within `min_distance` of `avoid`. Gives up after a few tries.
pub fn scatter_point(rng: &mut SpawnRng, half_extent: f32, avoid: Vec3, min_distance: f32) -> Vec2 {
    let mut point = Vec2::ZERO;
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        point = Vec2::new(rng.symmetric(half_extent), rng.symmetric(half_extent));
        if horizontal_distance(avoid, Vec3::new(point.x, 0.0, point.y)) >= min_distance {
            break;
        }
    }
    point
}

fn player_position(player: &Query<&Transform, With<Player>>) -> Vec3 {
    player
        .single()
        .map(|transform| transform.translation)
        .unwrap_or(Vec3::ZERO)
}

pub fn initialize_world(mut spawner: Spawner, player: Query<&Transform, With<Player>>) {
    spawner.populate(player_position(&player));
}

pub fn periodic_zombie_spawn(
    mut spawner: Spawner,
    mut timer: ResMut<ZombieSpawnTimer>,
    player: Query<&Transform, With<Player>>,
) {
    let delta = spawner.clock.last_scaled_delta();
    if !timer.0.tick(delta).just_finished() {
        return;
    }
    if !spawner.has_zombie_room() {
        debug!(
            "Zombie cap reached ({}), skipping periodic spawn",
            spawner.roster().zombie_population()
        );
        return;
    }
    let zombie = spawner.zombie_near(player_position(&player));
    debug!("Periodic spawn {:?}", zombie);
}

pub fn process_respawns(
    mut spawner: Spawner,
    mut queue: ResMut<RespawnQueue>,
    player: Query<&Transform, With<Player>>,
) {
    let ready = queue.tick(spawner.clock.last_scaled_delta());
    if ready.is_empty() {
        return;
    }
    let position = player_position(&player);
    for kind in ready {
        match kind {
            RespawnKind::Zombie if spawner.has_zombie_room() => {
                spawner.zombie_near(position);
            }
            RespawnKind::Zombie => debug!("Zombie cap reached, dropping respawn"),
            RespawnKind::Tree => {
                spawner.tree(position);
            }
            RespawnKind::HealthPickup => {
                spawner.pickup(position);
            }
        }
    }
}

/// `R` after game over clears the world and starts a new run.
#[allow(clippy::type_complexity, clippy::too_many_arguments)]
pub fn restart_session(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut spawner: Spawner,
    mut session: ResMut<GameSession>,
    mut queue: ResMut<RespawnQueue>,
    mut timer: ResMut<ZombieSpawnTimer>,
    mut flash: ResMut<DamageFlash>,
    mut player: Query<
        (
            &mut Transform,
            &mut FirstPersonCamera,
            &mut Locomotion,
            &mut Health,
            &mut Invulnerability,
            &mut SwordAttack,
        ),
        With<Player>,
    >,
) {
    if !keyboard.just_pressed(KeyCode::KeyR) {
        return;
    }

    let cleared = spawner.roster.drain_all();
    for entity in &cleared {
        spawner.commands.entity(*entity).try_despawn();
    }
    queue.clear();
    timer.0.reset();
    flash.clear();

    let mut start = Vec3::ZERO;
    if let Ok((mut transform, mut camera, mut locomotion, mut health, mut invulnerability, mut attack)) =
        player.single_mut()
    {
        reset_player(
            &spawner.settings,
            &mut transform,
            &mut camera,
            &mut locomotion,
            &mut health,
            &mut invulnerability,
            &mut attack,
        );
        start = transform.translation;
    }

    session.restart();
    spawner.populate(start);
    info!("Restarted: cleared {} entities", cleared.len());
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn small_world_settings() -> GameSettings {
        let mut settings = GameSettings::default();
        settings.trees.count = 3;
        settings.zombies.initial_count = 2;
        settings.zombies.max_population = 3;
        settings.pickups.count = 1;
        settings
    }

    fn spawning_app(settings: GameSettings) -> App {
        let mut app = App::new();
        let mut clock = SimulationClock::default();
        clock.tick(Duration::from_millis(100));
        app.insert_resource(clock)
            .insert_resource(settings)
            .insert_resource(SpawnRng::from_seed(Some(11)))
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<ZombieVisuals>()
            .init_resource::<TreeVisuals>()
            .init_resource::<PickupVisuals>()
            .init_resource::<EntityRoster>()
            .init_resource::<RespawnQueue>()
            .init_resource::<GameSession>()
            .init_resource::<DamageFlash>()
            .init_resource::<ButtonInput<KeyCode>>();
        app
    }

    fn spawn_test_player(app: &mut App, translation: Vec3) -> Entity {
        let mut health = Health::new(100.0);
        health.apply_damage(100.0);
        app.world_mut()
            .spawn((
                Player,
                Transform::from_translation(translation),
                FirstPersonCamera::new(0.2),
                Locomotion::default(),
                health,
                Invulnerability::default(),
                SwordAttack::new(0.3),
            ))
            .id()
    }

    #[test]
    fn periodic_spawns_stop_at_the_cap() {
        let mut app = spawning_app(small_world_settings());
        app.insert_resource(ZombieSpawnTimer::new(0.05))
            .add_systems(Update, periodic_zombie_spawn);
        let player = Vec3::new(4.0, 5.0, -2.0);
        spawn_test_player(&mut app, player);

        for _ in 0..8 {
            app.update();
        }

        let roster = app.world().resource::<EntityRoster>();
        assert_eq!(roster.zombie_population(), 3);
        for zombie in roster.live_zombies() {
            let transform = app.world().get::<Transform>(*zombie).expect("zombie exists");
            assert!((horizontal_distance(player, transform.translation) - 30.0).abs() < 1e-3);
        }
    }

    #[test]
    fn restart_clears_the_world_and_starts_a_new_run() {
        let settings = small_world_settings();
        let mut app = spawning_app(settings.clone());
        app.insert_resource(ZombieSpawnTimer::new(5.0))
            .add_systems(Update, restart_session);
        let player = spawn_test_player(&mut app, Vec3::new(12.0, 5.0, 7.0));

        let stale_zombie = app.world_mut().spawn_empty().id();
        let stale_tree = app.world_mut().spawn_empty().id();
        {
            let mut roster = app.world_mut().resource_mut::<EntityRoster>();
            roster.register_zombie(stale_zombie);
            roster.register_tree(stale_tree);
            roster.start_tree_fall(stale_tree);
        }
        app.world_mut()
            .resource_mut::<RespawnQueue>()
            .schedule(RespawnKind::Zombie, 3.0);
        {
            let mut session = app.world_mut().resource_mut::<GameSession>();
            session.advance(30.0);
            session.record_kill();
            session.end();
        }

        // Nothing happens until R is pressed.
        app.update();
        assert!(app.world().get_entity(stale_zombie).is_ok());
        assert!(!app.world().resource::<GameSession>().is_playing());

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyR);
        app.update();

        assert!(app.world().get_entity(stale_zombie).is_err());
        assert!(app.world().get_entity(stale_tree).is_err());
        assert_eq!(app.world().resource::<RespawnQueue>().len(), 0);

        let roster = app.world().resource::<EntityRoster>();
        assert_eq!(roster.standing_trees().len(), settings.trees.count);
        assert_eq!(roster.live_zombies().len(), settings.zombies.initial_count);
        assert_eq!(roster.active_pickups().len(), settings.pickups.count);
        assert_eq!(roster.falling_tree_count(), 0);
        for tree in roster.standing_trees() {
            assert!(app.world().get_entity(*tree).is_ok());
        }

        let session = app.world().resource::<GameSession>();
        assert!(session.is_playing());
        assert_eq!(session.survival_secs(), 0.0);
        assert_eq!(session.kills(), 0);
        assert_eq!(session.best_secs(), 30.0);

        let health = app.world().get::<Health>(player).expect("player exists");
        assert!(health.is_full());
        let transform = app.world().get::<Transform>(player).expect("player exists");
        assert_eq!(transform.translation, Vec3::new(0.0, settings.player.height, 0.0));
    }

    #[test]
    fn cap_counts_population() {
        assert!(has_room(9, 10));
        assert!(!has_room(10, 10));
        assert!(!has_room(0, 0));
    }

    #[test]
    fn ring_points_sit_on_the_circle() {
        let player = Vec3::new(5.0, 5.0, -5.0);
        for step in 0..8 {
            let point = ring_point(player, step as f32, 30.0, 2.0);
            assert!((horizontal_distance(player, point) - 30.0).abs() < 1e-3);
            assert_eq!(point.y, 2.0);
        }
    }

    #[test]
    fn scatter_stays_in_bounds_and_clear_of_player() {
        let mut rng = SpawnRng::from_seed(Some(7));
        for _ in 0..200 {
            let point = scatter_point(&mut rng, 20.0, Vec3::new(0.0, 5.0, 0.0), 8.0);
            assert!(point.x.abs() <= 20.0 && point.y.abs() <= 20.0);
            assert!(point.length() >= 8.0);
        }
    }
}
