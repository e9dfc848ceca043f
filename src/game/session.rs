//! Survival session: timer, kill count, game over, restart.
use bevy::{
    ecs::message::MessageReader,
    log::{debug, info},
    prelude::*,
};

use crate::{
    combat::{Health, TreeFelled, ZombieKilled},
    core::SimulationClock,
    player::components::Player,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Playing,
    GameOver,
}

#[derive(Resource, Debug, Default)]
pub struct GameSession {
    phase: SessionPhase,
    survival: f32,
    best: f32,
    kills: u32,
    trees_felled: u32,
}

impl GameSession {
    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    pub fn survival_secs(&self) -> f32 {
        self.survival
    }

    pub fn best_secs(&self) -> f32 {
        self.best
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn trees_felled(&self) -> u32 {
        self.trees_felled
    }

    pub fn advance(&mut self, dt: f32) {
        if self.is_playing() {
            self.survival += dt;
        }
    }

    pub fn record_kill(&mut self) {
        if self.is_playing() {
            self.kills += 1;
        }
    }

    pub fn record_tree_felled(&mut self) {
        if self.is_playing() {
            self.trees_felled += 1;
        }
    }

    /// Ends the run. Returns false if it had already ended.
    pub fn end(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.phase = SessionPhase::GameOver;
        self.best = self.best.max(self.survival);
        true
    }

    /// Starts a fresh run, keeping the best time.
    pub fn restart(&mut self) {
        self.phase = SessionPhase::Playing;
        self.survival = 0.0;
        self.kills = 0;
        self.trees_felled = 0;
    }
}

/// Run condition for systems that only tick during a live run.
pub fn session_is_playing(session: Res<GameSession>) -> bool {
    session.is_playing()
}

pub fn session_is_over(session: Res<GameSession>) -> bool {
    !session.is_playing()
}

pub fn advance_survival_timer(clock: Res<SimulationClock>, mut session: ResMut<GameSession>) {
    session.advance(clock.delta_secs());
}

/// Folds kill and felling messages into the run's tallies.
pub fn tally_session_events(
    mut kills: MessageReader<ZombieKilled>,
    mut felled: MessageReader<TreeFelled>,
    mut session: ResMut<GameSession>,
) {
    for kill in kills.read() {
        session.record_kill();
        debug!("Zombie {:?} killed ({} this run)", kill.zombie, session.kills());
    }
    for felling in felled.read() {
        session.record_tree_felled();
        debug!(
            "Tree {:?} felled ({} this run)",
            felling.tree,
            session.trees_felled()
        );
    }
}

pub fn detect_game_over(
    mut session: ResMut<GameSession>,
    player: Query<&Health, With<Player>>,
) {
    let Ok(health) = player.single() else {
        return;
    };
    if health.is_depleted() && session.end() {
        info!(
            "Game over: survived {} with {} kills and {} trees felled (best {})",
            format_survival_time(session.survival_secs()),
            session.kills(),
            session.trees_felled(),
            format_survival_time(session.best_secs())
        );
    }
}

/// `mm:ss`, minutes uncapped.
pub fn format_survival_time(seconds: f32) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survival_accumulates_only_while_playing() {
        let mut session = GameSession::default();
        session.advance(10.0);
        session.record_kill();
        session.record_tree_felled();
        assert!(session.end());
        assert!(!session.end());
        session.advance(5.0);
        session.record_kill();
        session.record_tree_felled();
        assert_eq!(session.survival_secs(), 10.0);
        assert_eq!(session.kills(), 1);
        assert_eq!(session.trees_felled(), 1);
        assert_eq!(session.best_secs(), 10.0);
    }

    #[test]
    fn restart_keeps_best_time() {
        let mut session = GameSession::default();
        session.advance(42.0);
        session.record_tree_felled();
        session.end();
        session.restart();
        assert!(session.is_playing());
        assert_eq!(session.survival_secs(), 0.0);
        assert_eq!(session.kills(), 0);
        assert_eq!(session.trees_felled(), 0);
        session.advance(5.0);
        session.end();
        assert_eq!(session.best_secs(), 42.0);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_survival_time(0.0), "00:00");
        assert_eq!(format_survival_time(59.9), "00:59");
        assert_eq!(format_survival_time(125.0), "02:05");
        assert_eq!(format_survival_time(-3.0), "00:00");
    }

    #[test]
    fn player_death_ends_the_run() {
        let mut app = App::new();
        app.init_resource::<GameSession>()
            .add_systems(Update, detect_game_over);
        let mut health = Health::new(100.0);
        health.apply_damage(100.0);
        app.world_mut().spawn((Player, health));

        app.update();

        assert!(!app.world().resource::<GameSession>().is_playing());
    }

    #[test]
    fn tallies_kills_and_felled_trees() {
        let mut app = App::new();
        app.init_resource::<GameSession>()
            .add_message::<ZombieKilled>()
            .add_message::<TreeFelled>()
            .add_systems(Update, tally_session_events);
        let zombie = app.world_mut().spawn_empty().id();
        let tree = app.world_mut().spawn_empty().id();
        app.world_mut().write_message(ZombieKilled { zombie });
        app.world_mut().write_message(ZombieKilled { zombie });
        app.world_mut().write_message(TreeFelled { tree });

        app.update();

        let session = app.world().resource::<GameSession>();
        assert_eq!(session.kills(), 2);
        assert_eq!(session.trees_felled(), 1);
    }
}
