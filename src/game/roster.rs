//! Lifecycle bookkeeping for every managed zombie, tree, and health pickup.
use std::collections::HashSet;

use bevy::{log::debug, prelude::*};

/// Ordered live lists plus the dying/falling sets awaiting removal.
///
/// A zombie is in at most one of `zombies` and `dying_zombies`; it moves to
/// the dying set once and leaves it once. Trees follow the same rule with
/// `falling_trees`.
#[derive(Resource, Debug, Default)]
pub struct EntityRoster {
    zombies: Vec<Entity>,
    dying_zombies: HashSet<Entity>,
    trees: Vec<Entity>,
    falling_trees: HashSet<Entity>,
    pickups: Vec<Entity>,
}

impl EntityRoster {
    pub fn register_zombie(&mut self, zombie: Entity) {
        if !self.is_zombie_tracked(zombie) {
            self.zombies.push(zombie);
        }
    }

    pub fn register_tree(&mut self, tree: Entity) {
        if !self.trees.contains(&tree) && !self.falling_trees.contains(&tree) {
            self.trees.push(tree);
        }
    }

    pub fn register_pickup(&mut self, pickup: Entity) {
        if !self.pickups.contains(&pickup) {
            self.pickups.push(pickup);
        }
    }

    /// Moves a live zombie into the dying set. Returns false if it was not live.
    pub fn start_zombie_death(&mut self, zombie: Entity) -> bool {
        let Some(index) = self.zombies.iter().position(|entry| *entry == zombie) else {
            debug!("Ignoring death of {:?}: not a live zombie", zombie);
            return false;
        };
        self.zombies.remove(index);
        self.dying_zombies.insert(zombie);
        true
    }

    /// Drops a zombie whose death animation completed. Returns false if it was not dying.
    pub fn finish_zombie_death(&mut self, zombie: Entity) -> bool {
        let removed = self.dying_zombies.remove(&zombie);
        if !removed {
            debug!("Ignoring removal of {:?}: not in the dying set", zombie);
        }
        removed
    }

    pub fn start_tree_fall(&mut self, tree: Entity) -> bool {
        let Some(index) = self.trees.iter().position(|entry| *entry == tree) else {
            debug!("Ignoring fall of {:?}: not a standing tree", tree);
            return false;
        };
        self.trees.remove(index);
        self.falling_trees.insert(tree);
        true
    }

    pub fn finish_tree_fall(&mut self, tree: Entity) -> bool {
        let removed = self.falling_trees.remove(&tree);
        if !removed {
            debug!("Ignoring removal of {:?}: not a falling tree", tree);
        }
        removed
    }

    /// Removes a collected pickup. Returns false if it was already collected.
    pub fn collect_pickup(&mut self, pickup: Entity) -> bool {
        let Some(index) = self.pickups.iter().position(|entry| *entry == pickup) else {
            debug!("Ignoring collection of {:?}: not an active pickup", pickup);
            return false;
        };
        self.pickups.remove(index);
        true
    }

    #[cfg(test)]
    pub fn is_zombie_dying(&self, zombie: Entity) -> bool {
        self.dying_zombies.contains(&zombie)
    }

    pub fn is_zombie_tracked(&self, zombie: Entity) -> bool {
        self.zombies.contains(&zombie) || self.dying_zombies.contains(&zombie)
    }

    pub fn live_zombies(&self) -> &[Entity] {
        &self.zombies
    }

    pub fn standing_trees(&self) -> &[Entity] {
        &self.trees
    }

    pub fn active_pickups(&self) -> &[Entity] {
        &self.pickups
    }

    #[cfg(any(test, feature = "core_debug"))]
    pub fn dying_zombie_count(&self) -> usize {
        self.dying_zombies.len()
    }

    #[cfg(any(test, feature = "core_debug"))]
    pub fn falling_tree_count(&self) -> usize {
        self.falling_trees.len()
    }

    /// Live plus dying zombies; this is what the spawn cap counts.
    pub fn zombie_population(&self) -> usize {
        self.zombies.len() + self.dying_zombies.len()
    }

    /// Forgets every tracked entity and returns them for despawning.
    pub fn drain_all(&mut self) -> Vec<Entity> {
        let mut drained = Vec::with_capacity(
            self.zombies.len()
                + self.dying_zombies.len()
                + self.trees.len()
                + self.falling_trees.len()
                + self.pickups.len(),
        );
        drained.append(&mut self.zombies);
        drained.extend(self.dying_zombies.drain());
        drained.append(&mut self.trees);
        drained.extend(self.falling_trees.drain());
        drained.append(&mut self.pickups);
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(count: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn zombie_moves_from_live_to_dying_exactly_once() {
        let ids = entities(2);
        let mut roster = EntityRoster::default();
        roster.register_zombie(ids[0]);
        roster.register_zombie(ids[1]);
        assert_eq!(roster.zombie_population(), 2);

        assert!(roster.start_zombie_death(ids[0]));
        assert!(!roster.start_zombie_death(ids[0]));
        assert!(roster.is_zombie_dying(ids[0]));
        assert!(!roster.live_zombies().contains(&ids[0]));
        assert_eq!(roster.zombie_population(), 2);

        // Re-registering a dying zombie must not resurrect it.
        roster.register_zombie(ids[0]);
        assert_eq!(roster.live_zombies(), &[ids[1]]);

        assert!(roster.finish_zombie_death(ids[0]));
        assert!(!roster.finish_zombie_death(ids[0]));
        assert_eq!(roster.zombie_population(), 1);
        assert_eq!(roster.dying_zombie_count(), 0);
    }

    #[test]
    fn tree_fall_follows_the_same_rules() {
        let ids = entities(1);
        let mut roster = EntityRoster::default();
        roster.register_tree(ids[0]);

        assert!(roster.start_tree_fall(ids[0]));
        assert!(!roster.start_tree_fall(ids[0]));
        assert_eq!(roster.falling_tree_count(), 1);
        assert!(roster.standing_trees().is_empty());
        assert!(roster.finish_tree_fall(ids[0]));
        assert!(!roster.finish_tree_fall(ids[0]));
    }

    #[test]
    fn pickups_collect_once_and_drain_clears_everything() {
        let ids = entities(4);
        let mut roster = EntityRoster::default();
        roster.register_pickup(ids[0]);
        roster.register_zombie(ids[1]);
        roster.register_zombie(ids[2]);
        roster.register_tree(ids[3]);
        roster.start_zombie_death(ids[2]);

        assert!(roster.collect_pickup(ids[0]));
        assert!(!roster.collect_pickup(ids[0]));

        let drained = roster.drain_all();
        assert_eq!(drained.len(), 3);
        assert_eq!(roster.zombie_population(), 0);
        assert!(roster.standing_trees().is_empty());
        assert!(roster.active_pickups().is_empty());
    }
}
