use bevy::prelude::*;

mod combat;
mod controls;
mod core;
mod game;
mod pickup;
mod player;
mod tree;
mod ui;
mod world;
mod zombie;

use crate::{
    controls::ControlsPlugin, core::CorePlugin, game::GamePlugin, pickup::PickupPlugin,
    player::PlayerPlugin, tree::TreePlugin, ui::HudPlugin, world::WorldPlugin,
    zombie::ZombiePlugin,
};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Nightfall".into(),
                    ..default()
                }),
                ..default()
            }),
            CorePlugin::default(),
            WorldPlugin,
            ControlsPlugin,
            PlayerPlugin,
            TreePlugin,
            ZombiePlugin,
            PickupPlugin,
            GamePlugin, // After the entity plugins so their visuals exist for spawning
            HudPlugin,
        ))
        .run();
}
