//! Systems translating keyboard and mouse input into player movement.
use bevy::{
    ecs::message::MessageReader,
    input::{mouse::MouseMotion, ButtonInput},
    prelude::*,
    window::{CursorGrabMode, CursorOptions},
};

use crate::{
    combat::targeting::flatten,
    controls::components::{FirstPersonCamera, Locomotion, PointerState},
    core::{GameSettings, SimulationClock},
    player::components::Player,
    tree::components::{Falling, Tree},
};

/// Click locks the pointer, escape releases it.
pub fn update_pointer_state(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut pointer: ResMut<PointerState>,
) {
    let clicked = mouse_buttons.just_pressed(MouseButton::Left);
    let escape = keyboard.just_pressed(KeyCode::Escape);
    match pointer.update(clicked, escape) {
        Some(true) => debug!("Pointer locked"),
        Some(false) => debug!("Pointer released"),
        None => {}
    }
}

/// Mirrors [`PointerState`] onto the window cursor.
pub fn apply_cursor_grab(pointer: Res<PointerState>, mut cursor_options: Single<&mut CursorOptions>) {
    if !pointer.is_changed() {
        return;
    }
    if pointer.is_locked() {
        cursor_options.visible = false;
        cursor_options.grab_mode = CursorGrabMode::Locked;
    } else {
        cursor_options.visible = true;
        cursor_options.grab_mode = CursorGrabMode::None;
    }
}

/// Applies mouse look while the pointer is locked.
pub fn first_person_mouse_look(
    mut motion_events: MessageReader<MouseMotion>,
    pointer: Res<PointerState>,
    time: Res<Time>,
    mut query: Query<(&mut FirstPersonCamera, &mut Transform), With<Player>>,
) {
    let mut cumulative_delta = Vec2::ZERO;
    for ev in motion_events.read() {
        cumulative_delta += ev.delta;
    }

    if !pointer.is_locked() || cumulative_delta == Vec2::ZERO {
        return;
    }

    if let Ok((mut camera, mut transform)) = query.single_mut() {
        camera.look(cumulative_delta, time.delta_secs());
        transform.rotation = camera.rotation();
    }
}

/// WASD/arrow movement with friction, plus jump physics.
pub fn move_player(
    keyboard: Res<ButtonInput<KeyCode>>,
    pointer: Res<PointerState>,
    clock: Res<SimulationClock>,
    settings: Res<GameSettings>,
    mut query: Query<(&FirstPersonCamera, &mut Locomotion, &mut Transform), With<Player>>,
) {
    let Ok((camera, mut locomotion, mut transform)) = query.single_mut() else {
        return;
    };
    let dt = clock.delta_secs();
    let controls = &settings.controls;

    let intent = if pointer.is_locked() {
        movement_intent(&keyboard)
    } else {
        Vec2::ZERO
    };

    if pointer.is_locked() && keyboard.just_pressed(KeyCode::Space) {
        locomotion.try_jump(controls.jump_velocity);
    }

    let displacement = locomotion.step_planar(intent, dt, controls);
    let (forward, right) = camera.planar_axes();
    transform.translation += right * displacement.x + forward * displacement.y;
    transform.translation.y = locomotion.step_vertical(
        transform.translation.y,
        settings.player.height,
        controls.gravity,
        dt,
    );
}

/// Keeps the player's collision circle outside every standing trunk.
pub fn resolve_tree_collisions(
    settings: Res<GameSettings>,
    mut player_query: Query<&mut Transform, With<Player>>,
    trees: Query<(&Transform, &Tree), (Without<Falling>, Without<Player>)>,
) {
    let Ok(mut player_transform) = player_query.single_mut() else {
        return;
    };
    let radius = settings.player.collision_radius;
    let mut position = player_transform.translation;

    for (tree_transform, tree) in trees.iter() {
        position = push_out_of_circle(
            position,
            tree_transform.translation,
            tree.trunk_radius + radius,
        );
    }

    player_transform.translation = position;
}

fn movement_intent(keyboard: &ButtonInput<KeyCode>) -> Vec2 {
    let pressed = |a: KeyCode, b: KeyCode| keyboard.pressed(a) || keyboard.pressed(b);
    let forward = pressed(KeyCode::KeyW, KeyCode::ArrowUp) as i8 as f32
        - pressed(KeyCode::KeyS, KeyCode::ArrowDown) as i8 as f32;
    let right = pressed(KeyCode::KeyD, KeyCode::ArrowRight) as i8 as f32
        - pressed(KeyCode::KeyA, KeyCode::ArrowLeft) as i8 as f32;
    Vec2::new(right, forward)
}

/// Moves `position` (ignoring height) to the edge of the circle if it is inside.
pub fn push_out_of_circle(position: Vec3, center: Vec3, radius: f32) -> Vec3 {
    let offset = flatten(position - center);
    let distance = offset.length();
    if distance >= radius {
        return position;
    }
    let direction = if distance > f32::EPSILON {
        offset / distance
    } else {
        Vec3::X
    };
    let pushed = flatten(center) + direction * radius;
    Vec3::new(pushed.x, position.y, pushed.z)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn push_out_moves_to_circle_edge_and_keeps_height() {
        let pushed = push_out_of_circle(Vec3::new(0.5, 5.0, 0.0), Vec3::ZERO, 1.1);
        assert!((pushed.x - 1.1).abs() < 1e-6);
        assert_eq!(pushed.y, 5.0);

        let outside = Vec3::new(3.0, 5.0, 0.0);
        assert_eq!(push_out_of_circle(outside, Vec3::ZERO, 1.1), outside);

        let centred = push_out_of_circle(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, 1.0);
        assert!((flatten(centred).length() - 1.0).abs() < 1e-6);
    }

    fn movement_app(locked: bool) -> App {
        let mut app = App::new();
        let mut clock = SimulationClock::default();
        clock.tick(Duration::from_millis(50));
        let mut pointer = PointerState::default();
        if locked {
            pointer.update(true, false);
        }
        app.insert_resource(clock)
            .insert_resource(pointer)
            .insert_resource(GameSettings::default())
            .init_resource::<ButtonInput<KeyCode>>()
            .add_systems(Update, move_player);
        app
    }

    #[test]
    fn holding_forward_moves_along_heading() {
        let mut app = movement_app(true);
        let player = app
            .world_mut()
            .spawn((
                Player::default(),
                FirstPersonCamera::new(0.2),
                Locomotion::default(),
                Transform::from_xyz(0.0, 5.0, 0.0),
            ))
            .id();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyW);

        app.update();
        app.update();

        let transform = app.world().get::<Transform>(player).expect("player exists");
        assert!(transform.translation.z < 0.0);
        assert!(transform.translation.x.abs() < 1e-5);
        assert_eq!(transform.translation.y, 5.0);
    }

    #[test]
    fn unlocked_pointer_ignores_keys() {
        let mut app = movement_app(false);
        let player = app
            .world_mut()
            .spawn((
                Player::default(),
                FirstPersonCamera::new(0.2),
                Locomotion::default(),
                Transform::from_xyz(0.0, 5.0, 0.0),
            ))
            .id();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyW);

        app.update();

        let transform = app.world().get::<Transform>(player).expect("player exists");
        assert_eq!(transform.translation, Vec3::new(0.0, 5.0, 0.0));
    }
}
