// src/ui/hud/systems.rs
//
// Systems for spawning and refreshing the HUD.

use bevy::prelude::*;

use crate::{
    combat::Health,
    controls::components::PointerState,
    game::session::{format_survival_time, GameSession},
    player::components::{DamageFlash, Player},
};

use super::components::{
    DamageFlashOverlay, GameOverLabel, GameOverOverlay, HealthBarFill, HealthLabel,
    InstructionsOverlay, StatsLabel, SurvivalLabel,
};

// Visual constants
const PANEL_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.5);
const BAR_FRAME_COLOR: Color = Color::srgb(0.25, 0.25, 0.25);
const BAR_FILL_COLOR: Color = Color::srgb(0.85, 0.1, 0.1);
const TEXT_COLOR: Color = Color::WHITE;
const OVERLAY_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);
const FLASH_MAX_ALPHA: f32 = 0.3;
const BAR_WIDTH: f32 = 200.0;

const INSTRUCTIONS: &str = "Click to play\n\
WASD / arrows: move\n\
Space: jump\n\
Mouse: look\n\
Left click: swing sword\n\
Escape: release mouse";

/// Builds the HUD tree once at startup.
pub fn spawn_hud(mut commands: Commands) {
    let text_font = |size: f32| TextFont {
        font_size: size,
        ..default()
    };

    // Damage flash sits underneath everything else.
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::NONE),
        DamageFlashOverlay,
    ));

    // Top-left status panel
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                padding: UiRect::all(Val::Px(8.0)),
                row_gap: Val::Px(6.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(PANEL_COLOR),
        ))
        .with_children(|panel| {
            panel
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        Node {
                            width: Val::Px(BAR_WIDTH),
                            height: Val::Px(16.0),
                            ..default()
                        },
                        BackgroundColor(BAR_FRAME_COLOR),
                    ))
                    .with_children(|frame| {
                        frame.spawn((
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(BAR_FILL_COLOR),
                            HealthBarFill,
                        ));
                    });
                    row.spawn((
                        Text::new(health_label(100.0, 100.0)),
                        text_font(16.0),
                        TextColor(TEXT_COLOR),
                        HealthLabel,
                    ));
                });

            panel.spawn((
                Text::new(survival_label(0.0)),
                text_font(18.0),
                TextColor(TEXT_COLOR),
                SurvivalLabel,
            ));
            panel.spawn((
                Text::new(stats_label(0.0, 0)),
                text_font(14.0),
                TextColor(TEXT_COLOR),
                StatsLabel,
            ));
        });

    // Centre instructions
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            InstructionsOverlay,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        padding: UiRect::all(Val::Px(16.0)),
                        ..default()
                    },
                    BackgroundColor(OVERLAY_COLOR),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new(INSTRUCTIONS),
                        text_font(20.0),
                        TextColor(TEXT_COLOR),
                        TextLayout::new_with_justify(Justify::Center),
                    ));
                });
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                display: Display::None,
                ..default()
            },
            BackgroundColor(OVERLAY_COLOR),
            GameOverOverlay,
        ))
        .with_children(|overlay| {
            overlay.spawn((
                Text::new(""),
                text_font(32.0),
                TextColor(TEXT_COLOR),
                TextLayout::new_with_justify(Justify::Center),
                GameOverLabel,
            ));
        });

    info!("HUD spawned");
}

pub fn update_health_hud(
    player: Query<&Health, (With<Player>, Changed<Health>)>,
    mut fill: Query<&mut Node, With<HealthBarFill>>,
    mut label: Query<&mut Text, With<HealthLabel>>,
) {
    let Ok(health) = player.single() else {
        return;
    };
    for mut node in fill.iter_mut() {
        node.width = Val::Percent(health.fraction() * 100.0);
    }
    for mut text in label.iter_mut() {
        text.0 = health_label(health.current(), health.max());
    }
}

pub fn update_session_labels(
    session: Res<GameSession>,
    mut survival: Query<&mut Text, (With<SurvivalLabel>, Without<StatsLabel>)>,
    mut stats: Query<&mut Text, (With<StatsLabel>, Without<SurvivalLabel>)>,
) {
    if !session.is_changed() {
        return;
    }
    for mut text in survival.iter_mut() {
        text.0 = survival_label(session.survival_secs());
    }
    for mut text in stats.iter_mut() {
        text.0 = stats_label(session.best_secs(), session.kills());
    }
}

pub fn update_instructions_overlay(
    pointer: Res<PointerState>,
    session: Res<GameSession>,
    mut overlay: Query<&mut Node, With<InstructionsOverlay>>,
) {
    let visible = !pointer.is_locked() && session.is_playing();
    for mut node in overlay.iter_mut() {
        node.display = if visible { Display::Flex } else { Display::None };
    }
}

pub fn update_damage_flash_overlay(
    flash: Res<DamageFlash>,
    mut overlay: Query<&mut BackgroundColor, With<DamageFlashOverlay>>,
) {
    let alpha = flash.intensity() * FLASH_MAX_ALPHA;
    for mut background in overlay.iter_mut() {
        background.0 = Color::srgba(1.0, 0.0, 0.0, alpha);
    }
}

pub fn update_game_over_overlay(
    session: Res<GameSession>,
    mut overlay: Query<&mut Node, With<GameOverOverlay>>,
    mut label: Query<&mut Text, With<GameOverLabel>>,
) {
    if !session.is_changed() {
        return;
    }
    let over = !session.is_playing();
    for mut node in overlay.iter_mut() {
        node.display = if over { Display::Flex } else { Display::None };
    }
    if over {
        for mut text in label.iter_mut() {
            text.0 = game_over_label(
                session.survival_secs(),
                session.kills(),
                session.trees_felled(),
            );
        }
    }
}

pub fn health_label(current: f32, max: f32) -> String {
    format!("{:.0} / {:.0}", current.max(0.0).ceil(), max)
}

fn survival_label(seconds: f32) -> String {
    format!("Survived {}", format_survival_time(seconds))
}

fn stats_label(best: f32, kills: u32) -> String {
    format!("Best {} | Kills {}", format_survival_time(best), kills)
}

fn game_over_label(seconds: f32, kills: u32, trees: u32) -> String {
    format!(
        "YOU DIED\nSurvived {} with {} kills\n{} trees felled\nPress R to restart",
        format_survival_time(seconds),
        kills,
        trees
    )
}
