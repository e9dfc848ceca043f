//! Day/night configuration, phase clock, and the lighting/sky systems it drives.
use std::f32::consts::TAU;

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{config::load_toml_or_default, plugin::SimulationClock};
use crate::world::components::PrimarySun;

const CONFIG_PATH: &str = "config/time.toml";
const SUN_DISTANCE: f32 = 100.0;

const SKY_NIGHT: Vec3 = Vec3::new(0.0, 0.0, 0.1);
const SKY_SUNSET: Vec3 = Vec3::new(0.8, 0.3, 0.1);
const SKY_DAY: Vec3 = Vec3::new(0.1, 0.3, 0.85);
/// Lower half of the sky dome, fixed through the whole cycle.
const SKY_HORIZON: Vec3 = Vec3::new(0.7, 0.7, 0.9);

const MOUNTAIN_NIGHT: Vec3 = Vec3::new(0.145, 0.145, 0.145);
const MOUNTAIN_SUNSET: Vec3 = Vec3::new(0.486, 0.373, 0.373);
const MOUNTAIN_DAY: Vec3 = Vec3::new(0.29, 0.29, 0.29);

const MIN_ZOMBIE_GLOW: f32 = 0.2;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawTimeConfig {
    #[serde(default)]
    clock: RawClockSection,
    #[serde(default)]
    lighting: RawLightingSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawClockSection {
    day_length_seconds: f32,
    day_start_fraction: f32,
}

impl Default for RawClockSection {
    fn default() -> Self {
        Self {
            day_length_seconds: 120.0,
            day_start_fraction: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawLightingSection {
    noon_lux: f32,
    night_lux: f32,
    ambient_day: [f32; 3],
    ambient_night: [f32; 3],
    ambient_brightness: f32,
}

impl Default for RawLightingSection {
    fn default() -> Self {
        Self {
            noon_lux: 15_000.0,
            night_lux: 0.0,
            ambient_day: [0.45, 0.45, 0.5],
            ambient_night: [0.15, 0.15, 0.25],
            ambient_brightness: 300.0,
        }
    }
}

/// Tunable parameters describing how the day/night cycle behaves.
#[derive(Resource, Debug, Clone)]
pub struct WorldTimeSettings {
    pub day_length_seconds: f32,
    pub day_start_fraction: f32,
    pub noon_lux: f32,
    pub night_lux: f32,
    pub ambient_day: Vec3,
    pub ambient_night: Vec3,
    pub ambient_brightness: f32,
}

impl WorldTimeSettings {
    pub fn load_or_default() -> Self {
        load_toml_or_default::<RawTimeConfig>(CONFIG_PATH).into()
    }
}

impl Default for WorldTimeSettings {
    fn default() -> Self {
        RawTimeConfig::default().into()
    }
}

impl From<RawTimeConfig> for WorldTimeSettings {
    fn from(value: RawTimeConfig) -> Self {
        let clock = value.clock;
        let lighting = value.lighting;
        let night_lux = lighting.night_lux.max(0.0);

        Self {
            day_length_seconds: clock.day_length_seconds.max(1.0),
            day_start_fraction: clock.day_start_fraction.rem_euclid(1.0),
            noon_lux: lighting.noon_lux.max(night_lux),
            night_lux,
            ambient_day: Vec3::from_array(lighting.ambient_day),
            ambient_night: Vec3::from_array(lighting.ambient_night),
            ambient_brightness: lighting.ambient_brightness.max(0.0),
        }
    }
}

/// Phase clock for the day/night cycle.
#[derive(Resource, Debug)]
pub struct DayNightClock {
    time: f32,
    day_length: f32,
}

impl DayNightClock {
    pub fn new(settings: &WorldTimeSettings) -> Self {
        Self {
            time: settings.day_length_seconds * settings.day_start_fraction,
            day_length: settings.day_length_seconds,
        }
    }

    /// Fraction of the current day in `[0, 1)`.
    pub fn progress(&self) -> f32 {
        (self.time.rem_euclid(self.day_length)) / self.day_length
    }

    /// Number of full days completed.
    pub fn day_count(&self) -> u64 {
        (self.time / self.day_length).floor().max(0.0) as u64
    }

    pub fn tick(&mut self, delta_seconds: f32) {
        if delta_seconds.is_finite() && delta_seconds > 0.0 {
            self.time += delta_seconds;
        }
    }
}

/// Values derived from the sun each frame, read by other modules.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SkyState {
    pub sun_height: f32,
    pub sky_color: Vec3,
    pub mountain_color: Vec3,
    pub zombie_glow: f32,
}

impl SkyState {
    pub fn from_progress(progress: f32) -> Self {
        let height = sun_height(progress);
        Self {
            sun_height: height,
            sky_color: sky_color(height),
            mountain_color: mountain_color(height),
            zombie_glow: (1.0 - height).max(MIN_ZOMBIE_GLOW),
        }
    }
}

/// Sun angle in radians for a day fraction.
pub fn sun_angle(progress: f32) -> f32 {
    progress * TAU
}

/// Height of the sun above the horizon in `[0, 1]`.
pub fn sun_height(progress: f32) -> f32 {
    sun_angle(progress).sin().max(0.0)
}

pub fn sun_position(progress: f32) -> Vec3 {
    let angle = sun_angle(progress);
    Vec3::new(angle.cos() * SUN_DISTANCE, angle.sin() * SUN_DISTANCE, 0.0)
}

/// Night below 0.2, blends through sunset up to 0.6, full day above.
fn banded_color(height: f32, night: Vec3, sunset: Vec3, day: Vec3) -> Vec3 {
    if height < 0.2 {
        night
    } else if height < 0.4 {
        night.lerp(sunset, (height - 0.2) / 0.2)
    } else if height < 0.6 {
        sunset.lerp(day, (height - 0.4) / 0.2)
    } else {
        day
    }
}

pub fn sky_color(height: f32) -> Vec3 {
    banded_color(height, SKY_NIGHT, SKY_SUNSET, SKY_DAY)
}

pub fn mountain_color(height: f32) -> Vec3 {
    banded_color(height, MOUNTAIN_NIGHT, MOUNTAIN_SUNSET, MOUNTAIN_DAY)
}

/// Shared material tinted by the sun.
#[derive(Resource, Debug, Clone)]
pub struct MountainMaterial(pub Handle<StandardMaterial>);

/// Vertex-coloured sky dome mesh and the sky colour it was last painted with.
#[derive(Resource, Debug, Clone)]
pub struct SkyDome {
    pub mesh: Handle<Mesh>,
    painted: Vec3,
}

impl SkyDome {
    pub fn new(mesh: Handle<Mesh>, painted: Vec3) -> Self {
        Self { mesh, painted }
    }
}

fn vertex_color(color: Vec3) -> [f32; 4] {
    let linear = LinearRgba::from(Color::srgb(color.x, color.y, color.z));
    [linear.red, linear.green, linear.blue, 1.0]
}

/// Banded sky colour on vertices above the horizon, [`SKY_HORIZON`] below.
pub fn sky_dome_colors(positions: &[[f32; 3]], sky: Vec3) -> Vec<[f32; 4]> {
    let upper = vertex_color(sky);
    let lower = vertex_color(SKY_HORIZON);
    positions
        .iter()
        .map(|&[_, y, _]| if y > 0.0 { upper } else { lower })
        .collect()
}

pub fn paint_sky_dome(mesh: &mut Mesh, sky: Vec3) {
    let colors = mesh
        .attribute(Mesh::ATTRIBUTE_POSITION)
        .and_then(|values| values.as_float3())
        .map(|positions| sky_dome_colors(positions, sky));
    if let Some(colors) = colors {
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    }
}

/// Re-colours the upper half of the dome whenever the banded sky colour moves.
pub fn repaint_sky_dome(
    sky: Res<SkyState>,
    dome: Option<ResMut<SkyDome>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Some(mut dome) = dome else {
        return;
    };
    if dome.painted == sky.sky_color {
        return;
    }
    if let Some(mesh) = meshes.get_mut(&dome.mesh) {
        paint_sky_dome(mesh, sky.sky_color);
        dome.painted = sky.sky_color;
    }
}

/// Advances the day/night clock by the simulation delta and refreshes [`SkyState`].
pub fn advance_day_night(
    mut clock: ResMut<DayNightClock>,
    mut sky: ResMut<SkyState>,
    simulation_clock: Res<SimulationClock>,
) {
    let day = clock.day_count();
    clock.tick(simulation_clock.delta_secs());
    if clock.day_count() > day {
        info!("Day {} begins", clock.day_count() + 1);
    }
    *sky = SkyState::from_progress(clock.progress());
}

/// Applies the current sky state to the sun, ambient light, clear color, and mountains.
pub fn apply_world_lighting(
    clock: Res<DayNightClock>,
    sky: Res<SkyState>,
    settings: Res<WorldTimeSettings>,
    mut ambient: ResMut<AmbientLight>,
    mut clear_color: ResMut<ClearColor>,
    mountain_material: Option<Res<MountainMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut sun_query: Query<(&mut Transform, &mut DirectionalLight), With<PrimarySun>>,
) {
    let position = sun_position(clock.progress());
    let intensity = settings.night_lux + (settings.noon_lux - settings.night_lux) * sky.sun_height;

    for (mut transform, mut light) in sun_query.iter_mut() {
        *transform = Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y);
        light.illuminance = intensity;
    }

    let ambient_vec = settings
        .ambient_night
        .lerp(settings.ambient_day, sky.sun_height);
    ambient.color = Color::linear_rgb(ambient_vec.x, ambient_vec.y, ambient_vec.z);
    ambient.brightness = settings.ambient_brightness;

    clear_color.0 = Color::srgb(sky.sky_color.x, sky.sky_color.y, sky.sky_color.z);

    if let Some(handle) = mountain_material {
        if let Some(material) = materials.get_mut(&handle.0) {
            let tint = sky.mountain_color;
            material.base_color = Color::srgb(tint.x, tint.y, tint.z);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn clock_wraps_and_counts_days() {
        let settings = WorldTimeSettings {
            day_start_fraction: 0.0,
            ..WorldTimeSettings::default()
        };
        let mut clock = DayNightClock::new(&settings);
        clock.tick(30.0);
        assert!((clock.progress() - 0.25).abs() < 1e-6);
        clock.tick(120.0);
        assert!((clock.progress() - 0.25).abs() < 1e-6);
        assert_eq!(clock.day_count(), 1);

        clock.tick(f32::NAN);
        clock.tick(-4.0);
        assert!((clock.progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn starts_at_configured_fraction() {
        let clock = DayNightClock::new(&WorldTimeSettings::default());
        assert!((clock.progress() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn sun_is_below_horizon_for_second_half_of_day() {
        assert!((sun_height(0.25) - 1.0).abs() < 1e-6);
        assert_eq!(sun_height(0.75), 0.0);
        let noon = sun_position(0.25);
        assert!(noon.y > 99.0 && noon.x.abs() < 1e-3);
    }

    #[test]
    fn sky_bands_follow_sun_height() {
        assert!(approx(sky_color(0.0), SKY_NIGHT));
        assert!(approx(sky_color(0.19), SKY_NIGHT));
        assert!(approx(sky_color(0.3), SKY_NIGHT.lerp(SKY_SUNSET, 0.5)));
        assert!(approx(sky_color(0.4), SKY_SUNSET));
        assert!(approx(sky_color(0.6), SKY_DAY));
        assert!(approx(mountain_color(1.0), MOUNTAIN_DAY));
        assert!(approx(mountain_color(0.1), MOUNTAIN_NIGHT));
    }

    #[test]
    fn dome_keeps_a_pale_horizon_below_the_banded_sky() {
        let colors = sky_dome_colors(&[[0.0, 10.0, 0.0], [0.0, -10.0, 0.0]], SKY_SUNSET);
        assert_eq!(colors[0], vertex_color(SKY_SUNSET));
        assert_eq!(colors[1], vertex_color(SKY_HORIZON));
    }

    #[test]
    fn dome_is_repainted_when_the_sky_changes() {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .insert_resource(SkyState::from_progress(0.75))
            .add_systems(Update, repaint_sky_dome);
        let mut mesh = Sphere::new(10.0).mesh().uv(8, 8);
        paint_sky_dome(&mut mesh, SKY_DAY);
        let handle = app.world_mut().resource_mut::<Assets<Mesh>>().add(mesh);
        app.insert_resource(SkyDome::new(handle.clone(), SKY_DAY));

        app.update();

        let meshes = app.world().resource::<Assets<Mesh>>();
        let mesh = meshes.get(&handle).expect("dome mesh");
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
            .expect("positions");
        let Some(bevy::mesh::VertexAttributeValues::Float32x4(colors)) =
            mesh.attribute(Mesh::ATTRIBUTE_COLOR)
        else {
            panic!("dome has vertex colours");
        };
        for (position, color) in positions.iter().zip(colors) {
            let expected = if position[1] > 0.0 { SKY_NIGHT } else { SKY_HORIZON };
            assert_eq!(*color, vertex_color(expected));
        }
    }

    #[test]
    fn zombies_glow_brighter_at_night() {
        let night = SkyState::from_progress(0.75);
        let noon = SkyState::from_progress(0.25);
        assert_eq!(night.zombie_glow, 1.0);
        assert_eq!(noon.zombie_glow, MIN_ZOMBIE_GLOW);
    }

    #[test]
    fn config_sanitises_values() {
        let raw = RawTimeConfig {
            clock: RawClockSection {
                day_length_seconds: -5.0,
                day_start_fraction: 1.25,
            },
            lighting: RawLightingSection::default(),
        };
        let settings = WorldTimeSettings::from(raw);
        assert_eq!(settings.day_length_seconds, 1.0);
        assert!((settings.day_start_fraction - 0.25).abs() < 1e-6);
    }
}
