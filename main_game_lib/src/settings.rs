//! Tunable numbers of both screens.
//!
//! The defaults are what the screens were designed with.
//! Any of them can be overwritten in `assets/settings.ron`, the file is
//! loaded once on startup.
//! A missing or malformed file leaves the defaults in place.

use bevy::{asset::LoadState, math::Rect};
use common_assets::{paths, RonLoader};
use common_visuals::{
    camera::{VISIBLE_HEIGHT, VISIBLE_WIDTH},
    scatter::DEFAULT_MAX_ATTEMPTS,
    shapes::{CLOUD_SIZE, STAR_SIZE},
    ScatterParams,
};
use serde::Deserialize;
use serde_with::{serde_as, DurationMilliSeconds};

use crate::prelude::*;

/// How many taps reveal the next stage.
pub const DEFAULT_TAPS_TO_ADVANCE: u8 = 3;

/// Both screens read this when they spawn.
#[derive(Asset, Resource, TypePath, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Per stage tap threshold.
    pub taps_to_advance: u8,
    /// End screen.
    pub stars: StarSettings,
    /// Dolls screen background.
    pub clouds: CloudSettings,
}

/// Floating stars of the end screen.
#[serde_as]
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StarSettings {
    /// How many stars are shown at once.
    pub count: usize,
    /// No two stars are closer than this.
    pub min_distance: f32,
    /// Stars are placed within this many pixels around the center on both
    /// axes.
    pub placement_range: f32,
    /// How often the stars are cleared and placed again.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub regeneration_interval: Duration,
    /// Stars fade out for this long and new stars are placed right after.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub fade_out: Duration,
    /// New stars fade in for this long.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub fade_in: Duration,
    /// Width and height of a star.
    pub size: f32,
    /// Bounds the placement.
    pub max_attempts: usize,
}

/// Clouds rising behind the dolls.
#[serde_as]
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CloudSettings {
    /// How many clouds there are.
    pub count: usize,
    /// How long one rise takes.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub rise_duration: Duration,
    /// Clouds in the same group start moving at the same time.
    pub group_size: usize,
    /// Each group starts this much later than the one before.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub group_delay: Duration,
    /// Each cloud rises this many pixels further than the one before it.
    pub trail: f32,
    /// Clouds start within this many pixels below the spawn line.
    pub spawn_band: f32,
    /// No two clouds start closer than this.
    pub min_distance: f32,
    /// Bounds the placement.
    pub max_attempts: usize,
    /// Cloud width.
    pub width: f32,
    /// Cloud height.
    pub height: f32,
}

/// Where the settings come from.
#[derive(Resource)]
pub struct SettingsSource {
    handle: Handle<Settings>,
    settled: bool,
}

pub(crate) struct Plugin;

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<Settings>()
            .init_asset_loader::<RonLoader<Settings>>()
            .init_resource::<Settings>()
            .add_systems(Startup, begin_loading)
            .add_systems(
                PreUpdate,
                apply_loaded.run_if(not(are_settled)),
            );
    }
}

/// Run condition.
/// True once the settings file was applied or failed to load.
pub fn are_settled(source: Option<Res<SettingsSource>>) -> bool {
    source.is_some_and(|source| source.settled)
}

fn begin_loading(mut cmd: Commands, asset_server: Res<AssetServer>) {
    debug!("Loading settings from {}", paths::settings::SETTINGS);

    cmd.insert_resource(SettingsSource {
        handle: asset_server.load(paths::settings::SETTINGS),
        settled: false,
    });
}

fn apply_loaded(
    asset_server: Res<AssetServer>,
    loaded: Res<Assets<Settings>>,
    mut source: ResMut<SettingsSource>,
    mut settings: ResMut<Settings>,
) {
    if let Some(loaded) = loaded.get(&source.handle) {
        info!("Applying settings from {}", paths::settings::SETTINGS);
        *settings = loaded.clone();
        source.settled = true;
        return;
    }

    if let Some(LoadState::Failed(err)) =
        asset_server.get_load_state(&source.handle)
    {
        warn!("Keeping default settings: {err}");
        source.settled = true;
    }
}

impl StarSettings {
    /// Where and how far apart the stars go.
    pub fn scatter_params(&self) -> ScatterParams {
        ScatterParams::square(
            self.count,
            self.placement_range,
            self.min_distance,
        )
        .with_max_attempts(self.max_attempts)
    }
}

impl CloudSettings {
    /// Clouds start just below the bottom edge, from a quarter of the width
    /// left of the center to the right edge.
    pub fn scatter_params(&self) -> ScatterParams {
        let below_bottom = -VISIBLE_HEIGHT / 2.0 - self.height / 2.0;
        let area = Rect::new(
            -VISIBLE_WIDTH / 4.0,
            below_bottom - self.spawn_band,
            VISIBLE_WIDTH / 2.0,
            below_bottom,
        );

        ScatterParams::within(self.count, area, self.min_distance)
            .with_max_attempts(self.max_attempts)
    }

    /// How long the cloud at the given index waits before it starts rising.
    pub fn start_delay(&self, index: usize) -> Duration {
        if self.group_size == 0 {
            return Duration::ZERO;
        }

        self.group_delay
            .saturating_mul((index % self.group_size) as u32)
    }

    /// How far up the cloud at the given index travels in one rise.
    pub fn rise(&self, index: usize) -> f32 {
        VISIBLE_HEIGHT + index as f32 * self.trail
    }

    /// Cloud width and height.
    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            taps_to_advance: DEFAULT_TAPS_TO_ADVANCE,
            stars: default(),
            clouds: default(),
        }
    }
}

impl Default for StarSettings {
    fn default() -> Self {
        Self {
            count: 10,
            min_distance: 100.0,
            placement_range: 200.0,
            regeneration_interval: from_millis(2_000),
            fade_out: from_millis(500),
            fade_in: from_millis(300),
            size: STAR_SIZE.x,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl Default for CloudSettings {
    fn default() -> Self {
        Self {
            count: 10,
            rise_duration: from_millis(10_000),
            group_size: 3,
            group_delay: from_millis(500),
            trail: 500.0,
            spawn_band: 200.0,
            min_distance: 40.0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            width: CLOUD_SIZE.x,
            height: CLOUD_SIZE.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use common_assets::parse_ron;

    use super::*;

    #[test]
    fn it_parses_partial_settings() {
        let settings: Settings = parse_ron(
            br#"(
                taps_to_advance: 5,
                stars: (count: 4, regeneration_interval: 3000),
            )"#,
        )
        .unwrap();

        assert_eq!(5, settings.taps_to_advance);
        assert_eq!(4, settings.stars.count);
        assert_eq!(from_millis(3_000), settings.stars.regeneration_interval);
        // untouched values keep their defaults
        assert_eq!(from_millis(500), settings.stars.fade_out);
        assert_eq!(CloudSettings::default(), settings.clouds);
    }

    #[test]
    fn it_parses_empty_settings_as_default() {
        let settings: Settings = parse_ron(b"()").unwrap();

        assert_eq!(Settings::default(), settings);
    }

    #[test]
    fn it_rejects_unknown_fields() {
        assert!(parse_ron::<Settings>(b"(stars: (colour: 1))").is_err());
    }

    #[test]
    fn it_parses_the_shipped_settings_file() {
        let settings: Settings = parse_ron(include_bytes!(
            "../../main_game/assets/settings.ron"
        ))
        .unwrap();

        assert_eq!(Settings::default(), settings);
    }

    #[test]
    fn it_staggers_clouds_in_groups() {
        let clouds = CloudSettings::default();

        let delays: Vec<_> = (0..6).map(|i| clouds.start_delay(i)).collect();

        assert_eq!(
            vec![
                from_millis(0),
                from_millis(500),
                from_millis(1_000),
                from_millis(0),
                from_millis(500),
                from_millis(1_000),
            ],
            delays
        );
    }

    #[test]
    fn it_does_not_stagger_without_groups() {
        let clouds = CloudSettings {
            group_size: 0,
            ..default()
        };

        assert_eq!(Duration::ZERO, clouds.start_delay(7));
    }

    #[test]
    fn it_saturates_long_group_delays() {
        let clouds = CloudSettings {
            group_delay: Duration::MAX,
            ..default()
        };

        assert_eq!(Duration::ZERO, clouds.start_delay(3));
        assert_eq!(Duration::MAX, clouds.start_delay(1));
        assert_eq!(Duration::MAX, clouds.start_delay(2));
    }

    #[test]
    fn it_takes_default_sizes_from_the_shapes() {
        assert_eq!(STAR_SIZE, Vec2::splat(StarSettings::default().size));
        assert_eq!(CLOUD_SIZE, CloudSettings::default().size());
    }

    #[test]
    fn it_rises_further_with_index() {
        let clouds = CloudSettings::default();

        assert_eq!(VISIBLE_HEIGHT, clouds.rise(0));
        assert_eq!(VISIBLE_HEIGHT + 1_000.0, clouds.rise(2));
    }

    #[test]
    fn it_places_clouds_below_the_screen() {
        let params = CloudSettings::default().scatter_params();

        assert_eq!(10, params.count);
        // the top of every cloud is below the bottom edge
        assert_eq!(-VISIBLE_HEIGHT / 2.0 - 40.0, params.area.max.y);
        assert_eq!(-VISIBLE_HEIGHT / 2.0 - 240.0, params.area.min.y);
    }

    #[test]
    fn it_places_stars_around_the_center() {
        let params = StarSettings::default().scatter_params();

        assert_eq!(10, params.count);
        assert_eq!(100.0, params.min_distance);
        assert_eq!(vec2(-200.0, -200.0), params.area.min);
        assert_eq!(vec2(200.0, 200.0), params.area.max);
    }
}
