//! Rejection sampling of 2D offsets that keep a minimum distance from each
//! other.
//!
//! Each candidate is drawn uniformly from an area.
//! If it's closer than the minimum distance to any offset placed so far, it's
//! discarded.
//! We keep drawing until we have enough offsets, the attempts run out or the
//! work is cancelled.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use bevy::math::{Rect, Vec2};
use rand::Rng;
use thiserror::Error;

/// What to place and where.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterParams {
    /// How many offsets we want.
    pub count: usize,
    /// Every offset lies within this area, edges included.
    pub area: Rect,
    /// Every pair of offsets is at least this far apart.
    pub min_distance: f32,
    /// How many candidates are drawn at most before giving up.
    pub max_attempts: usize,
}

/// Placement did not produce the full set.
#[derive(Debug, Error, PartialEq)]
pub enum ScatterError {
    /// The attempts ran out.
    /// The offsets placed so far still satisfy the spacing constraint and
    /// are returned so that the caller can show at least those.
    #[error(
        "Placed only {} of {requested} offsets in {attempts} attempts",
        .placed.len()
    )]
    Infeasible {
        /// Best effort.
        placed: Vec<Vec2>,
        /// What the params asked for.
        requested: usize,
        /// How many candidates were drawn.
        attempts: usize,
    },
    /// The owner of the work went away.
    #[error("Placement cancelled")]
    Cancelled,
    /// Candidates can only be drawn from an area with finite corners and a
    /// finite size.
    #[error("Cannot place anything within {area:?}")]
    InvalidArea {
        /// The area that was asked for.
        area: Rect,
    },
}

/// Shared flag that tells the sampling loop to stop.
///
/// Cloning gives another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that's not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// All handles observe the cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether [`CancelToken::cancel`] was called on any handle.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl ScatterParams {
    /// Offsets within `±range` on both axes around the origin.
    pub fn square(count: usize, range: f32, min_distance: f32) -> Self {
        Self {
            count,
            area: Rect::from_center_half_size(
                Vec2::ZERO,
                Vec2::splat(range.abs()),
            ),
            min_distance,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Offsets within the given area.
    pub fn within(count: usize, area: Rect, min_distance: f32) -> Self {
        Self {
            count,
            // normalizes min and max
            area: Rect::from_corners(area.min, area.max),
            min_distance,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overwrites the default attempt bound.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    fn has_valid_area(&self) -> bool {
        let Rect { min, max } = self.area;

        min.is_finite() && max.is_finite() && (max - min).is_finite()
    }

    fn sample(&self, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            rng.gen_range(self.area.min.x..=self.area.max.x),
            rng.gen_range(self.area.min.y..=self.area.max.y),
        )
    }

    fn keeps_distance(&self, placed: &[Vec2], candidate: Vec2) -> bool {
        placed
            .iter()
            .all(|p| p.distance(candidate) >= self.min_distance)
    }
}

/// Enough for any reasonable packing while still returning within a frame
/// or two on the async pool.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Draws candidates until [`ScatterParams::count`] offsets are placed.
///
/// The token is checked before every draw.
/// An area that's not finite is rejected before anything is drawn.
pub fn scatter(
    params: &ScatterParams,
    rng: &mut impl Rng,
    cancel: &CancelToken,
) -> Result<Vec<Vec2>, ScatterError> {
    if !params.has_valid_area() {
        return Err(ScatterError::InvalidArea { area: params.area });
    }

    let mut placed = Vec::with_capacity(params.count);
    let mut attempts = 0;

    while placed.len() < params.count {
        if cancel.is_cancelled() {
            return Err(ScatterError::Cancelled);
        }

        if attempts >= params.max_attempts {
            return Err(ScatterError::Infeasible {
                placed,
                requested: params.count,
                attempts,
            });
        }
        attempts += 1;

        let candidate = params.sample(rng);
        if params.keeps_distance(&placed, candidate) {
            placed.push(candidate);
        }
    }

    Ok(placed)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn assert_spaced(params: &ScatterParams, offsets: &[Vec2]) {
        for (i, a) in offsets.iter().enumerate() {
            assert!(params.area.contains(*a), "{a} outside {:?}", params.area);

            for b in &offsets[i + 1..] {
                assert!(
                    a.distance(*b) >= params.min_distance,
                    "{a} and {b} are too close"
                );
            }
        }
    }

    #[test]
    fn it_places_ten_stars_in_a_square() {
        let params = ScatterParams::square(10, 200.0, 100.0);

        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let offsets =
                scatter(&params, &mut rng, &CancelToken::new()).unwrap();

            assert_eq!(10, offsets.len());
            assert_spaced(&params, &offsets);
        }
    }

    #[test]
    fn it_places_within_an_offset_area() {
        let area = Rect::new(-97.5, -1044.0, 195.0, -844.0);
        let params = ScatterParams::within(10, area, 40.0);
        let mut rng = StdRng::seed_from_u64(7);

        let offsets = scatter(&params, &mut rng, &CancelToken::new()).unwrap();

        assert_eq!(10, offsets.len());
        assert_spaced(&params, &offsets);
    }

    #[test]
    fn it_normalizes_flipped_corners() {
        let flipped = Rect {
            min: Vec2::new(10.0, 10.0),
            max: Vec2::new(-10.0, -10.0),
        };
        let params = ScatterParams::within(3, flipped, 0.0);

        assert_eq!(Vec2::new(-10.0, -10.0), params.area.min);
        assert_eq!(Vec2::new(10.0, 10.0), params.area.max);
    }

    #[test]
    fn it_accepts_everything_without_spacing() {
        let params = ScatterParams::square(50, 1.0, 0.0).with_max_attempts(50);
        let mut rng = StdRng::seed_from_u64(1);

        let offsets = scatter(&params, &mut rng, &CancelToken::new()).unwrap();

        assert_eq!(50, offsets.len());
        assert_spaced(&params, &offsets);
    }

    #[test]
    fn it_returns_empty_set_for_zero_count() {
        let params = ScatterParams::square(0, 200.0, 100.0);
        let mut rng = StdRng::seed_from_u64(1);

        let offsets = scatter(&params, &mut rng, &CancelToken::new()).unwrap();

        assert!(offsets.is_empty());
    }

    #[test]
    fn it_gives_up_on_infeasible_packing() {
        // diagonal of the square is ~566 so only one offset ever fits
        let params =
            ScatterParams::square(10, 200.0, 1000.0).with_max_attempts(500);
        let mut rng = StdRng::seed_from_u64(3);

        let err = scatter(&params, &mut rng, &CancelToken::new()).unwrap_err();

        let ScatterError::Infeasible {
            placed,
            requested,
            attempts,
        } = err
        else {
            panic!("Expected infeasible, got {err:?}");
        };
        assert_eq!(1, placed.len());
        assert_eq!(10, requested);
        assert_eq!(500, attempts);
        assert_spaced(&params, &placed);
    }

    #[test]
    fn it_stops_when_cancelled() {
        let params = ScatterParams::square(10, 200.0, 100.0);
        let mut rng = StdRng::seed_from_u64(3);
        let cancel = CancelToken::new();
        cancel.clone().cancel();

        assert_eq!(
            Err(ScatterError::Cancelled),
            scatter(&params, &mut rng, &cancel)
        );
    }

    #[test]
    fn it_rejects_areas_that_are_not_finite() {
        let mut rng = StdRng::seed_from_u64(5);

        for params in [
            ScatterParams::square(10, f32::INFINITY, 100.0),
            ScatterParams::square(10, f32::NAN, 100.0),
            ScatterParams::square(0, f32::NAN, 100.0),
            // corners are finite but the size overflows
            ScatterParams::square(10, f32::MAX, 100.0),
            ScatterParams::within(
                3,
                Rect::new(0.0, f32::NEG_INFINITY, 10.0, 0.0),
                1.0,
            ),
        ] {
            // NaN corners never compare equal, hence no assert_eq
            let result = scatter(&params, &mut rng, &CancelToken::new());
            assert!(
                matches!(result, Err(ScatterError::InvalidArea { .. })),
                "{params:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn it_produces_fresh_sets() {
        let params = ScatterParams::square(10, 200.0, 100.0);
        let mut rng = StdRng::seed_from_u64(11);

        let first = scatter(&params, &mut rng, &CancelToken::new()).unwrap();
        let second = scatter(&params, &mut rng, &CancelToken::new()).unwrap();

        assert!(first.iter().all(|a| !second.contains(a)));
    }
}
