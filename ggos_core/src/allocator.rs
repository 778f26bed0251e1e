//! Death-to-workout allocation.
//!
//! Deaths are handed out in small random chunks (1 to 3 per draw) to
//! randomly chosen exercises until every death is assigned or no exercise
//! is left in the pool. An exercise that receives a full 3-death draw is
//! dropped from the pool for the rest of the run, so large death counts
//! against small catalogs can leave a shortfall. That shortfall is part of
//! the result, not an error.

use crate::{AllocationEntry, ExerciseDefinition, Workout};
use rand::Rng;

/// Upper bound on deaths assigned by a single draw
pub const MAX_DEATHS_PER_DRAW: u32 = 3;

/// Source of the two random choices the allocator makes
pub trait DrawSource {
    /// Index of the exercise to draw, in `0..len` (`len >= 1`)
    fn pick(&mut self, len: usize) -> usize;

    /// Deaths for this draw, in `1..=cap` (`cap >= 1`)
    fn allocation(&mut self, cap: u32) -> u32;
}

/// Uniform draws backed by any `rand` generator
#[derive(Debug)]
pub struct RngSource<R>(pub R);

impl<R: Rng> DrawSource for RngSource<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    fn allocation(&mut self, cap: u32) -> u32 {
        self.0.gen_range(1..=cap)
    }
}

/// Distribute `requested_deaths` across the catalog
///
/// Never fails: an empty catalog or a non-positive death count yields an
/// empty workout, and negative counts are clamped to zero.
pub fn generate_workout<S>(
    catalog: &[ExerciseDefinition],
    requested_deaths: i64,
    source: &mut S,
) -> Workout
where
    S: DrawSource + ?Sized,
{
    let requested = clamp_deaths(requested_deaths);

    if catalog.is_empty() || requested == 0 {
        tracing::debug!(
            "Nothing to allocate ({} exercises, {} deaths)",
            catalog.len(),
            requested
        );
        return Workout::empty(requested);
    }

    let mut pool: Vec<&ExerciseDefinition> = catalog.iter().collect();
    let mut remaining = requested;
    let mut entries = Vec::new();

    while remaining > 0 && !pool.is_empty() {
        // Out-of-range draws from a custom source are pinned to the valid range
        let index = source.pick(pool.len()).min(pool.len() - 1);
        let exercise = pool[index];

        let cap = MAX_DEATHS_PER_DRAW.min(remaining);
        let allocation = source.allocation(cap).clamp(1, cap);

        entries.push(AllocationEntry::new(exercise, allocation));
        remaining -= allocation;

        tracing::debug!(
            "Drew {} for {} deaths ({} remaining)",
            exercise.name,
            allocation,
            remaining
        );

        if allocation >= MAX_DEATHS_PER_DRAW {
            pool.remove(index);
        }
    }

    let workout = Workout {
        entries,
        total_deaths_accounted: requested - remaining,
        requested_deaths: requested,
    };

    if workout.shortfall() > 0 {
        tracing::info!(
            "Allocated {} of {} deaths; exercise pool exhausted",
            workout.total_deaths_accounted,
            requested
        );
    } else {
        tracing::info!(
            "Allocated {} deaths across {} draws",
            requested,
            workout.entries.len()
        );
    }

    workout
}

/// [`generate_workout`] using the thread-local RNG
pub fn generate_workout_random(catalog: &[ExerciseDefinition], requested_deaths: i64) -> Workout {
    generate_workout(catalog, requested_deaths, &mut RngSource(rand::thread_rng()))
}

fn clamp_deaths(deaths: i64) -> u32 {
    u32::try_from(deaths.max(0)).unwrap_or(u32::MAX)
}
