use crate::domain::{RestaurantCandidate, WheelOption, MAX_WHEEL_OPTIONS};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

pub const SPIN_DURATION: Duration = Duration::from_millis(3600);
const SPIN_TURNS: f64 = 4.0;

/// Shuffles the candidates and keeps up to `MAX_WHEEL_OPTIONS` of them.
pub fn select<R: Rng + ?Sized>(
    candidates: &[RestaurantCandidate],
    rng: &mut R,
) -> Vec<WheelOption> {
    let mut shuffled: Vec<&RestaurantCandidate> = candidates.iter().collect();
    shuffled.shuffle(rng);

    let options: Vec<WheelOption> = shuffled
        .into_iter()
        .take(MAX_WHEEL_OPTIONS)
        .map(WheelOption::from)
        .collect();

    tracing::debug!(
        options = ?options.iter().map(|o| o.name.as_str()).collect::<Vec<_>>(),
        "Options for the wheel"
    );
    options
}

/// Index of the segment under the pointer for a rotation measured in turns.
///
/// Segment `i` covers rotations `[i / n, (i + 1) / n)` modulo one turn.
pub fn segment_at(rotation: f64, segments: usize) -> usize {
    if segments == 0 {
        return 0;
    }

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let index = (rotation.rem_euclid(1.0) * segments as f64).floor() as usize;
    index.min(segments - 1)
}

/// An in-progress spin, easing from the current rotation onto a chosen segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinState {
    start: f64,
    end: f64,
    elapsed: Duration,
    duration: Duration,
    target: usize,
}

impl SpinState {
    /// Starts a spin from `rotation` that will land on a uniformly chosen segment.
    pub fn start<R: Rng>(rotation: f64, segments: usize, rng: &mut R) -> Option<Self> {
        if segments == 0 {
            return None;
        }

        let target = rng.gen_range(0..segments);
        Some(Self::towards(rotation, segments, target, SPIN_DURATION))
    }

    pub fn towards(rotation: f64, segments: usize, target: usize, duration: Duration) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let landing = (target as f64 + 0.5) / segments as f64;
        let end = rotation.floor() + SPIN_TURNS + landing;

        Self {
            start: rotation,
            end,
            elapsed: Duration::ZERO,
            duration,
            target,
        }
    }

    pub const fn target(&self) -> usize {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current rotation in turns, with a cubic ease-out.
    pub fn rotation(&self) -> f64 {
        if self.duration.is_zero() {
            return self.end;
        }

        let progress = (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        let eased = 1.0 - (1.0 - progress).powi(3);
        (self.end - self.start).mul_add(eased, self.start)
    }

    /// Moves the animation forward; returns the landed segment once the spin completes.
    pub fn advance(&mut self, delta: Duration) -> Option<usize> {
        if self.is_finished() {
            return None;
        }

        self.elapsed = (self.elapsed + delta).min(self.duration);
        self.is_finished().then_some(self.target)
    }
}
