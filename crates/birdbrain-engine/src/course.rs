use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    consts::{
        BIRD_WIDTH, GAME_HEIGHT, HOLE_HEIGHT, MAX_HOLE_Y, MIN_HOLE_Y, PIPE_DISTANCE, PIPE_WIDTH,
        START_PIPE_X,
    },
    geometry::Rect,
};

/// One pipe pair: a lower and an upper pipe separated by a hole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    /// X position of the pair's leading edge.
    pub x: f32,
    /// Bottom edge of the hole (top of the lower pipe).
    pub hole_bottom: f32,
}

impl Pipe {
    /// Top edge of the hole (bottom of the upper pipe).
    #[must_use]
    pub fn hole_top(&self) -> f32 {
        self.hole_bottom + HOLE_HEIGHT
    }

    /// Vertical center of the hole.
    #[must_use]
    pub fn hole_mid(&self) -> f32 {
        self.hole_bottom + HOLE_HEIGHT / 2.0
    }

    /// Collision rects for the lower and upper pipe.
    #[must_use]
    pub fn rects(&self) -> [Rect; 2] {
        [
            Rect {
                x: self.x,
                y: 0.0,
                w: PIPE_WIDTH,
                h: self.hole_bottom,
            },
            Rect {
                x: self.x,
                y: self.hole_top(),
                w: PIPE_WIDTH,
                h: GAME_HEIGHT - self.hole_top(),
            },
        ]
    }
}

/// Deterministic, unbounded layout of pipe pairs.
///
/// Pipe pair `i` sits at `START_PIPE_X + i * PIPE_DISTANCE`; its hole
/// position is derived from the course seed and the pipe index alone, so
/// any stretch of the course can be queried without generating the pipes
/// before it, and two courses with the same seed are identical. This is the
/// obstacle-layout interface the sensors and the collision checks consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeCourse {
    seed: u64,
}

impl PipeCourse {
    /// Creates a course with a specific seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Creates a course with a seed drawn from `rng`.
    #[must_use]
    pub fn generate<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(rng.random())
    }

    /// Returns the pipe pair at `index`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn pipe(&self, index: u64) -> Pipe {
        let mut rng = Pcg32::seed_from_u64(
            self.seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15),
        );
        Pipe {
            x: START_PIPE_X + index as f32 * PIPE_DISTANCE,
            hole_bottom: rng.random_range(MIN_HOLE_Y..=MAX_HOLE_Y),
        }
    }

    /// Returns the next pipe pair a bird at `x` has not yet fully passed:
    /// the first pair whose trailing edge is at or ahead of `x`.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn next_pipe(&self, x: f32) -> Pipe {
        let index = ((x - PIPE_WIDTH - START_PIPE_X) / PIPE_DISTANCE).ceil().max(0.0) as u64;
        self.pipe(index)
    }

    /// Returns the pipe pairs overlapping the closed x-range `[x1, x2]`.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn pipes_in_range(&self, x1: f32, x2: f32) -> Vec<Pipe> {
        if x2 < x1 || x2 < START_PIPE_X - PIPE_WIDTH {
            return Vec::new();
        }
        let first = ((x1 - PIPE_WIDTH - START_PIPE_X) / PIPE_DISTANCE).ceil().max(0.0) as u64;
        let last = ((x2 - START_PIPE_X) / PIPE_DISTANCE).floor().max(0.0) as u64;
        (first..=last)
            .map(|index| self.pipe(index))
            .filter(|pipe| pipe.x + PIPE_WIDTH >= x1 && pipe.x <= x2)
            .collect()
    }

    /// Collision rects of every pipe pair overlapping `[x1, x2]`.
    #[must_use]
    pub fn rects_in_range(&self, x1: f32, x2: f32) -> Vec<Rect> {
        self.pipes_in_range(x1, x2)
            .iter()
            .flat_map(Pipe::rects)
            .collect()
    }
}

/// Number of pipe pairs a bird displaced by `x` has passed.
///
/// Zero until the bird's center crosses the center of the first pipe, then
/// one more per pipe spacing.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn score_for_distance(x: f32) -> u32 {
    let offset = START_PIPE_X - PIPE_WIDTH / 2.0 + BIRD_WIDTH / 2.0;
    if x < offset {
        return 0;
    }
    ((x - offset) / PIPE_DISTANCE) as u32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_course() {
        let a = PipeCourse::new(42);
        let b = PipeCourse::new(42);
        for index in 0..50 {
            assert_eq!(a.pipe(index), b.pipe(index));
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = PipeCourse::new(1);
        let b = PipeCourse::new(2);
        let differs = (0..20).any(|i| a.pipe(i).hole_bottom != b.pipe(i).hole_bottom);
        assert!(differs);
    }

    #[test]
    fn test_holes_stay_in_bounds() {
        let course = PipeCourse::new(7);
        for index in 0..200 {
            let pipe = course.pipe(index);
            assert!(pipe.hole_bottom >= MIN_HOLE_Y);
            assert!(pipe.hole_bottom <= MAX_HOLE_Y);
            assert!(pipe.hole_top() <= GAME_HEIGHT);
        }
    }

    #[test]
    fn test_pipe_positions_are_evenly_spaced() {
        let course = PipeCourse::new(3);
        assert_eq!(course.pipe(0).x, START_PIPE_X);
        assert_eq!(course.pipe(1).x, START_PIPE_X + PIPE_DISTANCE);
        assert_eq!(course.pipe(5).x, START_PIPE_X + 5.0 * PIPE_DISTANCE);
    }

    #[test]
    fn test_next_pipe_before_course_is_first_pipe() {
        let course = PipeCourse::new(11);
        assert_eq!(course.next_pipe(0.0), course.pipe(0));
    }

    #[test]
    fn test_next_pipe_advances_after_trailing_edge() {
        let course = PipeCourse::new(11);
        let past_first = START_PIPE_X + PIPE_WIDTH + 1.0;
        assert_eq!(course.next_pipe(past_first), course.pipe(1));
    }

    #[test]
    fn test_pipes_in_range_empty_before_start() {
        let course = PipeCourse::new(5);
        assert!(course.pipes_in_range(0.0, START_PIPE_X - PIPE_WIDTH - 1.0).is_empty());
    }

    #[test]
    fn test_pipes_in_range_covers_span() {
        let course = PipeCourse::new(5);
        let pipes = course.pipes_in_range(START_PIPE_X, START_PIPE_X + 2.0 * PIPE_DISTANCE);
        assert_eq!(pipes.len(), 3);
        assert_eq!(pipes[0], course.pipe(0));
        assert_eq!(pipes[2], course.pipe(2));
    }

    #[test]
    fn test_rects_pair_per_pipe() {
        let course = PipeCourse::new(5);
        let rects = course.rects_in_range(START_PIPE_X, START_PIPE_X);
        assert_eq!(rects.len(), 2);
        // the hole lies between the two rects
        assert_eq!(rects[0].y, 0.0);
        assert_eq!(rects[1].y - (rects[0].y + rects[0].h), HOLE_HEIGHT);
    }

    #[test]
    fn test_score_zero_before_first_pipe() {
        assert_eq!(score_for_distance(0.0), 0);
        assert_eq!(score_for_distance(START_PIPE_X - PIPE_WIDTH), 0);
    }

    #[test]
    fn test_score_increments_per_pipe_spacing() {
        let offset = START_PIPE_X - PIPE_WIDTH / 2.0 + BIRD_WIDTH / 2.0;
        assert_eq!(score_for_distance(offset), 1);
        assert_eq!(score_for_distance(offset + PIPE_DISTANCE), 2);
        assert_eq!(score_for_distance(offset + 3.5 * PIPE_DISTANCE), 4);
    }
}
