use crate::{
    consts::{
        BIRD_HEIGHT, BIRD_WIDTH, FLAP_Y_VELOCITY, GAME_HEIGHT, GRAVITY, SCROLL_X_VELOCITY,
    },
    geometry::Rect,
};

/// Simulation-owned state of one bird: position, vertical velocity, and a
/// live/dead flag.
///
/// A live bird scrolls to the right at a constant velocity and falls under
/// gravity; a flap resets its vertical velocity upward. A dead bird stops
/// moving entirely, freezing its final `x` as the fitness signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Horizontal displacement since the start of the epoch.
    pub x: f32,
    /// Height of the bird's bottom edge above the ground.
    pub y: f32,
    /// Current vertical velocity, positive upward.
    pub y_velocity: f32,
    /// Whether the bird is still alive this epoch.
    pub alive: bool,
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

impl Bird {
    /// Creates a live bird at the start position, mid-height, moving upward
    /// as if it had just flapped.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: GAME_HEIGHT / 2.0,
            y_velocity: FLAP_Y_VELOCITY,
            alive: true,
        }
    }

    /// Resets vertical velocity to the flap impulse.
    pub fn flap(&mut self) {
        self.y_velocity = FLAP_Y_VELOCITY;
    }

    /// Advances physics by `dt_seconds`: integrates vertical velocity and
    /// gravity, scrolls forward, and kills the bird if it leaves the
    /// vertical bounds. Does nothing for dead birds.
    pub fn update(&mut self, dt_seconds: f32) {
        if !self.alive {
            return;
        }

        self.y += self.y_velocity * dt_seconds;
        self.y_velocity -= GRAVITY * dt_seconds;

        self.x += SCROLL_X_VELOCITY * dt_seconds;
        if self.y < BIRD_HEIGHT || self.y > GAME_HEIGHT - BIRD_HEIGHT {
            self.kill();
        }
    }

    /// Kills the bird on the first pipe rect its hitbox overlaps.
    pub fn check_pipes(&mut self, rects: &[Rect]) {
        let bird_rect = self.rect();
        if rects.iter().any(|rect| bird_rect.intersects(rect)) {
            self.kill();
        }
    }

    /// The bird's hitbox, with `y` clamped into the playable area.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y.clamp(0.0, GAME_HEIGHT),
            w: BIRD_WIDTH,
            h: BIRD_HEIGHT,
        }
    }

    /// Marks the bird dead.
    pub fn kill(&mut self) {
        self.alive = false;
    }
}
