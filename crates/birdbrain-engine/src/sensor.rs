use std::{fmt, str::FromStr};

use crate::{
    Bird, PipeCourse,
    consts::{BIRD_HEIGHT, BIRD_WIDTH, DISTANCE_RANGE, GAME_HEIGHT, PIPE_WIDTH},
    geometry::{Point, angle, distance, normalize_value},
};

/// A named scalar sensor a brain can subscribe to.
///
/// The enabled sensor set is configuration, not hardwired: it determines the
/// input feature count of every network in a population. All readings are
/// normalized into `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Distance from the bird's bottom edge to the bottom edge of the next
    /// hole.
    DistBottom,
    /// Distance from the bird's top edge to the top edge of the next hole.
    DistTop,
    /// The bird's own height above the ground.
    BirdY,
    /// Signed approach angle between the bird and the center of the next
    /// hole, as a fraction of a half turn.
    Angle,
}

impl SensorKind {
    /// The default sensor set: both hole distances plus the approach angle.
    pub const DEFAULT: [SensorKind; 3] = [
        SensorKind::DistBottom,
        SensorKind::DistTop,
        SensorKind::Angle,
    ];

    /// The configuration name of this sensor.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SensorKind::DistBottom => "dist_bottom",
            SensorKind::DistTop => "dist_top",
            SensorKind::BirdY => "bird_y",
            SensorKind::Angle => "angle",
        }
    }

    /// Computes this sensor's normalized reading for `bird` against the next
    /// pipe of `course`.
    #[must_use]
    pub fn read(self, bird: &Bird, course: &PipeCourse) -> f32 {
        let pipe = course.next_pipe(bird.x);
        let bird_mid_x = bird.x + BIRD_WIDTH / 2.0;
        let pipe_mid_x = pipe.x + PIPE_WIDTH / 2.0;

        match self {
            SensorKind::DistBottom => {
                let bird_edge = Point {
                    x: bird_mid_x,
                    y: bird.y,
                };
                let hole_edge = Point {
                    x: pipe_mid_x,
                    y: pipe.hole_bottom,
                };
                normalize_value(distance(bird_edge, hole_edge), DISTANCE_RANGE)
            }
            SensorKind::DistTop => {
                let bird_edge = Point {
                    x: bird_mid_x,
                    y: bird.y + BIRD_HEIGHT,
                };
                let hole_edge = Point {
                    x: pipe_mid_x,
                    y: pipe.hole_top(),
                };
                normalize_value(distance(bird_edge, hole_edge), DISTANCE_RANGE)
            }
            SensorKind::BirdY => normalize_value(bird.y, GAME_HEIGHT),
            SensorKind::Angle => {
                let vertex = Point {
                    x: pipe_mid_x,
                    y: pipe.hole_mid(),
                };
                let bird_mid = Point {
                    x: bird_mid_x,
                    y: bird.y + BIRD_HEIGHT / 2.0,
                };
                let level_with_hole = Point {
                    x: bird_mid_x,
                    y: pipe.hole_mid(),
                };
                let val = angle(vertex, bird_mid, level_with_hole);
                let signed = if bird_mid.x < vertex.x { -val } else { val };
                signed / std::f32::consts::PI
            }
        }
    }

    /// Reads every sensor in `sensors`, in order, into a feature vector.
    #[must_use]
    pub fn read_all(sensors: &[SensorKind], bird: &Bird, course: &PipeCourse) -> Vec<f32> {
        sensors
            .iter()
            .map(|sensor| sensor.read(bird, course))
            .collect()
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A sensor name that does not match any [`SensorKind`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown sensor name: {name:?}")]
pub struct UnknownSensorError {
    /// The unrecognized name.
    pub name: String,
}

impl FromStr for SensorKind {
    type Err = UnknownSensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dist_bottom" => Ok(SensorKind::DistBottom),
            "dist_top" => Ok(SensorKind::DistTop),
            "bird_y" => Ok(SensorKind::BirdY),
            "angle" => Ok(SensorKind::Angle),
            _ => Err(UnknownSensorError { name: s.to_owned() }),
        }
    }
}
