//! Headless side-scrolling obstacle simulation.
//!
//! This crate is the physical world the evolved networks are trained
//! against. It owns everything that is *not* evolutionary:
//!
//! - [`Bird`] - gravity/flap physics, out-of-bounds and collision death
//! - [`PipeCourse`] - deterministic, seeded placement of pipe obstacles
//! - [`SensorKind`] - normalized sensor readings a brain consumes each tick
//! - [`score_for_distance`] - pipes passed for a given displacement
//!
//! The crate deliberately knows nothing about networks or evolution; the
//! training loop asks it for sensor values and feeds back a single boolean
//! flap decision per bird per tick. There is no rendering here.
//!
//! # Coordinates
//!
//! `x` grows in the scroll direction and `y` grows upward, with `y = 0` at
//! the ground and `y = GAME_HEIGHT` at the ceiling. A pipe pair leaves a
//! hole of [`consts::HOLE_HEIGHT`] between its lower and upper halves.

pub use self::{
    bird::Bird,
    course::{Pipe, PipeCourse, score_for_distance},
    geometry::{Point, Rect},
    sensor::{SensorKind, UnknownSensorError},
};

pub mod bird;
pub mod consts;
pub mod course;
pub mod geometry;
pub mod sensor;
