//! Evolutionary training loop for bird brains.
//!
//! This crate owns the genetic algorithm: population representation,
//! fitness-proportionate selection, breeding and mutation of network
//! weights, and generation bookkeeping.
//!
//! # How a training run works
//!
//! 1. [`Evolution::reset`] installs a population of [`Agent`]s with freshly
//!    randomized networks
//! 2. The simulation collaborator ticks each agent ([`Agent::act`]) until
//!    every bird in the population is dead
//! 3. The collaborator calls [`Evolution::next`], which snapshots the
//!    finished population into a ranked [`Generation`] and builds the next
//!    population from it: bred offspring, clones of the top ranks, clones of
//!    the single best agent, and fresh random agents
//! 4. Repeat
//!
//! Selection is roulette-wheel: an agent's chance of parenting offspring is
//! proportional to its fitness, the squared-and-scaled horizontal distance
//! its bird traveled. Crossover blends each weight of the two parents with
//! an independent random interpolation factor; mutation replaces individual
//! weights with fresh random values.
//!
//! Everything random takes a caller-supplied [`rand::Rng`] so tests can run
//! on a seeded generator.

pub use self::{
    agent::{Agent, AgentId, Provenance},
    evolution::{
        BrainConfig, Evolution, EvolutionObserver, InvalidSettingsError, ReproductionSettings,
    },
    generation::Generation,
};

pub mod agent;
pub mod evolution;
pub mod generation;
pub mod operators;
