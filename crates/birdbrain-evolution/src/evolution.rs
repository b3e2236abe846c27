use rand::Rng;
use serde::{Deserialize, Serialize};

use birdbrain_engine::SensorKind;
use birdbrain_nn::ShapeMismatchError;

use crate::{agent::Agent, generation::Generation};

/// Reproduction counts and mutation chances, adjustable between epochs.
///
/// The next population is assembled from, in order: `breed_count` bred
/// offspring, `clone_top_count` clones of the top ranks, `clone_best_count`
/// extra clones of the single best agent, and `random_count` fresh agents.
/// The population size is the sum of the four counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReproductionSettings {
    /// Offspring produced by crossover of two fitness-weighted picks.
    pub breed_count: usize,
    /// Clones of the generation's top-ranked agents (rank 0, 1, ...).
    pub clone_top_count: usize,
    /// Additional clones of the single best agent.
    pub clone_best_count: usize,
    /// Freshly randomized agents injected for diversity.
    pub random_count: usize,
    /// Per-weight mutation probability applied during breeding.
    pub breed_mutation_chance: f32,
    /// Per-weight mutation probability applied during cloning.
    pub clone_mutation_chance: f32,
}

impl Default for ReproductionSettings {
    fn default() -> Self {
        Self {
            breed_count: 25,
            clone_top_count: 3,
            clone_best_count: 2,
            random_count: 5,
            breed_mutation_chance: 0.05,
            clone_mutation_chance: 0.0,
        }
    }
}

impl ReproductionSettings {
    /// Total number of agents these settings produce per population.
    #[must_use]
    pub fn population_size(&self) -> usize {
        self.breed_count + self.clone_top_count + self.clone_best_count + self.random_count
    }

    /// Checks that both mutation chances lie in `[0, 1]` and at least one
    /// count is positive.
    pub fn validate(&self) -> Result<(), InvalidSettingsError> {
        for (field, value) in [
            ("breed_mutation_chance", self.breed_mutation_chance),
            ("clone_mutation_chance", self.clone_mutation_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(InvalidSettingsError::MutationChanceOutOfRange { field, value });
            }
        }
        if self.population_size() == 0 {
            return Err(InvalidSettingsError::EmptyPopulation);
        }
        Ok(())
    }
}

/// A rejected [`ReproductionSettings`] value. The previously applied
/// settings stay in effect.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidSettingsError {
    /// A mutation chance was outside `[0, 1]` (or NaN).
    #[display("{field} must be in [0, 1], got {value}")]
    MutationChanceOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// All four counts were zero.
    #[display("reproduction counts sum to zero; the population would be empty")]
    EmptyPopulation,
}

/// Network topology shared by every agent in a population: which sensors
/// feed the network and the hidden layer sizes.
///
/// This is an explicit constructor argument of [`Evolution`]; changing the
/// topology of a running population requires a [`Evolution::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrainConfig {
    /// Enabled sensors, in input order. Determines the input feature count.
    pub sensors: Vec<SensorKind>,
    /// Hidden layer sizes, input side first.
    pub hidden_layers: Vec<usize>,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            sensors: SensorKind::DEFAULT.to_vec(),
            hidden_layers: vec![2, 3],
        }
    }
}

/// Receives lifecycle notifications from [`Evolution`].
///
/// Both callbacks are fire-and-forget; the controller neither expects nor
/// waits for any acknowledgment. When an epoch rolls over, the
/// generation-finalized notification always precedes the
/// population-installed one.
pub trait EvolutionObserver {
    /// A finished population was snapshotted and appended to the history.
    fn generation_finalized(&mut self, _generation: &Generation) {}

    /// A new population was installed, either by reset or rollover.
    fn population_installed(&mut self, _agents: &[Agent]) {}
}

/// No-op observer for callers that don't care about notifications.
impl EvolutionObserver for () {}

/// Owns the live population and drives it from one generation to the next.
///
/// The controller idles empty until [`Self::reset`] installs the first
/// randomized population. From then on the simulation collaborator ticks
/// the agents and, once every bird is dead, calls [`Self::next`] to roll the
/// epoch over. The population is replaced wholesale at each rollover, never
/// mutated in place, so readers observe either the old population or the
/// new one.
#[derive(Debug)]
pub struct Evolution {
    brain: BrainConfig,
    settings: ReproductionSettings,
    generations: Vec<Generation>,
    agents: Vec<Agent>,
    best_x: f32,
}

impl Evolution {
    /// Creates an idle controller with no population.
    pub fn new(
        brain: BrainConfig,
        settings: ReproductionSettings,
    ) -> Result<Self, InvalidSettingsError> {
        settings.validate()?;
        Ok(Self {
            brain,
            settings,
            generations: Vec::new(),
            agents: Vec::new(),
            best_x: 0.0,
        })
    }

    /// The live population, in index order.
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Mutable access to the live population, for the simulation driver.
    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    /// The append-only history of finalized generations.
    #[must_use]
    pub fn generations(&self) -> &[Generation] {
        &self.generations
    }

    /// Index the next finalized generation will receive; also the number of
    /// epochs completed so far.
    #[must_use]
    pub fn generation_index(&self) -> usize {
        self.generations.len()
    }

    /// Best displacement seen across all finalized generations.
    #[must_use]
    pub fn best_x(&self) -> f32 {
        self.best_x
    }

    /// The network topology agents are created with.
    #[must_use]
    pub fn brain(&self) -> &BrainConfig {
        &self.brain
    }

    /// The reproduction settings currently in effect.
    #[must_use]
    pub fn settings(&self) -> &ReproductionSettings {
        &self.settings
    }

    /// Applies new reproduction settings for subsequent rollovers.
    ///
    /// Invalid settings are rejected and the previous settings remain in
    /// effect.
    pub fn set_settings(
        &mut self,
        settings: ReproductionSettings,
    ) -> Result<(), InvalidSettingsError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Discards all evolutionary state and installs a freshly randomized
    /// population of [`ReproductionSettings::population_size`] agents.
    pub fn reset<R, O>(&mut self, rng: &mut R, observer: &mut O)
    where
        R: Rng + ?Sized,
        O: EvolutionObserver + ?Sized,
    {
        self.best_x = 0.0;
        self.generations.clear();

        let agents = (0..self.settings.population_size())
            .map(|_| self.random_agent(0, rng))
            .collect();
        self.install(agents);
        observer.population_installed(&self.agents);
    }

    /// Rolls the epoch over once every bird in the population is dead.
    ///
    /// Snapshots the finished population into a ranked [`Generation`],
    /// updates the best-ever displacement, appends to the history, builds
    /// the next population, and notifies the observer (generation first,
    /// then population). On error no state is modified, so the previous
    /// population stays in place.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty (no [`Self::reset`] yet), or if
    /// `clone_top_count` exceeds the finished population's size.
    pub fn next<R, O>(&mut self, rng: &mut R, observer: &mut O) -> Result<(), ShapeMismatchError>
    where
        R: Rng + ?Sized,
        O: EvolutionObserver + ?Sized,
    {
        let generation = Generation::new(self.generations.len(), self.agents.clone());
        let next_agents = self.build_population(&generation, rng)?;

        if generation.best_x() > self.best_x {
            self.best_x = generation.best_x();
        }
        self.generations.push(generation);
        self.install(next_agents);

        let generation = self
            .generations
            .last()
            .expect("a generation was just pushed");
        observer.generation_finalized(generation);
        observer.population_installed(&self.agents);
        Ok(())
    }

    /// Builds the next population from a finalized generation, in the
    /// configured concatenation order: bred, top clones, best clones,
    /// random.
    fn build_population<R>(
        &self,
        generation: &Generation,
        rng: &mut R,
    ) -> Result<Vec<Agent>, ShapeMismatchError>
    where
        R: Rng + ?Sized,
    {
        let ReproductionSettings {
            breed_count,
            clone_top_count,
            clone_best_count,
            random_count,
            breed_mutation_chance,
            clone_mutation_chance,
        } = self.settings;
        let next_generation = generation.index() + 1;

        let mut agents = Vec::with_capacity(self.settings.population_size());

        for _ in 0..breed_count {
            let parent_a = generation.pick(rng);
            let parent_b = generation.pick(rng);
            agents.push(parent_a.breed(next_generation, parent_b, breed_mutation_chance, rng)?);
        }

        for rank in 0..clone_top_count {
            agents.push(generation.agents()[rank].clone_agent(clone_mutation_chance, rng));
        }

        for _ in 0..clone_best_count {
            agents.push(generation.best().clone_agent(clone_mutation_chance, rng));
        }

        for _ in 0..random_count {
            agents.push(self.random_agent(next_generation, rng));
        }

        Ok(agents)
    }

    fn random_agent<R>(&self, generation: usize, rng: &mut R) -> Agent
    where
        R: Rng + ?Sized,
    {
        Agent::random(
            generation,
            self.brain.sensors.len(),
            &self.brain.hidden_layers,
            rng,
        )
    }

    fn install(&mut self, mut agents: Vec<Agent>) {
        for (index, agent) in agents.iter_mut().enumerate() {
            agent.set_index(index);
        }
        self.agents = agents;
    }
}
