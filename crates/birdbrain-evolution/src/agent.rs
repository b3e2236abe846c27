use rand::Rng;

use birdbrain_engine::{Bird, PipeCourse, SensorKind};
use birdbrain_nn::{Matrix, Network, ShapeMismatchError, should_flap};

use crate::operators;

/// Displacement is divided by this before squaring into fitness.
const FITNESS_DISPLACEMENT_SCALE: f32 = 100.0;

/// How an agent was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Freshly randomized weights (population reset or diversity injection).
    Random,
    /// Crossover of two parents.
    Breed,
    /// Copy of a single source agent, possibly mutated.
    Clone,
}

/// Identifies an agent by the population it was installed into and its
/// position within it. Used only as lineage metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentId {
    /// Index of the population the agent belonged to.
    pub generation: usize,
    /// The agent's position within that population.
    pub index: usize,
}

/// One individual in the population: a network plus lineage metadata plus
/// the simulation-owned bird state.
///
/// An agent's network is fixed at construction; the only thing that changes
/// afterward is its bird as the simulation advances. Bred and cloned agents
/// are built once per reproduction event and never touched again.
#[derive(Debug, Clone)]
pub struct Agent {
    network: Network,
    bird: Bird,
    generation: usize,
    lineage: Option<[AgentId; 2]>,
    provenance: Provenance,
    index: usize,
    rank: Option<usize>,
}

impl Agent {
    /// Creates an agent with a freshly randomized network.
    #[must_use]
    pub fn random<R>(
        generation: usize,
        input_features: usize,
        hidden_layers: &[usize],
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            network: Network::random(input_features, hidden_layers, rng),
            bird: Bird::new(),
            generation,
            lineage: None,
            provenance: Provenance::Random,
            index: 0,
            rank: None,
        }
    }

    /// Breeds this agent with `other`, producing an offspring for the
    /// population numbered `generation`.
    ///
    /// Each linear layer's weight matrix is the per-weight crossover of the
    /// parents' matrices at the same position, with independent mutation.
    /// The offspring records both parents as its lineage, in `[self, other]`
    /// order. Breeding an agent with itself is allowed; selection is with
    /// replacement.
    pub fn breed<R>(
        &self,
        generation: usize,
        other: &Agent,
        mutation_chance: f32,
        rng: &mut R,
    ) -> Result<Agent, ShapeMismatchError>
    where
        R: Rng + ?Sized,
    {
        let weights = self
            .network
            .linear_weights()
            .zip(other.network.linear_weights())
            .map(|(a, b)| operators::breed_weights(a, b, mutation_chance, rng))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Agent {
            network: Network::from_weights(weights),
            bird: Bird::new(),
            generation,
            lineage: Some([self.id(), other.id()]),
            provenance: Provenance::Breed,
            index: 0,
            rank: None,
        })
    }

    /// Clones this agent with an independent per-weight mutation chance.
    ///
    /// Weights are deep-copied; with `mutation_chance` of zero the clone's
    /// network behaves identically to the source's. The clone keeps the
    /// source's generation index and lineage, with provenance
    /// [`Provenance::Clone`], and starts with a fresh bird.
    #[must_use]
    pub fn clone_agent<R>(&self, mutation_chance: f32, rng: &mut R) -> Agent
    where
        R: Rng + ?Sized,
    {
        let weights = self
            .network
            .linear_weights()
            .map(|weight| operators::mutate_weights(weight, mutation_chance, rng))
            .collect();

        Agent {
            network: Network::from_weights(weights),
            bird: Bird::new(),
            generation: self.generation,
            lineage: self.lineage,
            provenance: Provenance::Clone,
            index: 0,
            rank: None,
        }
    }

    /// Reads the configured sensors, runs the network, and flaps the bird
    /// when the output is strictly positive. Returns the decision.
    pub fn act(
        &mut self,
        sensors: &[SensorKind],
        course: &PipeCourse,
    ) -> Result<bool, ShapeMismatchError> {
        let values = SensorKind::read_all(sensors, &self.bird, course);
        let input = Matrix::from_rows(vec![values]);
        let output = self.network.forward(&input)?;
        let flap = should_flap(&output);
        if flap {
            self.bird.flap();
        }
        Ok(flap)
    }

    /// Fitness: the bird's horizontal displacement, scaled and squared.
    ///
    /// Non-negative, zero only at zero displacement, and strictly increasing
    /// in displacement.
    #[must_use]
    pub fn fitness(&self) -> f32 {
        (self.bird.x / FITNESS_DISPLACEMENT_SCALE).powi(2)
    }

    /// The agent's network.
    #[must_use]
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The agent's bird state.
    #[must_use]
    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    /// Mutable access to the bird, for the simulation driver.
    pub fn bird_mut(&mut self) -> &mut Bird {
        &mut self.bird
    }

    /// Index of the population this agent was created for.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The agent's parents, for bred agents only.
    #[must_use]
    pub fn lineage(&self) -> Option<[AgentId; 2]> {
        self.lineage
    }

    /// How this agent was produced.
    #[must_use]
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Position within the installed population.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Rank within the finalized generation (0 = best), assigned when the
    /// generation snapshot is built.
    #[must_use]
    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    #[must_use]
    fn id(&self) -> AgentId {
        AgentId {
            generation: self.generation,
            index: self.index,
        }
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub(crate) fn set_rank(&mut self, rank: usize) {
        self.rank = Some(rank);
    }
}
