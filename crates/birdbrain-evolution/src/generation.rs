use rand::Rng;

use birdbrain_stats::DescriptiveStats;

use crate::agent::Agent;

/// An immutable, fitness-ranked snapshot of one population at epoch end.
///
/// Construction sorts the agents by fitness, best first, and stamps each
/// with its rank (0 = best). Agents with equal fitness keep their original
/// relative order; their ranks are still distinct. The summed fitness is
/// cached once so weighted sampling is O(n) per draw with no re-summing.
#[derive(Debug, Clone)]
pub struct Generation {
    index: usize,
    agents: Vec<Agent>,
    total_fitness: f32,
}

impl Generation {
    /// Builds a generation snapshot from the agents that just finished an
    /// epoch.
    ///
    /// # Panics
    ///
    /// Panics if `agents` is empty.
    #[must_use]
    pub fn new(index: usize, mut agents: Vec<Agent>) -> Self {
        assert!(!agents.is_empty(), "a generation needs at least one agent");

        agents.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
        for (rank, agent) in agents.iter_mut().enumerate() {
            agent.set_rank(rank);
        }
        let total_fitness = agents.iter().map(Agent::fitness).sum();

        Self {
            index,
            agents,
            total_fitness,
        }
    }

    /// This generation's index (0 for the first finalized generation).
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The agents in rank order, best first.
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// The best-ranked agent.
    #[must_use]
    pub fn best(&self) -> &Agent {
        &self.agents[0]
    }

    /// The worst-ranked agent.
    #[must_use]
    pub fn worst(&self) -> &Agent {
        &self.agents[self.agents.len() - 1]
    }

    /// Displacement of the best agent.
    #[must_use]
    pub fn best_x(&self) -> f32 {
        self.best().bird().x
    }

    /// Displacement of the worst agent.
    #[must_use]
    pub fn worst_x(&self) -> f32 {
        self.worst().bird().x
    }

    /// Median displacement across the generation.
    #[must_use]
    pub fn median_x(&self) -> f32 {
        self.displacement_stats().median
    }

    /// Mean displacement across the generation.
    #[must_use]
    pub fn average_x(&self) -> f32 {
        self.displacement_stats().mean
    }

    /// Summary statistics of the agents' displacements.
    #[must_use]
    pub fn displacement_stats(&self) -> DescriptiveStats {
        DescriptiveStats::new(self.agents.iter().map(|agent| agent.bird().x))
            .expect("generation is never empty")
    }

    /// Sum of all agents' fitness, cached at construction.
    #[must_use]
    pub fn total_fitness(&self) -> f32 {
        self.total_fitness
    }

    /// Draws one agent with probability proportional to its fitness
    /// (roulette-wheel selection).
    ///
    /// Walks the ranked list subtracting each agent's fitness from a uniform
    /// draw in `[0, total_fitness)`. If the total fitness is zero (every
    /// agent scored nothing), or floating-point rounding exhausts the walk,
    /// the best-ranked agent is returned.
    pub fn pick<R>(&self, rng: &mut R) -> &Agent
    where
        R: Rng + ?Sized,
    {
        if self.total_fitness <= 0.0 {
            return self.best();
        }

        let mut value = rng.random_range(0.0..self.total_fitness);
        for agent in &self.agents {
            value -= agent.fitness();
            if value < 0.0 {
                return agent;
            }
        }
        self.best()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use birdbrain_engine::SensorKind;

    use super::*;

    fn agents_with_displacements(displacements: &[f32]) -> Vec<Agent> {
        let mut rng = Pcg32::seed_from_u64(42);
        displacements
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let mut agent = Agent::random(0, SensorKind::DEFAULT.len(), &[2], &mut rng);
                agent.set_index(i);
                agent.bird_mut().x = x;
                agent
            })
            .collect()
    }

    #[test]
    fn test_sorts_descending_and_assigns_ranks() {
        let generation = Generation::new(0, agents_with_displacements(&[50.0, 300.0, 120.0]));

        let displacements: Vec<f32> = generation.agents().iter().map(|a| a.bird().x).collect();
        assert_eq!(displacements, vec![300.0, 120.0, 50.0]);
        for (i, agent) in generation.agents().iter().enumerate() {
            assert_eq!(agent.rank(), Some(i));
        }
        assert!(
            generation
                .agents()
                .windows(2)
                .all(|pair| pair[0].fitness() >= pair[1].fitness())
        );
    }

    #[test]
    fn test_equal_fitness_keeps_distinct_ranks() {
        let generation = Generation::new(0, agents_with_displacements(&[100.0, 100.0, 100.0]));
        let ranks: Vec<_> = generation.agents().iter().map(Agent::rank).collect();
        assert_eq!(ranks, vec![Some(0), Some(1), Some(2)]);
        // stable sort keeps the original order on ties
        let indices: Vec<_> = generation.agents().iter().map(Agent::index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_total_fitness_is_sum() {
        let generation = Generation::new(0, agents_with_displacements(&[100.0, 200.0]));
        let expected: f32 = generation.agents().iter().map(Agent::fitness).sum();
        assert_eq!(generation.total_fitness(), expected);
    }

    #[test]
    fn test_displacement_statistics() {
        let generation =
            Generation::new(2, agents_with_displacements(&[10.0, 30.0, 20.0, 40.0, 50.0]));
        assert_eq!(generation.index(), 2);
        assert_eq!(generation.best_x(), 50.0);
        assert_eq!(generation.worst_x(), 10.0);
        assert_eq!(generation.median_x(), 30.0);
        assert_eq!(generation.average_x(), 30.0);
    }

    #[test]
    fn test_pick_always_returns_sole_scorer() {
        let generation = Generation::new(0, agents_with_displacements(&[0.0, 250.0, 0.0, 0.0]));
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(generation.pick(&mut rng).bird().x, 250.0);
        }
    }

    #[test]
    fn test_pick_with_zero_total_fitness_returns_best() {
        let generation = Generation::new(0, agents_with_displacements(&[0.0, 0.0, 0.0]));
        let mut rng = Pcg32::seed_from_u64(2);
        let picked = generation.pick(&mut rng);
        assert_eq!(picked.rank(), Some(0));
    }

    #[test]
    fn test_pick_favors_high_fitness() {
        let generation = Generation::new(0, agents_with_displacements(&[1000.0, 10.0]));
        let mut rng = Pcg32::seed_from_u64(3);
        let best_picks = (0..1000)
            .filter(|_| generation.pick(&mut rng).rank() == Some(0))
            .count();
        // fitness ratio is 10000:1, so the best agent should dominate
        assert!(best_picks > 950);
    }

    #[test]
    #[should_panic(expected = "at least one agent")]
    fn test_empty_generation_rejected() {
        let _ = Generation::new(0, Vec::new());
    }
}
