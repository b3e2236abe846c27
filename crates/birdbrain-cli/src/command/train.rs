use std::{fs, path::PathBuf};

use anyhow::Context as _;
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use birdbrain_engine::{PipeCourse, SensorKind, consts::BIRD_WIDTH, score_for_distance};
use birdbrain_evolution::{
    BrainConfig, Evolution, EvolutionObserver, Generation, ReproductionSettings,
};
use birdbrain_nn::ShapeMismatchError;

/// Physics step, in seconds.
const TICK_SECONDS: f32 = 0.05;
/// Brains decide once per this many physics ticks.
const TICKS_PER_DECISION: usize = 2;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Number of generations to train for
    #[arg(long, default_value_t = 50)]
    generations: usize,
    /// RNG seed; a random one is drawn (and printed) when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Comma-separated sensors feeding each network
    #[arg(long, value_delimiter = ',', default_values_t = SensorKind::DEFAULT)]
    sensors: Vec<SensorKind>,
    /// Comma-separated hidden layer sizes
    #[arg(long, value_delimiter = ',', default_values_t = [2, 3])]
    hidden_layers: Vec<usize>,
    /// Tick cap per epoch; survivors are stopped where they stand
    #[arg(long, default_value_t = 3000)]
    max_ticks: usize,
    /// JSON file with reproduction settings
    #[arg(long)]
    settings: Option<PathBuf>,
}

impl Default for TrainArg {
    fn default() -> Self {
        Self {
            generations: 50,
            seed: None,
            sensors: SensorKind::DEFAULT.to_vec(),
            hidden_layers: vec![2, 3],
            max_ticks: 3000,
            settings: None,
        }
    }
}

/// Prints a per-generation progress report as the controller finalizes
/// generations.
#[derive(Debug, Clone, Copy, Default)]
struct ProgressReporter;

impl EvolutionObserver for ProgressReporter {
    fn generation_finalized(&mut self, generation: &Generation) {
        let stats = generation.displacement_stats();
        eprintln!("Generation #{}:", generation.index());
        eprintln!("  Distance:");
        eprintln!("    Min:    {:.1}", stats.min);
        eprintln!("    Max:    {:.1}", stats.max);
        eprintln!("    Mean:   {:.1}", stats.mean);
        eprintln!("    Median: {:.1}", stats.median);
        eprintln!("  Best score: {}", score_for_distance(generation.best_x()));
        eprintln!("  Total fitness: {:.3}", generation.total_fitness());
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let settings = match &arg.settings {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid settings file {}", path.display()))?
        }
        None => ReproductionSettings::default(),
    };
    anyhow::ensure!(!arg.sensors.is_empty(), "at least one sensor is required");
    let brain = BrainConfig {
        sensors: arg.sensors.clone(),
        hidden_layers: arg.hidden_layers.clone(),
    };
    let mut evolution = Evolution::new(brain, settings)?;

    let seed = arg.seed.unwrap_or_else(rand::random);
    eprintln!("Seed: {seed}");
    let mut rng = Pcg32::seed_from_u64(seed);
    let course = PipeCourse::generate(&mut rng);

    let mut reporter = ProgressReporter;
    evolution.reset(&mut rng, &mut ());
    for _ in 0..arg.generations {
        simulate_epoch(&mut evolution, &course, arg.max_ticks)?;
        evolution.next(&mut rng, &mut reporter)?;
    }

    if let Some(generation) = evolution.generations().last() {
        eprintln!("Best agents:");
        for (rank, agent) in generation.agents().iter().take(5).enumerate() {
            eprintln!(
                "  {rank:2} ({:?}): x = {:.1}, fitness = {:.3}",
                agent.provenance(),
                agent.bird().x,
                agent.fitness(),
            );
        }
    }

    eprintln!("Training completed.");
    eprintln!("  Best distance: {:.1}", evolution.best_x());
    eprintln!("  Best score: {}", score_for_distance(evolution.best_x()));

    Ok(())
}

/// Ticks the live population until every bird is dead or the tick cap is
/// reached, at which point survivors are killed where they stand so fitness
/// stays comparable across epochs.
fn simulate_epoch(
    evolution: &mut Evolution,
    course: &PipeCourse,
    max_ticks: usize,
) -> Result<(), ShapeMismatchError> {
    let sensors = evolution.brain().sensors.clone();
    for tick in 0..max_ticks {
        let mut any_alive = false;
        for agent in evolution.agents_mut() {
            if !agent.bird().alive {
                continue;
            }
            if tick.is_multiple_of(TICKS_PER_DECISION) {
                agent.act(&sensors, course)?;
            }
            let bird = agent.bird_mut();
            bird.update(TICK_SECONDS);
            let rects = course.rects_in_range(bird.x, bird.x + BIRD_WIDTH);
            bird.check_pipes(&rects);
            any_alive |= bird.alive;
        }
        if !any_alive {
            return Ok(());
        }
    }
    for agent in evolution.agents_mut() {
        agent.bird_mut().kill();
    }
    Ok(())
}
