//! Generational search loop.
//!
//! Runs a fixed number of generations with no convergence detection or
//! early stopping. The only way out early is the caller's stop flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::chromosome::RosterChromosome;
use super::operators::{next_generation, rank, MutationType};
use super::problem::RosterProblem;
use crate::error::ScheduleError;

/// GA parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Individuals per generation (default: 200).
    pub population_size: usize,
    /// Generations to run (default: 1000).
    pub max_generations: usize,
    /// Per-position swap probability (default: 0.1).
    pub mutation_probability: f64,
    /// Mutation strategy (default: first hit).
    pub mutation_type: MutationType,
    /// Elites kept per generation = `population_size / elite_divisor` (default: 5).
    pub elite_divisor: usize,
    /// Parent pool = top `population_size / parent_pool_divisor` (default: 4).
    pub parent_pool_divisor: usize,
    /// RNG seed. `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
    /// Emit a progress event every this many generations. 0 disables.
    pub log_interval: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            max_generations: 1000,
            mutation_probability: 0.1,
            mutation_type: MutationType::FirstHit,
            elite_divisor: 5,
            parent_pool_divisor: 4,
            seed: None,
            log_interval: 100,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    pub fn with_mutation_probability(mut self, probability: f64) -> Self {
        self.mutation_probability = probability;
        self
    }

    pub fn with_mutation_type(mut self, mutation_type: MutationType) -> Self {
        self.mutation_type = mutation_type;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_log_interval(mut self, interval: usize) -> Self {
        self.log_interval = interval;
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.population_size == 0 {
            return Err(ScheduleError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.elite_divisor == 0 || self.parent_pool_divisor == 0 {
            return Err(ScheduleError::InvalidConfig(
                "elite_divisor and parent_pool_divisor must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(ScheduleError::InvalidConfig(format!(
                "mutation_probability must be within [0, 1], got {}",
                self.mutation_probability
            )));
        }
        Ok(())
    }
}

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Best individual of the final population.
    pub best: RosterChromosome,
    /// Its fitness.
    pub best_fitness: i64,
    /// Generations executed.
    pub generations: usize,
    /// Best fitness of each generation's ranked population, before reproduction.
    pub best_fitness_history: Vec<i64>,
}

/// Runs the rostering GA.
pub struct GaRunner;

impl GaRunner {
    /// Runs with an RNG seeded from `config.seed`, or from the OS when unset.
    pub fn run(problem: &RosterProblem, config: &GaConfig) -> Result<GaResult, ScheduleError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::run_with_rng(problem, config, &mut rng, None)
    }

    /// Runs with a caller-supplied RNG.
    ///
    /// `stop` is polled once per generation; when it is raised the run
    /// ends with [`ScheduleError::Cancelled`].
    pub fn run_with_rng<R: Rng>(
        problem: &RosterProblem,
        config: &GaConfig,
        rng: &mut R,
        stop: Option<&AtomicBool>,
    ) -> Result<GaResult, ScheduleError> {
        config.validate()?;
        let started = Instant::now();
        info!(
            drivers = problem.drivers().len(),
            routes = problem.routes().len(),
            population = config.population_size,
            generations = config.max_generations,
            "starting roster search"
        );

        let mut population: Vec<RosterChromosome> = (0..config.population_size)
            .map(|_| problem.create_individual(rng))
            .collect();
        let mut history = Vec::new();

        for generation in 0..config.max_generations {
            if stop.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                debug!(generation, "stop requested");
                return Err(ScheduleError::Cancelled);
            }

            problem.evaluate_population(&mut population);
            rank(&mut population);
            let best = population[0].fitness.unwrap_or(i64::MIN);
            history.push(best);

            if config.log_interval > 0 && generation % config.log_interval == 0 {
                debug!(generation, best_fitness = best, "generation ranked");
            }

            population = next_generation(&population, config, rng);
        }

        problem.evaluate_population(&mut population);
        let best = best_of(&population).clone();
        let best_fitness = best.fitness.unwrap_or(i64::MIN);

        info!(
            best_fitness,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "roster search finished"
        );

        Ok(GaResult {
            best,
            best_fitness,
            generations: config.max_generations,
            best_fitness_history: history,
        })
    }
}

/// First individual with the maximum fitness.
fn best_of(population: &[RosterChromosome]) -> &RosterChromosome {
    let mut best = &population[0];
    for candidate in &population[1..] {
        if candidate.fitness > best.fitness {
            best = candidate;
        }
    }
    best
}
