use crate::config::{SimConfig, SimConfigError};
use crate::field::TrailField;
use crate::metrics::{collect_step_metrics, RunSummary};
use crate::population::AgentPopulation;
use crate::rng;
use crate::stats::DecisionStats;
use rand_chacha::ChaCha12Rng;
use std::time::Instant;
use std::{error::Error, fmt};

/// Wall-clock cost of one tick, broken down by pipeline stage.
#[derive(Clone, Debug)]
pub struct StepTimings {
    pub sense_us: u64,
    pub move_us: u64,
    pub deposit_us: u64,
    pub diffuse_us: u64,
    pub total_us: u64,
}

/// Driver-side container for one simulation: population, trail field,
/// decision statistics, configuration, and the seeded RNG. All state is
/// owned here and mutated only through [`World::step`] and the explicit
/// regeneration/reset operations; nothing is module-global.
pub struct World {
    pub population: AgentPopulation,
    field: TrailField,
    stats: DecisionStats,
    config: SimConfig,
    rng: ChaCha12Rng,
    step_index: usize,
    regenerate_pending: bool,
    /// Bumped per regeneration; selects the derived RNG stream for layout.
    population_generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperimentError {
    InvalidSampleEvery,
    TooManySteps { max: usize, actual: usize },
    TooManySamples { max: usize, actual: usize },
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentError::InvalidSampleEvery => write!(f, "sample_every must be positive"),
            ExperimentError::TooManySteps { max, actual } => {
                write!(f, "steps ({actual}) exceed supported maximum ({max})")
            }
            ExperimentError::TooManySamples { max, actual } => {
                write!(
                    f,
                    "sample count ({actual}) exceeds supported maximum ({max})"
                )
            }
        }
    }
}

impl Error for ExperimentError {}

impl World {
    pub const MAX_EXPERIMENT_STEPS: usize = 1_000_000;
    pub const MAX_EXPERIMENT_SAMPLES: usize = 50_000;

    pub fn new(config: SimConfig) -> Result<Self, SimConfigError> {
        config.validate()?;
        let field = TrailField::new(config.width, config.height, config.boundary_policy());
        let mut world = Self {
            population: AgentPopulation::new(),
            field,
            stats: DecisionStats::default(),
            rng: rng::create_rng(config.seed),
            step_index: 0,
            regenerate_pending: true,
            population_generation: 0,
            config,
        };
        world.regenerate();
        Ok(world)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn field(&self) -> &TrailField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut TrailField {
        &mut self.field
    }

    pub fn stats(&self) -> &DecisionStats {
        &self.stats
    }

    /// Explicit external reset; the pipeline itself never clears statistics.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Whether the driver should call [`World::regenerate`] before stepping.
    pub fn regenerate_pending(&self) -> bool {
        self.regenerate_pending
    }

    /// Replace the configuration. Raises the regeneration flag only when the
    /// population would no longer match it (`num_agents`, `start_layout`, or
    /// the field dimensions changed); other edits take effect on the next
    /// tick without touching the agents.
    pub fn set_config(&mut self, config: SimConfig) -> Result<(), SimConfigError> {
        config.validate()?;
        let dims_changed = config.width != self.config.width || config.height != self.config.height;
        if dims_changed {
            self.field = TrailField::new(config.width, config.height, config.boundary_policy());
        } else if config.wrap_around != self.config.wrap_around {
            self.field.set_policy(config.boundary_policy());
        }
        if dims_changed
            || config.num_agents != self.config.num_agents
            || config.start_layout != self.config.start_layout
        {
            self.regenerate_pending = true;
        }
        self.config = config;
        Ok(())
    }

    /// Wholesale population replacement per the configured layout; clears the
    /// pending flag. Decision statistics are untouched (independent
    /// lifecycle). The layout draws from a stream derived from the seed and
    /// the generation counter, so it does not depend on tick history.
    pub fn regenerate(&mut self) {
        self.population_generation += 1;
        let mut layout_rng =
            rng::derive_generation_rng(self.config.seed, self.population_generation);
        self.population.regenerate(
            self.config.num_agents,
            self.config.start_layout,
            self.config.width,
            self.config.height,
            &mut layout_rng,
        );
        self.regenerate_pending = false;
    }

    /// Advance the simulation by one tick: sense-and-rotate, move, deposit,
    /// diffuse-and-decay, strictly in that order. Each stage runs to
    /// completion over the whole population before the next begins, and the
    /// sense stage reads the field exactly as the previous tick's diffusion
    /// left it.
    pub fn step(&mut self) -> StepTimings {
        let total_start = Instant::now();
        self.step_index = self.step_index.saturating_add(1);

        let t0 = Instant::now();
        self.step_sense_phase();
        let sense_us = t0.elapsed().as_micros() as u64;

        let t1 = Instant::now();
        self.step_move_phase();
        let move_us = t1.elapsed().as_micros() as u64;

        let t2 = Instant::now();
        self.step_deposit_phase();
        let deposit_us = t2.elapsed().as_micros() as u64;

        let t3 = Instant::now();
        self.step_diffuse_phase();
        let diffuse_us = t3.elapsed().as_micros() as u64;

        StepTimings {
            sense_us,
            move_us,
            deposit_us,
            diffuse_us,
            total_us: total_start.elapsed().as_micros() as u64,
        }
    }

    pub fn run_experiment(&mut self, steps: usize, sample_every: usize) -> RunSummary {
        self.try_run_experiment(steps, sample_every)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Drive `steps` ticks, consulting the regeneration flag before each one,
    /// and sample metrics every `sample_every` ticks plus at the final tick.
    pub fn try_run_experiment(
        &mut self,
        steps: usize,
        sample_every: usize,
    ) -> Result<RunSummary, ExperimentError> {
        if sample_every == 0 {
            return Err(ExperimentError::InvalidSampleEvery);
        }
        if steps > Self::MAX_EXPERIMENT_STEPS {
            return Err(ExperimentError::TooManySteps {
                max: Self::MAX_EXPERIMENT_STEPS,
                actual: steps,
            });
        }
        let estimated_samples = if steps == 0 {
            0
        } else {
            ((steps - 1) / sample_every) + 1
        };
        if estimated_samples > Self::MAX_EXPERIMENT_SAMPLES {
            return Err(ExperimentError::TooManySamples {
                max: Self::MAX_EXPERIMENT_SAMPLES,
                actual: estimated_samples,
            });
        }

        let mut samples = Vec::with_capacity(estimated_samples);
        for step in 1..=steps {
            if self.regenerate_pending {
                self.regenerate();
            }
            self.step();
            if step % sample_every == 0 || step == steps {
                samples.push(collect_step_metrics(
                    step,
                    &self.stats,
                    &self.field,
                    &self.population,
                ));
            }
        }
        Ok(RunSummary {
            schema_version: 1,
            steps,
            sample_every,
            final_decision_total: self.stats.total(),
            samples,
        })
    }
}

mod phases;
