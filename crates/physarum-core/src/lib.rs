pub mod agent;
pub mod config;
pub mod constants;
pub mod field;
pub mod metrics;
pub mod population;
pub mod rng;
pub mod settings;
pub mod stats;
pub mod world;

pub use agent::{Agent, Decision};
pub use config::{SimConfig, SimConfigError, StartLayout};
pub use field::{BoundaryPolicy, TrailField};
pub use metrics::{RunSummary, StepMetrics};
pub use population::AgentPopulation;
pub use stats::{DecisionRatios, DecisionStats};
pub use world::{StepTimings, World};
