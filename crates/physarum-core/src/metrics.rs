use crate::field::TrailField;
use crate::population::AgentPopulation;
use crate::stats::DecisionStats;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StepMetrics {
    pub step: usize,
    pub straight_ratio: f64,
    pub left_ratio: f64,
    pub right_ratio: f64,
    pub indecisive_ratio: f64,
    pub trail_mean: f32,
    pub trail_max: f32,
    pub agent_count: usize,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub steps: usize,
    pub sample_every: usize,
    /// Grand total of recorded decisions at the end of the run.
    pub final_decision_total: u64,
    pub samples: Vec<StepMetrics>,
}

pub fn collect_step_metrics(
    step: usize,
    stats: &DecisionStats,
    field: &TrailField,
    population: &AgentPopulation,
) -> StepMetrics {
    let ratios = stats.ratios();
    let data = field.data();
    let trail_mean = if data.is_empty() {
        0.0
    } else {
        data.iter().sum::<f32>() / data.len() as f32
    };
    let trail_max = data.iter().copied().fold(0.0f32, f32::max);
    StepMetrics {
        step,
        straight_ratio: ratios.straight,
        left_ratio: ratios.left,
        right_ratio: ratios.right,
        indecisive_ratio: ratios.indecisive,
        trail_mean,
        trail_max,
        agent_count: population.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Decision;
    use crate::field::BoundaryPolicy;

    #[test]
    fn collects_trail_extremes_and_population_size() {
        let mut field = TrailField::new(10, 10, BoundaryPolicy::Wrap);
        field.add(4.0, 4.0, 0.5);
        let mut stats = DecisionStats::default();
        stats.record(Decision::Straight);
        let population = AgentPopulation::from_agents(vec![crate::agent::Agent::new(0.0, 0.0, 0.0); 3]);

        let metrics = collect_step_metrics(7, &stats, &field, &population);
        assert_eq!(metrics.step, 7);
        assert_eq!(metrics.agent_count, 3);
        assert!((metrics.trail_max - 0.5).abs() < 1e-6);
        assert!((metrics.trail_mean - 0.5 / 100.0).abs() < 1e-6);
        assert!((metrics.straight_ratio - 1.0).abs() < 1e-12);
    }

    #[test]
    fn run_summary_round_trips_and_fills_schema_version() {
        let summary = RunSummary {
            schema_version: 1,
            steps: 100,
            sample_every: 10,
            final_decision_total: 400,
            samples: vec![StepMetrics::default()],
        };
        let json = serde_json::to_string(&summary).expect("summary should serialize");
        let parsed: RunSummary = serde_json::from_str(&json).expect("summary should parse");
        assert_eq!(parsed.steps, 100);

        let legacy = r#"{"steps": 5, "sample_every": 1, "final_decision_total": 0, "samples": []}"#;
        let parsed: RunSummary = serde_json::from_str(legacy).expect("legacy summary should parse");
        assert_eq!(parsed.schema_version, 1);
    }
}
