use serde::{Deserialize, Serialize};

/// Outcome of one sense-and-rotate evaluation.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    #[default]
    Straight,
    Left,
    Right,
    Indecisive,
}

/// A point agent: position, heading, and the last sensing outcome.
///
/// Owned exclusively by [`crate::population::AgentPopulation`]; mutated only
/// by the sense and move phases of the step pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Agent {
    pub x: f64,
    pub y: f64,
    /// Radians. Never wrapped; trigonometric use is periodic and unbounded
    /// accumulation stays well inside f64 precision over practical runs.
    pub heading: f64,
    pub last_decision: Decision,
}

impl Agent {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            x,
            y,
            heading,
            last_decision: Decision::default(),
        }
    }
}
