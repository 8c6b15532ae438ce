use crate::agent::Agent;
use crate::config::StartLayout;
use crate::constants::CIRCLE_RADIUS_FRACTION;
use rand::Rng;
use rand_chacha::ChaCha12Rng;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Ordered, fixed-cardinality collection of agents.
///
/// Population order is stable within a tick so seeded runs are reproducible.
/// Regeneration replaces the whole vector in one assignment; a partially
/// regenerated population is never observable.
#[derive(Clone, Debug, Default)]
pub struct AgentPopulation {
    agents: Vec<Agent>,
}

impl AgentPopulation {
    pub fn new() -> Self {
        Self { agents: Vec::new() }
    }

    pub fn from_agents(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    /// Discard every agent and build `count` fresh ones per the layout rule.
    pub fn regenerate(
        &mut self,
        count: usize,
        layout: StartLayout,
        width: usize,
        height: usize,
        rng: &mut ChaCha12Rng,
    ) {
        let fresh = match layout {
            StartLayout::Random => random_layout(count, width, height, rng),
            StartLayout::Circle => circle_layout(count, width, height),
        };
        self.agents = fresh;
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Agent> {
        self.agents.iter_mut()
    }

    /// Read-only renderer snapshot.
    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }
}

fn random_layout(count: usize, width: usize, height: usize, rng: &mut ChaCha12Rng) -> Vec<Agent> {
    (0..count)
        .map(|_| {
            Agent::new(
                rng.random::<f64>() * width as f64,
                rng.random::<f64>() * height as f64,
                rng.random::<f64>() * TAU,
            )
        })
        .collect()
}

fn circle_layout(count: usize, width: usize, height: usize) -> Vec<Agent> {
    let radius = CIRCLE_RADIUS_FRACTION * width.min(height) as f64;
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;
    (0..count)
        .map(|i| {
            let phi = TAU * i as f64 / count as f64;
            let (sin_phi, cos_phi) = phi.sin_cos();
            Agent::new(
                center_x + radius * cos_phi,
                center_y + radius * sin_phi,
                phi + FRAC_PI_2,
            )
        })
        .collect()
}
