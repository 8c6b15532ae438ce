use super::super::World;
use crate::field::BoundaryPolicy;

impl World {
    /// Advance each agent along its heading, then resolve the new position
    /// under the boundary policy. Headings are left unwrapped.
    pub(in crate::world) fn step_move_phase(&mut self) {
        let speed = self.config.speed;
        let width = self.config.width as f64;
        let height = self.config.height as f64;
        let policy = self.field.policy();

        for agent in self.population.iter_mut() {
            let (sin_h, cos_h) = agent.heading.sin_cos();
            agent.x = resolve_position(agent.x + speed * cos_h, width, policy);
            agent.y = resolve_position(agent.y + speed * sin_h, height, policy);
        }
    }
}

/// Map a moved coordinate back into [0, dim). Wrap uses modular arithmetic;
/// clamp folds the single out-of-range step a tick can produce onto the
/// opposite edge (per-tick displacement is validated to stay below `dim`).
fn resolve_position(v: f64, dim: f64, policy: BoundaryPolicy) -> f64 {
    let resolved = match policy {
        BoundaryPolicy::Wrap => v.rem_euclid(dim),
        BoundaryPolicy::Clamp => {
            if v < 0.0 {
                v + dim
            } else if v >= dim {
                v - dim
            } else {
                v
            }
        }
    };
    // rem_euclid of a tiny negative can round up to exactly `dim`.
    if resolved >= dim {
        0.0
    } else {
        resolved
    }
}
