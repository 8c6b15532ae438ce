use super::super::World;
use crate::agent::Decision;
use rand::Rng;
use rand_chacha::ChaCha12Rng;

impl World {
    /// Sample the trail at the three probe points and turn toward the
    /// strongest reading, recording the outcome per agent and in the
    /// decision statistics. Nothing is written to the field here, so every
    /// agent senses the field exactly as the previous tick's diffusion left
    /// it.
    pub(in crate::world) fn step_sense_phase(&mut self) {
        let sensor_distance = self.config.sensor_distance;
        let sensor_angle = self.config.sensor_angle;
        let turning_speed = self.config.turning_speed;
        let random_turning = self.config.random_turning;

        let field = &self.field;
        let stats = &mut self.stats;
        let rng = &mut self.rng;

        for agent in self.population.iter_mut() {
            let (x, y, heading) = (agent.x, agent.y, agent.heading);
            let sample = |theta: f64| {
                let (sin_t, cos_t) = theta.sin_cos();
                field.get(x + sensor_distance * cos_t, y + sensor_distance * sin_t)
            };
            let left = sample(heading + sensor_angle);
            let middle = sample(heading);
            let right = sample(heading - sensor_angle);

            let decision = if middle > left && middle > right {
                Decision::Straight
            } else if left > right {
                agent.heading += turn_step(turning_speed, random_turning, rng);
                Decision::Left
            } else if right > left {
                agent.heading -= turn_step(turning_speed, random_turning, rng);
                Decision::Right
            } else {
                // No winner among equals: perturb with a random sign at full
                // turning speed.
                if rng.random::<bool>() {
                    agent.heading += turning_speed;
                } else {
                    agent.heading -= turning_speed;
                }
                Decision::Indecisive
            };
            agent.last_decision = decision;
            stats.record(decision);
        }
    }
}

fn turn_step(turning_speed: f64, random_turning: bool, rng: &mut ChaCha12Rng) -> f64 {
    if random_turning {
        turning_speed * rng.random_range(0.5..=1.0)
    } else {
        turning_speed
    }
}
