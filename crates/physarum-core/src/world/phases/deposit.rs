use super::super::World;

impl World {
    /// Accumulate each agent's deposit at its rounded cell. Cells within one
    /// cell of a border are skipped so the diffusion stencil's neighborhood
    /// is always in bounds without edge special-casing.
    pub(in crate::world) fn step_deposit_phase(&mut self) {
        let amount = self.config.deposit_amount;
        let max_x = self.config.width as isize - 2;
        let max_y = self.config.height as isize - 2;

        for agent in self.population.iter() {
            let cx = agent.x.round() as isize;
            let cy = agent.y.round() as isize;
            if cx >= 1 && cx <= max_x && cy >= 1 && cy <= max_y {
                self.field.accumulate(cx as usize, cy as usize, amount);
            }
        }
    }
}
