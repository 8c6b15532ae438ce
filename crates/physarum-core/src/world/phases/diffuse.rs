use super::super::World;

impl World {
    /// Double-buffered 3x3 diffusion of the whole interior followed by decay,
    /// clamped to the field's upper bound.
    pub(in crate::world) fn step_diffuse_phase(&mut self) {
        self.field.diffuse_and_decay(self.config.decay_factor);
    }
}
