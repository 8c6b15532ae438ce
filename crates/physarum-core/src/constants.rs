/// Largest supported field dimension (cells). Keeps the flat buffer and the
/// full-field diffusion pass bounded.
pub const MAX_FIELD_DIM: usize = 4096;

/// Maximum population cardinality.
pub const MAX_AGENTS: usize = 250_000;

/// Prime multiplier used to derive per-generation RNG streams from a base seed.
/// Chosen so streams for consecutive generations have minimal overlap.
pub const RNG_DERIVATION_PRIME: u64 = 7919;

/// Center weight of the 3x3 diffusion kernel.
pub const KERNEL_CENTER_WEIGHT: f32 = 0.25;
/// Weight of each of the four edge-adjacent cells. The nine weights sum to 1.
pub const KERNEL_EDGE_WEIGHT: f32 = 0.125;
/// Weight of each of the four diagonal cells.
pub const KERNEL_CORNER_WEIGHT: f32 = 0.0625;

/// Ring radius for the circle start layout, as a fraction of the shorter
/// field side.
pub const CIRCLE_RADIUS_FRACTION: f64 = 0.2;
