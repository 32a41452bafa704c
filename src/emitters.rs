use rand::Rng;

use crate::conditions::EmitterConfig;
use crate::fluid::FluidSolver;

// Saturated colours emitters pick from, before jitter
const PALETTE: [[f32; 3]; 6] = [
    [1.0, 0.1, 0.1],
    [0.1, 1.0, 0.1],
    [0.1, 0.2, 1.0],
    [1.0, 0.8, 0.1],
    [0.9, 0.1, 0.9],
    [0.1, 0.9, 0.9],
];

/// A fixed cell that injects dye and a force every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Emitter {
    pub i: usize,
    pub j: usize,
    pub dye: [f32; 3],
    pub force: (f32, f32),
}

impl Emitter {
    pub fn apply(&self, solver: &mut FluidSolver) {
        solver.add_dye(self.i, self.j, self.dye);
        solver.add_velocity(self.i, self.j, self.force.0, self.force.1);
    }
}

/// Place `config.count` emitters at random interior cells, keeping
/// `config.margin` cells away from the walls where the grid allows it.
pub fn place_random_emitters<R: Rng>(
    config: &EmitterConfig,
    n: usize,
    rng: &mut R,
) -> Vec<Emitter> {
    // Setup limits for placement
    let margin = config.margin.min(n.saturating_sub(1) / 2);
    let min_pos = 1 + margin;
    let max_pos = n - margin;

    (0..config.count)
        .map(|_| {
            let i = rng.random_range(min_pos..=max_pos);
            let j = rng.random_range(min_pos..=max_pos);

            let base = PALETTE[rng.random_range(0..PALETTE.len())];
            let dye = base.map(|c| config.strength * (c * rng.random_range(0.8..=1.0)));

            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let force = (config.force * angle.cos(), config.force * angle.sin());

            Emitter { i, j, dye, force }
        })
        .collect()
}
