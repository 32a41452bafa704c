use crate::boundary::{BoundaryKind, set_bnd};
use crate::conditions::SimulationConfig;
use crate::grid::{for_each_cell, interior, ix};
use crate::solver::lin_solve;

/// Discrete divergence at an interior cell, in the sign convention the pressure
/// solve expects: -0.5 * (du/dx + dv/dy) / N with centred differences.
#[inline]
pub fn divergence_at(u: &[f32], v: &[f32], i: usize, j: usize, n: usize) -> f32 {
    -0.5 * (u[ix(i + 1, j, n)] - u[ix(i - 1, j, n)] + v[ix(i, j + 1, n)] - v[ix(i, j - 1, n)])
        / n as f32
}

// Fill div over the interior; the boundary ring is left as is
pub fn compute_divergence(u: &[f32], v: &[f32], div: &mut [f32], n: usize) {
    for_each_cell(n, |i, j| div[ix(i, j, n)] = divergence_at(u, v, i, j, n));
}

pub fn max_divergence(u: &[f32], v: &[f32], n: usize) -> f32 {
    interior(n)
        .map(|(i, j)| divergence_at(u, v, i, j, n).abs())
        .fold(0.0, f32::max)
}

/// Project the velocity field to remove its divergent part.
///
/// `p` and `div` are workspace buffers and are overwritten. The pressure is
/// relaxed against the divergence with the Poisson operator (a = 1, c = 4),
/// then its gradient is subtracted from (u, v).
pub fn project(u: &mut [f32], v: &mut [f32], p: &mut [f32], div: &mut [f32], config: &SimulationConfig) {
    let n = config.n;
    let nf = n as f32;

    for_each_cell(n, |i, j| {
        div[ix(i, j, n)] = divergence_at(u, v, i, j, n);
        p[ix(i, j, n)] = 0.0;
    });
    set_bnd(BoundaryKind::Scalar, div, n);
    set_bnd(BoundaryKind::Scalar, p, n);

    lin_solve(BoundaryKind::Scalar, p, div, 1.0, 4.0, config.iterations, n);

    for_each_cell(n, |i, j| {
        u[ix(i, j, n)] -= 0.5 * nf * (p[ix(i + 1, j, n)] - p[ix(i - 1, j, n)]);
        v[ix(i, j, n)] -= 0.5 * nf * (p[ix(i, j + 1, n)] - p[ix(i, j - 1, n)]);
    });
    set_bnd(BoundaryKind::HorizontalVelocity, u, n);
    set_bnd(BoundaryKind::VerticalVelocity, v, n);
}
