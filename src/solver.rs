use crate::boundary::{BoundaryKind, set_bnd};
use crate::conditions::SimulationConfig;
use crate::grid::{for_each_cell, ix};

// Adds dt * source to every cell, boundary ring included
pub fn add_source(x: &mut [f32], source: &[f32], dt: f32) {
    for (cell, &s) in x.iter_mut().zip(source) {
        *cell += dt * s;
    }
}

/// Exchanges the contents of `x0` and `x` through the scratch buffer `tmp`.
pub fn swap(tmp: &mut [f32], x0: &mut [f32], x: &mut [f32]) {
    tmp.copy_from_slice(x0);
    x0.copy_from_slice(x);
    x.copy_from_slice(tmp);
}

/// Gauss-Seidel relaxation of `x * c = x0 + a * (sum of the 4 neighbours)`.
///
/// Runs exactly `iterations` sweeps, updating `x` in place and re-applying the
/// boundary rule after each one. There is no convergence test: the frame cost
/// stays fixed and the result is only an approximation.
pub fn lin_solve(
    kind: BoundaryKind,
    x: &mut [f32],
    x0: &[f32],
    a: f32,
    c: f32,
    iterations: usize,
    n: usize,
) {
    let c_inv = 1.0 / c;
    for _ in 0..iterations {
        for_each_cell(n, |i, j| {
            let neighbors =
                x[ix(i - 1, j, n)] + x[ix(i + 1, j, n)] + x[ix(i, j - 1, n)] + x[ix(i, j + 1, n)];
            x[ix(i, j, n)] = (x0[ix(i, j, n)] + a * neighbors) * c_inv;
        });
        set_bnd(kind, x, n);
    }
}

/// Implicit (backward Euler) diffusion of `x0` into `x` at the given rate.
/// a = dt * rate * N², c = 1 + 4a
pub fn diffuse(kind: BoundaryKind, x: &mut [f32], x0: &[f32], rate: f32, config: &SimulationConfig) {
    let n = config.n;
    let a = config.dt * rate * (n * n) as f32;
    lin_solve(kind, x, x0, a, 1.0 + 4.0 * a, config.iterations, n);
}

/// Semi-Lagrangian advection: every interior cell of `d` takes the value of `d0`
/// bilinearly sampled where the velocity field says its fluid came from.
pub fn advect(
    kind: BoundaryKind,
    d: &mut [f32],
    d0: &[f32],
    u: &[f32],
    v: &[f32],
    config: &SimulationConfig,
) {
    let n = config.n;
    let dt0 = config.dt * n as f32;
    let hi = n as f32 + 0.5;

    for_each_cell(n, |i, j| {
        let idx = ix(i, j, n);

        // Backtracking: where did the fluid particle come from
        let x = (i as f32 - dt0 * u[idx]).clamp(0.5, hi);
        let y = (j as f32 - dt0 * v[idx]).clamp(0.5, hi);

        let i0 = x.floor() as usize;
        let i1 = i0 + 1;
        let j0 = y.floor() as usize;
        let j1 = j0 + 1;

        let s1 = x - i0 as f32;
        let s0 = 1.0 - s1;
        let t1 = y - j0 as f32;
        let t0 = 1.0 - t1;

        d[idx] = s0 * (t0 * d0[ix(i0, j0, n)] + t1 * d0[ix(i0, j1, n)])
            + s1 * (t0 * d0[ix(i1, j0, n)] + t1 * d0[ix(i1, j1, n)]);
    });
    set_bnd(kind, d, n);
}
