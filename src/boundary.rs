use crate::grid::ix;

/// Which reflection rule applies to a field at the walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryKind {
    /// Densities, pressure, divergence: copied unchanged.
    Scalar,
    /// Negated at the left and right walls.
    HorizontalVelocity,
    /// Negated at the top and bottom walls.
    VerticalVelocity,
}

impl BoundaryKind {
    #[inline]
    fn x_wall_sign(self) -> f32 {
        match self {
            BoundaryKind::HorizontalVelocity => -1.0,
            BoundaryKind::Scalar | BoundaryKind::VerticalVelocity => 1.0,
        }
    }

    #[inline]
    fn y_wall_sign(self) -> f32 {
        match self {
            BoundaryKind::VerticalVelocity => -1.0,
            BoundaryKind::Scalar | BoundaryKind::HorizontalVelocity => 1.0,
        }
    }
}

/// Overwrites the boundary ring of `x` from the adjacent interior cells.
/// Corners become the mean of their two edge neighbours.
pub fn set_bnd(kind: BoundaryKind, x: &mut [f32], n: usize) {
    let sx = kind.x_wall_sign();
    let sy = kind.y_wall_sign();

    for k in 1..=n {
        x[ix(0, k, n)] = sx * x[ix(1, k, n)];
        x[ix(n + 1, k, n)] = sx * x[ix(n, k, n)];
        x[ix(k, 0, n)] = sy * x[ix(k, 1, n)];
        x[ix(k, n + 1, n)] = sy * x[ix(k, n, n)];
    }

    x[ix(0, 0, n)] = 0.5 * (x[ix(1, 0, n)] + x[ix(0, 1, n)]);
    x[ix(0, n + 1, n)] = 0.5 * (x[ix(1, n + 1, n)] + x[ix(0, n, n)]);
    x[ix(n + 1, 0, n)] = 0.5 * (x[ix(n, 0, n)] + x[ix(n + 1, 1, n)]);
    x[ix(n + 1, n + 1, n)] = 0.5 * (x[ix(n, n + 1, n)] + x[ix(n + 1, n, n)]);
}
