//! Semi-Lagrangian "stable fluids" solver on a square grid.
//!
//! [`fluid::FluidSolver`] owns a 2D velocity field and three dye channels and
//! advances them one timestep at a time. The rest of the crate is the desktop
//! driver around it: configuration, random emitters, a `minifb` window and
//! PNG snapshots.

pub mod boundary;
pub mod conditions;
pub mod emitters;
pub mod error;
pub mod fluid;
pub mod grid;
pub mod pressure_computation;
pub mod snapshot;
pub mod solver;
pub mod visualization;

pub use boundary::BoundaryKind;
pub use conditions::{Config, SimulationConfig};
pub use error::{ConfigError, FluidError, RenderError};
pub use fluid::FluidSolver;
pub use grid::Channel;
