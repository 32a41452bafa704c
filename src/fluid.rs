use crate::boundary::BoundaryKind;
use crate::conditions::SimulationConfig;
use crate::error::ConfigError;
use crate::grid::{Channel, DensityChannel, Grid, interior, ix};
use crate::pressure_computation::{max_divergence, project};
use crate::solver::{add_source, advect, diffuse, swap};

/// Stable-fluids solver owning the velocity field and three dye channels.
///
/// Forces go into the velocity source buffers and dye into the density source
/// buffers (see [`FluidSolver::add_velocity`], [`FluidSolver::add_dye`]); each
/// frame then calls [`FluidSolver::vel_step`] followed by
/// [`FluidSolver::dens_steps`]. Steps reuse the source buffers as workspace, so
/// they must be cleared and refilled before the next frame.
#[derive(Clone, Debug)]
pub struct FluidSolver {
    config: SimulationConfig,
    grid: Grid,
}

impl FluidSolver {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(&config);
        log::info!(
            "fluid solver: {n}x{n} interior, {} cells, dt={}, diff={}, visc={}, {} sweeps",
            config.size(),
            config.dt,
            config.diff,
            config.visc,
            config.iterations,
            n = config.n,
        );
        Ok(Self { config, grid })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn n(&self) -> usize {
        self.config.n
    }

    pub fn u(&self) -> &[f32] {
        &self.grid.u
    }

    pub fn v(&self) -> &[f32] {
        &self.grid.v
    }

    pub fn density(&self, channel: Channel) -> &[f32] {
        &self.grid.channel(channel).dens
    }

    // Accumulate a force at cell (i, j), applied by the next vel_step
    pub fn add_velocity(&mut self, i: usize, j: usize, fx: f32, fy: f32) {
        match self.grid.try_index(i, j) {
            Some(idx) => {
                self.grid.u_prev[idx] += fx;
                self.grid.v_prev[idx] += fy;
            }
            None => log::debug!("ignoring force outside the interior at ({i}, {j})"),
        }
    }

    // Accumulate a dye source at cell (i, j), applied by the next dens_steps
    pub fn add_density(&mut self, channel: Channel, i: usize, j: usize, amount: f32) {
        match self.grid.try_index(i, j) {
            Some(idx) => self.grid.channel_mut(channel).prev[idx] += amount,
            None => log::debug!("ignoring {channel:?} source outside the interior at ({i}, {j})"),
        }
    }

    pub fn add_dye(&mut self, i: usize, j: usize, rgb: [f32; 3]) {
        for (channel, amount) in Channel::ALL.into_iter().zip(rgb) {
            if amount != 0.0 {
                self.add_density(channel, i, j, amount);
            }
        }
    }

    pub fn clear_sources(&mut self) {
        self.grid.clear_sources();
    }

    pub fn reset(&mut self) {
        self.grid.clear();
        log::debug!("fluid state reset");
    }

    /// Advances the velocity field by one timestep.
    ///
    /// Forces must already be accumulated in the velocity source buffers.
    pub fn vel_step(&mut self) {
        let config = &self.config;
        let Grid {
            u,
            v,
            u_prev,
            v_prev,
            tmp,
            ..
        } = &mut self.grid;

        add_source(u, u_prev, config.dt);
        add_source(v, v_prev, config.dt);

        swap(tmp, u_prev, u);
        diffuse(BoundaryKind::HorizontalVelocity, u, u_prev, config.visc, config);
        swap(tmp, v_prev, v);
        diffuse(BoundaryKind::VerticalVelocity, v, v_prev, config.visc, config);
        project(u, v, u_prev, v_prev, config);

        swap(tmp, u_prev, u);
        swap(tmp, v_prev, v);
        // Self-advection: the pre-advection velocity moves itself
        advect(BoundaryKind::HorizontalVelocity, u, u_prev, u_prev, v_prev, config);
        advect(BoundaryKind::VerticalVelocity, v, v_prev, u_prev, v_prev, config);
        project(u, v, u_prev, v_prev, config);

        log::trace!("vel_step done, max divergence {}", max_divergence(u, v, config.n));
    }

    /// Advances the red, green and blue density channels by one timestep using
    /// the current velocity field.
    pub fn dens_steps(&mut self) {
        let config = &self.config;
        let Grid {
            u,
            v,
            channels,
            tmp,
            ..
        } = &mut self.grid;

        for channel in channels.iter_mut() {
            dens_step(channel, u, v, tmp, config);
        }
        log::trace!("dens_steps done");
    }

    pub fn step(&mut self) {
        self.vel_step();
        self.dens_steps();
    }

    // Sum of one density channel over the interior
    pub fn total_density(&self, channel: Channel) -> f32 {
        let n = self.config.n;
        let dens = &self.grid.channel(channel).dens;
        interior(n).map(|(i, j)| dens[ix(i, j, n)]).sum()
    }

    pub fn max_divergence(&self) -> f32 {
        max_divergence(&self.grid.u, &self.grid.v, self.config.n)
    }
}

// Source, diffuse, advect, with the swaps keeping the latest result in `dens`
fn dens_step(
    channel: &mut DensityChannel,
    u: &[f32],
    v: &[f32],
    tmp: &mut [f32],
    config: &SimulationConfig,
) {
    let DensityChannel { dens, prev } = channel;
    add_source(dens, prev, config.dt);
    swap(tmp, prev, dens);
    diffuse(BoundaryKind::Scalar, dens, prev, config.diff, config);
    swap(tmp, prev, dens);
    advect(BoundaryKind::Scalar, dens, prev, u, v, config);
}
