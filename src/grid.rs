use crate::conditions::SimulationConfig;

/// Row-major linear index of cell (i, j) on a grid of interior resolution `n`.
/// `i` runs along x (columns), `j` along y (rows); both span `0..=n + 1`.
#[inline]
pub fn ix(i: usize, j: usize, n: usize) -> usize {
    i + (n + 2) * j
}

/// Calls `f(i, j)` once for every interior cell, rows outermost.
#[inline]
pub fn for_each_cell(n: usize, mut f: impl FnMut(usize, usize)) {
    for j in 1..=n {
        for i in 1..=n {
            f(i, j);
        }
    }
}

/// Interior cells in the same order as [`for_each_cell`].
pub fn interior(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (1..=n).flat_map(move |j| (1..=n).map(move |i| (i, j)))
}

// Check if the coordinates (i, j) are within the interior
#[inline]
pub fn in_bounds(i: usize, j: usize, n: usize) -> bool {
    i >= 1 && i <= n && j >= 1 && j <= n
}

/// The three independent dye channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    #[inline]
    pub(crate) fn slot(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// A density field together with its source/workspace buffer.
#[derive(Clone, Debug)]
pub struct DensityChannel {
    pub(crate) dens: Vec<f32>,
    pub(crate) prev: Vec<f32>,
}

impl DensityChannel {
    fn new(size: usize) -> Self {
        Self {
            dens: vec![0.0; size],
            prev: vec![0.0; size],
        }
    }
}

/// Every buffer the solver works on, all of length (n + 2)².
#[derive(Clone, Debug)]
pub struct Grid {
    pub(crate) n: usize,
    pub(crate) u: Vec<f32>,
    pub(crate) v: Vec<f32>,
    pub(crate) u_prev: Vec<f32>,
    pub(crate) v_prev: Vec<f32>,
    pub(crate) channels: [DensityChannel; 3],
    pub(crate) tmp: Vec<f32>,
}

impl Grid {
    // Create a zeroed grid sized from the config
    pub fn new(config: &SimulationConfig) -> Self {
        let size = config.size();
        Self {
            n: config.n,
            u: vec![0.0; size],
            v: vec![0.0; size],
            u_prev: vec![0.0; size],
            v_prev: vec![0.0; size],
            channels: [
                DensityChannel::new(size),
                DensityChannel::new(size),
                DensityChannel::new(size),
            ],
            tmp: vec![0.0; size],
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        self.tmp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tmp.is_empty()
    }

    // Return Some(idx) if (i, j) is an interior cell, otherwise None
    pub fn try_index(&self, i: usize, j: usize) -> Option<usize> {
        in_bounds(i, j, self.n).then(|| ix(i, j, self.n))
    }

    pub(crate) fn channel(&self, channel: Channel) -> &DensityChannel {
        &self.channels[channel.slot()]
    }

    pub(crate) fn channel_mut(&mut self, channel: Channel) -> &mut DensityChannel {
        &mut self.channels[channel.slot()]
    }

    pub fn clear_sources(&mut self) {
        self.u_prev.fill(0.0);
        self.v_prev.fill(0.0);
        for channel in &mut self.channels {
            channel.prev.fill(0.0);
        }
    }

    pub fn clear(&mut self) {
        self.clear_sources();
        self.u.fill(0.0);
        self.v.fill(0.0);
        self.tmp.fill(0.0);
        for channel in &mut self.channels {
            channel.dens.fill(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ix_covers_buffer_exactly_once() {
        let n = 5;
        let mut seen = vec![false; (n + 2) * (n + 2)];
        for j in 0..=n + 1 {
            for i in 0..=n + 1 {
                let idx = ix(i, j, n);
                assert!(!seen[idx], "index {idx} visited twice");
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_for_each_cell_visits_interior_in_order() {
        let n = 3;
        let mut visited = Vec::new();
        for_each_cell(n, |i, j| visited.push((i, j)));
        assert_eq!(visited.len(), n * n);
        assert_eq!(visited.first(), Some(&(1, 1)));
        assert_eq!(visited[1], (2, 1));
        assert_eq!(visited.last(), Some(&(3, 3)));
        assert_eq!(visited, interior(n).collect::<Vec<_>>());
    }

    #[test]
    fn test_new_grid_is_zeroed_and_sized() {
        let cfg = SimulationConfig::new(6, 0.1, 0.0, 0.0);
        let grid = Grid::new(&cfg);
        assert_eq!(grid.len(), 64);
        for buf in [&grid.u, &grid.v, &grid.u_prev, &grid.v_prev, &grid.tmp] {
            assert_eq!(buf.len(), 64);
            assert!(buf.iter().all(|&x| x == 0.0));
        }
        for c in Channel::ALL {
            assert_eq!(grid.channel(c).dens.len(), 64);
            assert_eq!(grid.channel(c).prev.len(), 64);
        }
    }

    #[test]
    fn test_try_index_rejects_boundary_ring() {
        let grid = Grid::new(&SimulationConfig::new(4, 0.1, 0.0, 0.0));
        assert_eq!(grid.try_index(1, 1), Some(ix(1, 1, 4)));
        assert_eq!(grid.try_index(4, 4), Some(ix(4, 4, 4)));
        assert_eq!(grid.try_index(0, 2), None);
        assert_eq!(grid.try_index(2, 5), None);
    }
}
