use approx::assert_relative_eq;

use stable_fluids::grid::{interior, ix};
use stable_fluids::pressure_computation::divergence_at;
use stable_fluids::{Channel, FluidSolver, SimulationConfig};

fn l2_divergence(s: &FluidSolver) -> f32 {
    let n = s.n();
    interior(n)
        .map(|(i, j)| divergence_at(s.u(), s.v(), i, j, n).powi(2))
        .sum::<f32>()
        .sqrt()
}

#[test]
fn impulse_divergence_is_projected_away() {
    let mut s = FluidSolver::new(SimulationConfig::new(4, 0.1, 0.0, 0.0)).unwrap();
    s.add_velocity(2, 2, 1.0, 0.0);

    // The impulse lands as u = dt at (2, 2); its divergence is what projection must remove
    let raw_max = 0.5 * 0.1 / 4.0;
    let raw_l2 = raw_max * 2.0_f32.sqrt();

    s.vel_step();

    let n = s.n();
    for (i, j) in interior(n) {
        let div = divergence_at(s.u(), s.v(), i, j, n);
        assert!(div.is_finite());
        assert!(div.abs() < 0.5 * raw_max, "divergence {div} at ({i}, {j})");
    }
    assert!(l2_divergence(&s) < 0.5 * raw_l2);
    assert!(s.u()[ix(2, 2, n)] > 0.0, "impulse direction should survive");
}

#[test]
fn dye_stays_near_its_source() {
    let mut s = FluidSolver::new(SimulationConfig::new(8, 0.1, 0.0001, 0.0)).unwrap();
    for c in Channel::ALL {
        s.add_density(c, 4, 4, 100.0);
    }
    s.dens_steps();

    let n = s.n();
    for c in Channel::ALL {
        let d = s.density(c);
        let center = d[ix(4, 4, n)];
        assert!(center > 9.9 && center <= 10.0, "center {center}");
        for (i, j) in [(3, 4), (5, 4), (4, 3), (4, 5)] {
            let nb = d[ix(i, j, n)];
            assert!(nb > 0.0 && nb < 0.1, "neighbour ({i}, {j}) = {nb}");
        }
        for (i, j) in interior(n) {
            if i.abs_diff(4) + j.abs_diff(4) >= 3 {
                assert!(d[ix(i, j, n)] < 1e-4, "({i}, {j}) = {}", d[ix(i, j, n)]);
            }
        }
        assert_relative_eq!(s.total_density(c), 10.0, epsilon = 1e-3);
    }
}

#[test]
fn long_run_stays_finite() {
    let mut s = FluidSolver::new(SimulationConfig::new(24, 0.1, 0.0001, 0.0001)).unwrap();
    for frame in 0..60 {
        s.clear_sources();
        s.add_velocity(12, 6, 0.0, 40.0);
        s.add_velocity(6 + frame % 12, 18, 25.0, -10.0);
        s.add_dye(12, 6, [100.0, 20.0, 0.0]);
        s.step();
    }
    assert!(s.u().iter().chain(s.v()).all(|x| x.is_finite()));
    for c in Channel::ALL {
        assert!(s.density(c).iter().all(|x| x.is_finite() && *x >= -1e-3));
    }
}
