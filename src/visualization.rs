use std::path::Path;
use std::time::Instant;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use rayon::prelude::*;

use crate::conditions::{DisplayConfig, SNAPSHOT_PATH, TIMING_WINDOW, WINDOW_TITLE};
use crate::emitters::Emitter;
use crate::error::RenderError;
use crate::fluid::FluidSolver;
use crate::grid::{Channel, ix};
use crate::snapshot::save_png;

// Mouse interaction parameters
const MOUSE_FORCE: f32 = 50.0; // Force per cell of drag
const MOUSE_DYE: f32 = 100.0;

// Map a density triple to 8 bit channels
#[inline]
pub fn density_to_rgb(density: [f32; 3], gain: f32) -> [u8; 3] {
    density.map(|d| (255.0 * d * gain).clamp(0.0, 255.0) as u8)
}

#[inline]
pub fn pack_rgb([r, g, b]: [u8; 3]) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

pub fn cell_rgb(solver: &FluidSolver, i: usize, j: usize, gain: f32) -> [u8; 3] {
    let idx = ix(i, j, solver.n());
    density_to_rgb(Channel::ALL.map(|c| solver.density(c)[idx]), gain)
}

/// Fill `buffer` with one `scale`×`scale` block per cell, boundary ring included.
/// The buffer must hold ((n + 2) * scale)² pixels.
pub fn shade(solver: &FluidSolver, gain: f32, scale: usize, buffer: &mut [u32]) {
    let n = solver.n();
    let width = (n + 2) * scale;
    let (red, green, blue) = (
        solver.density(Channel::Red),
        solver.density(Channel::Green),
        solver.density(Channel::Blue),
    );

    buffer
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let j = y / scale;
            for (x, pixel) in row.iter_mut().enumerate() {
                let idx = ix(x / scale, j, n);
                *pixel = pack_rgb(density_to_rgb([red[idx], green[idx], blue[idx]], gain));
            }
        });
}

// Pixel position to grid cell, None outside the grid
pub fn mouse_to_cell(pos: (f32, f32), scale: usize, n: usize) -> Option<(usize, usize)> {
    let (x, y) = pos;
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let i = x as usize / scale;
    let j = y as usize / scale;
    (i <= n + 1 && j <= n + 1).then_some((i, j))
}

// Left drag pushes the fluid along the drag and drops white dye
fn apply_mouse(
    window: &Window,
    solver: &mut FluidSolver,
    scale: usize,
    last: Option<(f32, f32)>,
) -> Option<(f32, f32)> {
    let pos = window.get_mouse_pos(MouseMode::Discard)?;
    if !window.get_mouse_down(MouseButton::Left) {
        return Some(pos);
    }
    if let Some((i, j)) = mouse_to_cell(pos, scale, solver.n()) {
        let (dx, dy) = last.map_or((0.0, 0.0), |(lx, ly)| (pos.0 - lx, pos.1 - ly));
        let cells = scale as f32;
        solver.add_velocity(i, j, MOUSE_FORCE * dx / cells, MOUSE_FORCE * dy / cells);
        solver.add_dye(i, j, [MOUSE_DYE; 3]);
    }
    Some(pos)
}

// Launch the simulation window and drive the solver once per frame
pub fn run_simulation(
    solver: &mut FluidSolver,
    display: &DisplayConfig,
    emitters: &[Emitter],
) -> Result<(), RenderError> {
    let scale = display.scale.max(1);
    let width = (solver.n() + 2) * scale;
    let height = width;
    let mut buffer: Vec<u32> = vec![0; width * height];

    let mut window = Window::new(WINDOW_TITLE, width, height, WindowOptions::default())?;
    window.set_target_fps(display.target_fps);
    log::info!("window {width}x{height}, {} emitters", emitters.len());

    let mut last_mouse = None;
    let mut step: u64 = 0;
    let mut timer = Instant::now();

    while window.is_open() && !window.is_key_down(Key::Escape) {
        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            solver.reset();
        }

        solver.clear_sources();
        for emitter in emitters {
            emitter.apply(solver);
        }
        last_mouse = apply_mouse(&window, solver, scale, last_mouse);

        solver.step();

        shade(solver, display.density_gain, scale, &mut buffer);
        window.update_with_buffer(&buffer, width, height)?;

        if window.is_key_pressed(Key::S, KeyRepeat::No) {
            let path = Path::new(SNAPSHOT_PATH);
            match save_png(solver, path, display.density_gain, scale) {
                Ok(()) => log::info!("snapshot written to {}", path.display()),
                Err(e) => log::warn!("{e}"),
            }
        }

        step += 1;
        if step % TIMING_WINDOW == 0 {
            log::info!(
                "step {step}: {TIMING_WINDOW} frames in {:?}, max divergence {:.3e}",
                timer.elapsed(),
                solver.max_divergence()
            );
            timer = Instant::now();
        }
    }

    log::info!("window closed after {step} steps");
    Ok(())
}
