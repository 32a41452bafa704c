use std::fmt::Display;
use std::path::Path;

use plotters::prelude::*;

use crate::error::RenderError;
use crate::fluid::FluidSolver;
use crate::visualization::cell_rgb;

fn snapshot_error(path: &Path, e: impl Display) -> RenderError {
    RenderError::Snapshot {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Write the current dye image to a PNG, one `scale`×`scale` square per cell.
pub fn save_png(solver: &FluidSolver, path: &Path, gain: f32, scale: usize) -> Result<(), RenderError> {
    let n = solver.n();
    let scale = scale.max(1);
    let side = ((n + 2) * scale) as u32;

    let root = BitMapBackend::new(path, (side, side)).into_drawing_area();
    root.fill(&BLACK).map_err(|e| snapshot_error(path, e))?;

    for j in 0..=n + 1 {
        for i in 0..=n + 1 {
            let [r, g, b] = cell_rgb(solver, i, j, gain);
            if r == 0 && g == 0 && b == 0 {
                continue;
            }
            let x0 = (i * scale) as i32;
            let y0 = (j * scale) as i32;
            let x1 = x0 + scale as i32 - 1;
            let y1 = y0 + scale as i32 - 1;
            root.draw(&Rectangle::new([(x0, y0), (x1, y1)], RGBColor(r, g, b).filled()))
                .map_err(|e| snapshot_error(path, e))?;
        }
    }

    root.present().map_err(|e| snapshot_error(path, e))?;
    log::debug!("saved {side}x{side} snapshot to {}", path.display());
    Ok(())
}
