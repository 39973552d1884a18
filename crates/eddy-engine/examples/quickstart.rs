//! Headless smoke plume.
//!
//! Injects density and an upward push near the bottom of a 48×48 grid for
//! a while, lets it rise, and prints the density field as ASCII shades.
//!
//! ```text
//! RUST_LOG=eddy_engine=debug cargo run -p eddy-engine --example quickstart
//! ```

use eddy_engine::{ConfigError, FluidGrid};

const RESOLUTION: u32 = 48;
const SHADES: &[u8] = b" .:-=+*#%@";

fn render(grid: &FluidGrid) -> String {
    let n = RESOLUTION as usize;
    let peak = grid.density().iter().fold(0.0f32, |m, &v| m.max(v));
    let mut out = String::with_capacity((n + 1) * n);
    for j in 0..n {
        for i in 0..n {
            let d = grid.sample_density(i as f32 + 0.5, j as f32 + 0.5);
            let level = if peak > 0.0 { d / peak } else { 0.0 };
            let idx = ((level * (SHADES.len() - 1) as f32).round() as usize).min(SHADES.len() - 1);
            out.push(SHADES[idx] as char);
        }
        out.push('\n');
    }
    out
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let mut grid = FluidGrid::new(RESOLUTION, 0.00005, 0.0001, 0.1)?;
    let cx = RESOLUTION as f32 / 2.0;
    let base = RESOLUTION as f32 - 4.0;

    for step in 0..120 {
        if step < 60 {
            grid.add_density(cx, base, 60.0);
            grid.add_velocity(cx, base, 0.0, -8.0);
            grid.add_velocity(cx - 1.0, base, 0.0, -6.0);
            grid.add_velocity(cx + 1.0, base, 0.0, -6.0);
        }
        grid.step();
    }

    print!("{}", render(&grid));
    let m = grid.last_metrics();
    println!(
        "{} steps, last step {}us, {} KiB of field buffers",
        grid.step_count(),
        m.total_us,
        m.memory_bytes / 1024
    );
    for (stage, us) in &m.stage_us {
        println!("  {stage:<20} {us:>6}us");
    }
    grid.destroy();
    Ok(())
}
