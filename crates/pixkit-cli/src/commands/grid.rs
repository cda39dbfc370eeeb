//! Grid command - writes one file per cell, plus an optional sheet.

use crate::GridArgs;
use anyhow::{Context as _, Result};
use pixkit_ops::grid::{GridConfig, assemble_grid, slice_grid};
use tracing::{debug, info, trace};

use super::Context;

pub fn run(args: GridArgs, ctx: &Context) -> Result<()> {
    let config = GridConfig {
        grid_size: args.size,
        padding: args.padding,
        gap: args.gap,
        background: args.bg,
    }
    .clamped();
    trace!(input = %args.input.display(), ?config, "grid::run");

    let image = super::load_image(&args.input, ctx)?;
    let cells = slice_grid(&image, &config)
        .with_context(|| format!("Cannot slice {}", args.input.display()))?;

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let n = config.grid_size as usize;
    for (i, cell) in cells.iter().enumerate() {
        let path = args.output.join(format!("cell_{}_{}.png", i / n, i % n));
        debug!(path = %path.display(), "writing cell");
        super::save_image(&path, cell)?;
    }

    if let Some(sheet_path) = &args.sheet {
        let sheet = assemble_grid(&cells, config.grid_size, config.gap, config.background)?;
        super::save_image(sheet_path, &sheet)?;
    }

    info!(cells = cells.len(), "grid complete");
    if ctx.verbose > 0 {
        println!("Wrote {} cells to {}", cells.len(), args.output.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{load_image, tests::{CTX, write_split}};
    use pixkit_core::Rgb;

    #[test]
    fn test_run_writes_cells_and_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_split(dir.path(), "in.png", 8, 6);
        let out_dir = dir.path().join("cells");
        let sheet = dir.path().join("sheet.png");
        run(
            GridArgs {
                input,
                output: out_dir.clone(),
                size: 2,
                padding: 1,
                gap: 2,
                bg: Rgb::new(255, 0, 0),
                sheet: Some(sheet.clone()),
            },
            &CTX,
        )
        .unwrap();

        for name in ["cell_0_0.png", "cell_0_1.png", "cell_1_0.png", "cell_1_1.png"] {
            let cell = load_image(&out_dir.join(name), &CTX).unwrap();
            assert_eq!(cell.dimensions(), (5, 5));
            assert_eq!(cell.pixel(0, 0), [255, 0, 0, 255]);
        }
        // square is 6 wide at x = 1, so cell (0,0) is black and (0,1) white
        assert_eq!(load_image(&out_dir.join("cell_0_0.png"), &CTX).unwrap().pixel(2, 2), [0, 0, 0, 255]);
        assert_eq!(
            load_image(&out_dir.join("cell_0_1.png"), &CTX).unwrap().pixel(2, 2),
            [255, 255, 255, 255]
        );
        assert_eq!(load_image(&sheet, &CTX).unwrap().dimensions(), (12, 12));
    }

    #[test]
    fn test_run_too_small() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_split(dir.path(), "in.png", 2, 2);
        let result = run(
            GridArgs {
                input,
                output: dir.path().join("cells"),
                size: 3,
                padding: 0,
                gap: 0,
                bg: Rgb::WHITE,
                sheet: None,
            },
            &CTX,
        );
        assert!(result.is_err());
    }
}
