//! Sketch command - line art from edges.

use crate::SketchArgs;
use anyhow::{Context as _, Result};
use pixkit_ops::SketchParams;
use tracing::{info, trace};

use super::Context;

pub fn run(args: SketchArgs, ctx: &Context) -> Result<()> {
    let params = SketchParams {
        threshold: args.threshold,
        thickness: args.thickness,
        smoothing: args.smoothing,
    };
    trace!(input = %args.input.display(), ?params, "sketch::run");

    let image = super::load_image(&args.input, ctx)?;
    let result = params
        .apply(&image)
        .with_context(|| format!("Sketch extraction failed for {}", args.input.display()))?;
    super::save_image(&args.output, &result)?;

    let lit = result.pixels().filter(|(_, _, p)| p[0] == 255).count();
    info!(edge_pixels = lit, "sketch complete");
    if ctx.verbose > 0 {
        println!("Sketch: {} edge pixels -> {}", lit, args.output.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{CTX, write_split};

    #[test]
    fn test_run_finds_split_edge() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_split(dir.path(), "in.png", 16, 16);
        let output = dir.path().join("out.png");
        run(
            SketchArgs {
                input,
                output: output.clone(),
                threshold: 30.0,
                thickness: 50.0,
                smoothing: 10.0,
            },
            &CTX,
        )
        .unwrap();
        let out = crate::commands::load_image(&output, &CTX).unwrap();
        assert_eq!(out.pixel(8, 8), [255, 255, 255, 255]);
        assert_eq!(out.pixel(1, 8), [0, 0, 0, 255]);
    }
}
