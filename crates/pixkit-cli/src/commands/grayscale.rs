//! Grayscale command.

use crate::GrayscaleArgs;
use anyhow::Result;
use pixkit_ops::GrayscaleOptions;
use tracing::{info, trace};

use super::Context;

pub fn run(args: GrayscaleArgs, ctx: &Context) -> Result<()> {
    trace!(
        input = %args.input.display(),
        mode = %args.mode,
        brightness = args.brightness,
        contrast = args.contrast,
        "grayscale::run"
    );

    let options = GrayscaleOptions {
        mode: args.mode,
        brightness: args.brightness,
        contrast: args.contrast,
    };
    let image = super::load_image(&args.input, ctx)?;
    let result = options.apply(&image);
    super::save_image(&args.output, &result)?;

    info!(mode = %args.mode, "grayscale complete");
    if ctx.verbose > 0 {
        println!("Grayscale ({}) -> {}", args.mode, args.output.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{CTX, write_split};
    use pixkit_ops::GrayMode;

    #[test]
    fn test_run_writes_gray_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let buf = pixkit_core::PixelBuffer::filled(4, 4, [200, 40, 90, 255]).unwrap();
        crate::commands::save_image(&input, &buf).unwrap();
        let output = dir.path().join("out.png");

        for mode in GrayMode::ALL {
            run(
                GrayscaleArgs {
                    input: input.clone(),
                    output: output.clone(),
                    mode,
                    brightness: 100.0,
                    contrast: 100.0,
                },
                &CTX,
            )
            .unwrap();
            let out = crate::commands::load_image(&output, &CTX).unwrap();
            let p = out.pixel(1, 1);
            assert_eq!(p[0], p[1]);
            assert_eq!(p[1], p[2]);
            assert_eq!(p[3], 255);
        }
    }

    #[test]
    fn test_zero_brightness_is_black() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_split(dir.path(), "in.png", 4, 4);
        let output = dir.path().join("out.png");
        run(
            GrayscaleArgs {
                input,
                output: output.clone(),
                mode: GrayMode::Classic,
                brightness: 0.0,
                contrast: 100.0,
            },
            &CTX,
        )
        .unwrap();
        let out = crate::commands::load_image(&output, &CTX).unwrap();
        assert!(out.pixels().all(|(_, _, p)| p == [0, 0, 0, 255]));
    }
}
