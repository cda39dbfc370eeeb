//! Tone command - full adjustment chain, optionally seeded from YAML.

use crate::ToneArgs;
use anyhow::{Context as _, Result};
use pixkit_ops::{ResizeSpec, ToneParameters, apply_tone};
use std::path::Path;
use tracing::{debug, info, trace};

use super::Context;

pub fn run(args: ToneArgs, ctx: &Context) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "tone::run");

    let base = match &args.params {
        Some(path) => load_params(path)?,
        None => ToneParameters::default(),
    };
    let params = merge_flags(base, &args)?;
    debug!(?params, "tone parameters");

    let image = super::load_image(&args.input, ctx)?;
    let result = apply_tone(&image, &params)
        .with_context(|| format!("Tone adjustment failed for {}", args.input.display()))?;
    super::save_image(&args.output, &result)?;

    info!(
        width = result.width(),
        height = result.height(),
        preset = %params.filter,
        "tone complete"
    );
    if ctx.verbose > 0 {
        println!(
            "Adjusted {} -> {} ({}x{})",
            args.input.display(),
            args.output.display(),
            result.width(),
            result.height()
        );
    }
    Ok(())
}

/// Reads a YAML parameter file; missing keys keep their defaults.
pub fn load_params(path: &Path) -> Result<ToneParameters> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read params: {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("Invalid params file: {}", path.display()))
}

/// Overlays explicitly given flags on `base`.
fn merge_flags(mut p: ToneParameters, args: &ToneArgs) -> Result<ToneParameters> {
    let sliders = [
        (&mut p.brightness, args.brightness),
        (&mut p.contrast, args.contrast),
        (&mut p.saturation, args.saturation),
        (&mut p.highlights, args.highlights),
        (&mut p.shadows, args.shadows),
        (&mut p.temperature, args.temperature),
        (&mut p.sharpness, args.sharpness),
        (&mut p.vignette, args.vignette),
        (&mut p.rotation, args.rotate),
    ];
    for (field, flag) in sliders {
        if let Some(v) = flag {
            *field = v;
        }
    }
    if let Some(preset) = args.preset {
        p.filter = preset;
    }
    p.flip_horizontal |= args.flip_h;
    p.flip_vertical |= args.flip_v;

    if let Some(size) = &args.resize {
        let (w, h) = super::parse_size(size)?;
        let spec = if args.keep_aspect { ResizeSpec::fit(w, h) } else { ResizeSpec::exact(w, h) };
        p.resize = Some(match args.filter {
            Some(f) => spec.with_filter(f),
            None => spec,
        });
    }
    if args.crop.is_some() {
        p.crop = args.crop;
    }
    Ok(p)
}
