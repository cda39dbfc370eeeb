//! Merge command - stacks inputs onto one canvas.

use crate::MergeArgs;
use anyhow::{Context as _, Result};
use pixkit_ops::composite::{
    AutoLayout, CompositionItem, CompositionOptions, compose, stack_layout,
};
use tracing::{debug, info, trace};

use super::Context;

pub fn run(args: MergeArgs, ctx: &Context) -> Result<()> {
    trace!(
        inputs = args.inputs.len(),
        direction = %args.direction,
        align = %args.align,
        gap = args.gap,
        "merge::run"
    );

    let images = args
        .inputs
        .iter()
        .map(|path| super::load_image(path, ctx))
        .collect::<Result<Vec<_>>>()?;

    let auto_layout = match &args.cell {
        Some(cell) => Some(AutoLayout {
            direction: args.direction,
            fixed_size: Some(super::parse_size(cell)?),
        }),
        None => None,
    };

    let sizes: Vec<_> = images.iter().map(|img| img.dimensions()).collect();
    let positions = stack_layout(&sizes, args.direction, args.align, args.gap);
    debug!(?positions, "stack layout");
    let items: Vec<CompositionItem> = images
        .into_iter()
        .zip(positions)
        .map(|(buffer, position)| CompositionItem { buffer, position })
        .collect();

    let options = CompositionOptions {
        gap: args.gap,
        padding: args.padding,
        background: args.bg,
        auto_layout,
    };
    let result = compose(&items, &options).context("Composition failed")?;
    super::save_image(&args.output, &result)?;

    info!(width = result.width(), height = result.height(), "merge complete");
    if ctx.verbose > 0 {
        println!(
            "Merged {} images -> {} ({}x{})",
            items.len(),
            args.output.display(),
            result.width(),
            result.height()
        );
    }
    Ok(())
}
