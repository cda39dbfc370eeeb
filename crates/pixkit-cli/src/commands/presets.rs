//! Presets command - prints the preset table.

use crate::PresetsArgs;
use anyhow::Result;
use pixkit_ops::FilterPreset;

use super::Context;

pub fn run(args: PresetsArgs, ctx: &Context) -> Result<()> {
    let presets: Vec<FilterPreset> = match args.name {
        Some(p) => vec![p],
        None => FilterPreset::ALL.into_iter().filter(|p| !p.is_none()).collect(),
    };

    if ctx.verbose == 0 && args.name.is_none() {
        for p in presets {
            println!("{}", p);
        }
        return Ok(());
    }

    println!(
        "{:<12} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "name", "bright", "contr", "satur", "temp", "tint", "high", "shadow", "vign"
    );
    for p in presets {
        println!("{}", format_row(p));
    }
    Ok(())
}

fn format_row(preset: FilterPreset) -> String {
    let v = preset.values();
    format!(
        "{:<12} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
        preset.name(),
        v.brightness,
        v.contrast,
        v.saturation,
        v.temperature,
        v.tint,
        v.highlights,
        v.shadows,
        v.vignette
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::CTX;

    #[test]
    fn test_row_has_name_and_values() {
        let row = format_row(FilterPreset::CyanOrange);
        assert!(row.starts_with("cyan-orange"));
        assert_eq!(row.split_whitespace().count(), 9);
    }

    #[test]
    fn test_run() {
        run(PresetsArgs { name: None }, &CTX).unwrap();
        run(PresetsArgs { name: Some(FilterPreset::Noir) }, &CTX).unwrap();
    }
}
