use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use tilemix::{BlendOptions, Blender, LayerInput};

/// Blend a stack of PNG/JPEG tiles into one output image.
#[derive(Parser, Debug)]
#[command(name = "tilemix", version)]
struct Cli {
    /// Layer files, bottom to top. Append `@x,y` to place a layer at an
    /// offset (e.g. `overlay.png@64,-16`).
    #[arg(required = true)]
    layers: Vec<String>,

    /// Output file.
    #[arg(long)]
    out: PathBuf,

    /// Blend options as a JSON object (same keys as the library options),
    /// e.g. '{"format":"jpeg","quality":85}'.
    #[arg(long)]
    options: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options: BlendOptions = match &cli.options {
        Some(json) => serde_json::from_str(json).context("parse --options JSON")?,
        None => BlendOptions::default(),
    };

    let mut layers = Vec::with_capacity(cli.layers.len());
    for spec in &cli.layers {
        layers.push(parse_layer(spec)?);
    }

    let blender = Blender::new(None)?;
    let output = blender.blend_sync(layers, options)?;

    for warning in &output.warnings {
        eprintln!("warning: {warning}");
    }
    std::fs::write(&cli.out, &output.buffer)
        .with_context(|| format!("write {}", cli.out.display()))?;
    eprintln!("wrote {}", cli.out.display());
    Ok(())
}

fn parse_layer(spec: &str) -> anyhow::Result<LayerInput> {
    let (path, offset) = match spec.rsplit_once('@') {
        Some((path, offset)) if offset.contains(',') => (path, Some(offset)),
        _ => (spec, None),
    };

    let buffer = std::fs::read(path).with_context(|| format!("read layer {path}"))?;
    match offset {
        None => Ok(LayerInput::Buffer(buffer)),
        Some(offset) => {
            let (x, y) = offset
                .split_once(',')
                .context("layer offset must be x,y")?;
            let x = x.trim().parse().context("layer x offset")?;
            let y = y.trim().parse().context("layer y offset")?;
            Ok(LayerInput::Placed { buffer, x, y })
        }
    }
}
