//! `geometry` command: evaluate the overlay-frame formula.

use anyhow::{bail, Result};
use serde_json::json;

use adlift_unit::{overlay_frame, ElementSize, ScreenMetrics, ScreenPoint, SizeMode};

use crate::{Cli, OutputFormat};

/// Arguments for the geometry command.
#[derive(clap::Args)]
pub struct GeometryArgs {
    /// UI element x position in screen pixels.
    #[arg(long)]
    pub x: f32,

    /// UI element y position in screen pixels (bottom-left origin).
    #[arg(long)]
    pub y: f32,

    /// Screen height in pixels.
    #[arg(long)]
    pub screen_height: f32,

    /// Screen density in dots per inch.
    #[arg(long)]
    pub dpi: f32,

    /// Match the element's width (requires --element-height too).
    #[arg(long)]
    pub element_width: Option<f32>,

    /// Match the element's height (requires --element-width too).
    #[arg(long)]
    pub element_height: Option<f32>,

    /// Explicit overlay width (requires --height too).
    #[arg(long)]
    pub width: Option<i32>,

    /// Explicit overlay height (requires --width too).
    #[arg(long)]
    pub height: Option<i32>,
}

impl GeometryArgs {
    fn size_mode(&self) -> Result<SizeMode> {
        match (
            self.width,
            self.height,
            self.element_width,
            self.element_height,
        ) {
            (Some(width), Some(height), None, None) => Ok(SizeMode::Override { width, height }),
            (None, None, Some(width), Some(height)) => {
                Ok(SizeMode::Element(ElementSize { width, height }))
            }
            (None, None, None, None) => Ok(SizeMode::PositionOnly),
            _ => bail!("Provide both --width/--height, both --element-width/--element-height, or neither pair"),
        }
    }
}

/// Computes and prints the overlay frame for the given inputs.
pub fn run(args: &GeometryArgs, cli: &Cli) -> Result<()> {
    let frame = overlay_frame(
        ScreenPoint {
            x: args.x,
            y: args.y,
        },
        ScreenMetrics {
            height: args.screen_height,
            dpi: args.dpi,
        },
        args.size_mode()?,
    );

    if cli.format == OutputFormat::Json {
        let size = frame.size.map(|(w, h)| json!({"width": w, "height": h}));
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "x": frame.x,
                "y": frame.y,
                "size": size,
            }))?
        );
    } else {
        match frame.size {
            Some((width, height)) => {
                println!("x={} y={} width={} height={}", frame.x, frame.y, width, height);
            }
            None => println!("x={} y={} (provider default size)", frame.x, frame.y),
        }
    }
    Ok(())
}
