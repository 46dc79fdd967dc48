//! trellis-scene: arrange a scene file and print where every control lands.
//!
//! ```text
//! trellis-scene scenes/dialog.json --width 320 --height 200
//! RUST_LOG=trellis=debug trellis-scene scenes/dialog.json --json
//! ```

mod scene;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use trellis::{Control, Rect, Size};

#[derive(Debug, Parser)]
#[command(name = "trellis-scene", about = "Arrange a scene and print control bounds")]
struct Args {
    /// Scene description (JSON)
    scene: PathBuf,

    /// Width of the root container
    #[arg(long, default_value_t = 640)]
    width: i32,

    /// Height of the root container
    #[arg(long, default_value_t = 480)]
    height: i32,

    /// Print the arranged tree as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Placed {
    depth: usize,
    label: String,
    bounds: Rect,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let node = scene::load(&args.scene)
        .with_context(|| format!("loading {}", args.scene.display()))?;
    let mut root = scene::build_root(&node)?;

    let size = Size::new(args.width.max(0), args.height.max(0));
    tracing::info!("arranging {} at {:?}", args.scene.display(), size);
    root.arrange_root(size);

    let mut placed = Vec::new();
    root.walk(&mut |depth, control, bounds| {
        if let Some(diagnostic) = control
            .as_container()
            .and_then(|c| c.layout().last_diagnostic())
        {
            tracing::warn!("{}: {}", describe(control), diagnostic);
        }
        placed.push(Placed {
            depth,
            label: describe(control),
            bounds,
        });
    });
    if let Some(diagnostic) = root.layout().last_diagnostic() {
        tracing::warn!("root: {}", diagnostic);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&placed)?);
    } else {
        for p in &placed {
            let b = p.bounds;
            println!(
                "{:indent$}{} [{}, {}, {}x{}]",
                "",
                p.label,
                b.x,
                b.y,
                b.width,
                b.height,
                indent = p.depth * 2
            );
        }
    }
    Ok(())
}

fn describe(control: &dyn Control) -> String {
    let fallback = if control.as_container().is_some() {
        "container"
    } else {
        "control"
    };
    let name = control.label().unwrap_or(fallback);
    if control.is_visible() {
        name.to_string()
    } else {
        format!("{name} (hidden)")
    }
}
