use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::PathBuf,
};

use args::SizeParser;
use brace_layout::{Frames, ViewId};
use clap::Parser;
use color_eyre::{
    config::Theme,
    eyre::{self, Context},
};
use emath::{Pos2, Rect, Vec2};
use indexmap::IndexMap;
use scene::{Layout, Scene};
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod args;
mod scene;

/// Lays out the views of a JSON scene and prints their frames.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Scene file describing the views and their layout intents
    input: PathBuf,
    /// Size of the root view, `WIDTHxHEIGHT`
    #[clap(short, long, value_parser = SizeParser, default_value = "1920x1080")]
    size: Vec2,
    /// Print the frames as JSON
    #[clap(short, long)]
    json: bool,
}

fn main() -> eyre::Result<()> {
    let args = Args::parse();
    let color = supports_color::on(supports_color::Stream::Stderr)
        .map(|c| c.has_basic)
        .unwrap_or_default();
    if !color {
        color_eyre::config::HookBuilder::new()
            .theme(Theme::default())
            .install()?;
    } else {
        color_eyre::install()?;
    }

    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(
            #[cfg(debug_assertions)]
            EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?,
            #[cfg(not(debug_assertions))]
            EnvFilter::from_default_env(),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(color)
                .with_writer(io::stderr),
        )
        .init();

    let file = BufReader::new(File::open(&args.input).wrap_err("Failed to open scene file")?);
    let scene = Scene::from_reader(file)?;
    let Layout {
        mut canvas,
        root,
        views,
    } = scene.build()?;

    let frames = canvas
        .solve(root, Rect::from_min_size(Pos2::ZERO, args.size))
        .wrap_err("Failed to solve layout")?;
    tracing::info!(views = views.len(), resolved = frames.len(), "solved layout");

    let mut stdout = io::stdout().lock();
    let written = if args.json {
        print_json(&mut stdout, &views, &frames)
    } else {
        print_table(&mut stdout, &views, &frames)
    };
    written.wrap_err("Failed to write frames")
}

fn print_table(
    out: &mut impl Write,
    views: &IndexMap<String, ViewId>,
    frames: &Frames,
) -> io::Result<()> {
    let name_width = views.keys().map(String::len).max().unwrap_or_default();
    for (name, &view) in views {
        match frames.get(view) {
            Some(frame) => writeln!(
                out,
                "{name:<name_width$}  x={:<8} y={:<8} w={:<8} h={}",
                frame.min.x,
                frame.min.y,
                frame.width(),
                frame.height()
            )?,
            None => writeln!(out, "{name:<name_width$}  unresolved")?,
        }
    }
    Ok(())
}

fn print_json(
    out: &mut impl Write,
    views: &IndexMap<String, ViewId>,
    frames: &Frames,
) -> io::Result<()> {
    let frames: IndexMap<&str, Option<[f32; 4]>> = views
        .iter()
        .map(|(name, &view)| {
            let frame = frames
                .get(view)
                .map(|frame| [frame.min.x, frame.min.y, frame.width(), frame.height()]);
            (name.as_str(), frame)
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &frames)?;
    writeln!(out)
}
