//! Lettering - render lines of text into an anti-aliased PNG
//!
//! The whole document is rendered in memory first; the output file is only
//! created once every glyph resolved and rasterized.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use raster::{Canvas, ImageSink, PngSink, RenderSession, TtfOutlineSource};
use tracing::{error, info, warn};

mod cli;
mod text;

use cli::Args;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.render_config()?;

    let font_data = fs::read(&args.fontfile)
        .with_context(|| format!("Failed to read font file {}", args.fontfile.display()))?;
    let font = TtfOutlineSource::parse(&font_data)
        .with_context(|| format!("Failed to load font {}", args.fontfile.display()))?;

    let lines = text::load_lines(args.text.as_deref())?;
    info!("Rendering {} lines with {}", lines.len(), args.fontfile.display());

    let session = RenderSession::new(&config, &font)?;
    let canvas = session.render(&lines).context("Rendering failed")?;

    write_png(&args.output, &canvas)?;
    println!("Wrote {} OK.", args.output.display());
    Ok(())
}

/// Encode `canvas` to `path`, removing the file again if encoding fails
fn write_png(path: &Path, canvas: &Canvas) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut sink = PngSink::new(BufWriter::new(file));

    if let Err(err) = sink.encode(canvas) {
        drop(sink);
        if let Err(remove_err) = fs::remove_file(path) {
            warn!("Could not remove partial output {}: {}", path.display(), remove_err);
        }
        return Err(err).with_context(|| format!("Failed to write {}", path.display()));
    }
    Ok(())
}
