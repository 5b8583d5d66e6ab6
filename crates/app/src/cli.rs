//! Command-line arguments

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lettering_config::RenderConfig;
use tracing::debug;

/// Render lines of text from a TrueType font into a PNG
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Path to the TrueType / OpenType font file (required, there is no default font)
    #[arg(long = "fontfile")]
    pub fontfile: PathBuf,

    /// Screen resolution in dots per inch [default: 72]
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Gamma correction [default: 1.0]
    #[arg(long)]
    pub gamma: Option<f32>,

    /// Font size in points [default: 12]
    #[arg(long)]
    pub size: Option<f64>,

    /// Line spacing (e.g. 2 means double spaced) [default: 1.5]
    #[arg(long)]
    pub spacing: Option<f64>,

    /// White text on a black background
    #[arg(long = "whiteonblack")]
    pub white_on_black: bool,

    /// Canvas width in pixels [default: 640]
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height in pixels [default: 480]
    #[arg(long)]
    pub height: Option<u32>,

    /// Output PNG path
    #[arg(short, long, default_value = "out.png")]
    pub output: PathBuf,

    /// File with the lines to render (defaults to "Jabberwocky")
    #[arg(long)]
    pub text: Option<PathBuf>,

    /// JSON render configuration; flags given on the command line win
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Build and validate the render configuration these arguments describe
    pub fn render_config(&self) -> anyhow::Result<RenderConfig> {
        let base = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                RenderConfig::from_json_str(&json)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            None => RenderConfig::default(),
        };

        let config = self.apply_overrides(base);
        config.validate().context("Invalid render settings")?;
        debug!("Args: resolved {:?}", config);
        Ok(config)
    }

    fn apply_overrides(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(dpi) = self.dpi {
            config.dpi = dpi;
        }
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        if let Some(size) = self.size {
            config.font_size = size;
        }
        if let Some(spacing) = self.spacing {
            config.line_spacing = spacing;
        }
        if self.white_on_black {
            config.white_on_black = true;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        config
    }
}
