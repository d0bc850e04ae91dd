mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::app::App;
use crate::color::ColorModel;
use crate::state::AppState;

/// Browse a NIST atomic spectral line list in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the tab-separated line list.
    path: PathBuf,

    /// Wavelength→color conversion used for swatches and the spectrum view.
    #[arg(long, value_enum, default_value = "bruton")]
    color_model: ColorModel,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut state = AppState::new(args.color_model);
    state
        .load(&args.path)
        .with_context(|| format!("loading {}", args.path.display()))?;

    let mut terminal = ratatui::init();
    let result = App::new(state, args.path).run(&mut terminal);
    ratatui::restore();
    result
}
