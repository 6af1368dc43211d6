//! CLI logic for the archsketch deployment diagram renderer.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::info;

use archsketch::{ArchsketchError, DiagramRenderer, SUCCESS_MESSAGE};

/// Run the archsketch CLI application
///
/// Loads the configuration, renders the deployment diagram to the output
/// path and prints the single success line on stdout.
///
/// # Errors
///
/// Returns `ArchsketchError` for:
/// - Configuration loading errors
/// - Rendering or encoding errors
/// - File I/O errors, including a missing output directory
pub fn run(args: &Args) -> Result<(), ArchsketchError> {
    info!(output_path = args.output; "Rendering deployment diagram");

    let app_config = config::load_config(args.config.as_ref())?;

    let renderer = DiagramRenderer::new(app_config);
    renderer.render(&args.output)?;

    info!(output_file = args.output; "Diagram exported successfully");
    println!("{SUCCESS_MESSAGE}");

    Ok(())
}
