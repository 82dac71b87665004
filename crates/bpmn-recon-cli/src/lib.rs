//! CLI logic for the BPMN reconstruction tool.
//!
//! This module contains the core CLI logic: loading configuration, reading
//! the detections file, and writing the reconstructed BPMN document.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use bpmn_recon::{DiagramBuilder, ReconError};

/// Run the bpmn-recon CLI application
///
/// This function decodes the input detections, runs the reconstruction
/// pipeline, and writes the resulting BPMN document to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ReconError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed detections input
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), ReconError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing detections"
    );

    // Load configuration; a seed on the command line wins over the file
    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.seed.is_some() {
        app_config = app_config.with_seed(args.seed);
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let detections = builder.parse(&source)?;
    let xml = builder.convert(&detections)?;

    fs::write(&args.output, xml)?;

    info!(output_file = args.output; "BPMN exported successfully");

    Ok(())
}
