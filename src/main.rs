//! Command line conversion of facies simulation outputs
//!
//! Usage: ftools <directory> [options]
//!
//! Every `.out` file in the directory is read on the given grid, reoriented
//! and optionally written back out as `.npy`, `.csv` and `.mat` files with
//! `--save-data`. Slice panels and VTK volumes are written with
//! `--save-figure`.
//!
//! ```bash
//! # Convert every realisation on a 100x100x50 grid
//! ftools ./runs --nx 100 --ny 100 --nz 50 --save-data
//!
//! # Plot slices 1, 25 and 50 with a different colormap
//! ftools ./runs --nz 50 --save-figure --slices 1,25,50 --colormap magma
//! ```

// ftools modules
use ftools::facies::{BatchReader, BatchSummary, Dimensions, FaciesFile};
use ftools::plot::vtk::{VolumeToVtk, VtkFormat};
use ftools::plot::{Colormap, Figures, SlicePanel, DEFAULT_SLICES};
use ftools::utils::f;

// standard library
use std::path::PathBuf;
use std::process::ExitCode;

// external crates
use clap::{Parser, ValueEnum};
use log::{debug, error, info};
use vtkio::model::ByteOrder;

#[doc(hidden)]
fn main() -> ExitCode {
    // set up the command line interface and match arguments
    let cli: Cli = Cli::parse();

    // set up logging (+2 to make Info the default)
    let verbosity = cli.verbose as usize + 2;
    logging_init(verbosity, cli.quiet);

    debug!("{cli:#?}");

    match run(&cli) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[doc(hidden)]
fn run(cli: &Cli) -> ftools::facies::Result<BatchSummary> {
    let summary = batch_init(cli).process(&cli.directory)?;

    if let Some(path) = &cli.report {
        info!("Writing summary to {}", path.display());
        summary.write_json(path)?;
    }

    Ok(summary)
}

/// Convert simulated facies volumes to numpy, csv, mat and vtk formats
///
/// Examples
/// --------
///
///  Typical use with the default 256x256x128 grid:
///     $ ftools ./runs --save-data
///
///  Set the grid size explicitly:
///     $ ftools ./runs --nx 100 --ny 100 --nz 50
///
///  Space delimited tables:
///     $ ftools ./runs --delimiter space
///
///  Write slice images and volumes with a chosen colormap:
///     $ ftools ./runs --save-figure --colormap cividis
///
///  Plot specific slices:
///     $ ftools ./runs --save-figure --slices 1,64,128
///
///  Process files in parallel and keep a summary:
///     $ ftools ./runs --save-data --parallel --report summary.json
///
/// Notes
/// -----
///
/// Only files ending in `.out` are read, in file name order. The first three
/// lines of every file are skipped as a header.
///
/// Failures are reported per file and the rest of the directory is still
/// processed. The exit code is non-zero if any file failed.
#[derive(Parser, Debug)]
#[command(
    verbatim_doc_comment,
    arg_required_else_help(true),
    after_help("Typical use: ftools ./runs --save-data --save-figure\n\nNOTE: --help shows more detail and examples"),
    term_width(70),
    hide_possible_values(true),
    override_usage("ftools <directory> [options]")
)]
struct Cli {
    // * Positional
    /// Directory of simulation output files
    #[arg(name = "directory")]
    directory: PathBuf,

    // * Grid options
    /// Number of cells along x
    #[arg(help_heading("Grid options"))]
    #[arg(long, default_value_t = 256)]
    #[arg(value_name = "cells")]
    nx: usize,

    /// Number of cells along y
    #[arg(help_heading("Grid options"))]
    #[arg(long, default_value_t = 256)]
    #[arg(value_name = "cells")]
    ny: usize,

    /// Number of cells along z
    #[arg(help_heading("Grid options"))]
    #[arg(long, default_value_t = 128)]
    #[arg(value_name = "cells")]
    nz: usize,

    /// Field delimiter of the data rows
    ///
    /// Any single character, or one of 'space', 'tab' or 'comma'.
    #[arg(help_heading("Grid options"))]
    #[arg(short, long, default_value = "comma")]
    #[arg(value_parser = parse_delimiter)]
    #[arg(value_name = "char")]
    delimiter: u8,

    // * Output options
    /// Write .npy, .csv and .mat files next to every input
    #[arg(help_heading("Output options"))]
    #[arg(long)]
    save_data: bool,

    /// Write slice images and a VTK volume next to every input
    ///
    /// Every input gets `<case>_slices.png`, a panel of the chosen z slices,
    /// and `<case>_volume.vtr` (`.vtk` for the legacy formats). The volume is
    /// a 3D dataset for ParaView or VisIt, not an image.
    #[arg(help_heading("Output options"))]
    #[arg(long)]
    save_figure: bool,

    /// Write a JSON summary of every file processed
    #[arg(help_heading("Output options"))]
    #[arg(long)]
    #[arg(value_name = "path")]
    report: Option<PathBuf>,

    // * Figure options
    /// 1-indexed z slices to plot
    #[arg(help_heading("Figure options"))]
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    #[arg(default_values_t = DEFAULT_SLICES)]
    #[arg(value_name = "list")]
    slices: Vec<usize>,

    /// Colormap for slice images
    ///
    /// Available colormaps:
    ///     > viridis (default)
    ///     > plasma
    ///     > inferno
    ///     > magma
    ///     > cividis
    ///     > gray
    #[arg(help_heading("Figure options"))]
    #[arg(long, value_enum)]
    #[arg(hide_default_value(true))]
    #[arg(default_value_t = Colormap::Viridis)]
    #[arg(verbatim_doc_comment)]
    #[arg(value_name = "name")]
    colormap: Colormap,

    /// Pixels per cell in slice images
    #[arg(help_heading("Figure options"))]
    #[arg(long, default_value_t = 1)]
    #[arg(value_name = "pixels")]
    scale: u32,

    /// VTK output format
    ///
    /// Available visual toolkit file formats:
    ///     > xml (default)
    ///     > ascii
    ///     > binary
    #[arg(help_heading("Figure options"))]
    #[arg(long, value_enum)]
    #[arg(hide_default_value(true))]
    #[arg(default_value_t = VtkFormat::Xml)]
    #[arg(verbatim_doc_comment)]
    #[arg(value_name = "format")]
    vtk_format: VtkFormat,

    /// Byte ordering of binary VTK files
    ///
    /// Visit only reads big endian, most systems are little endian.
    /// Defaults to big endian for convenience over performance.
    ///     > big-endian (default)
    ///     > little-endian
    #[arg(help_heading("Figure options"))]
    #[arg(long, value_enum)]
    #[arg(hide_default_value(true))]
    #[arg(default_value_t = CliByteOrder::BigEndian)]
    #[arg(verbatim_doc_comment)]
    #[arg(value_name = "endian")]
    endian: CliByteOrder,

    // * Flags
    /// Process files in parallel
    #[arg(long)]
    parallel: bool,

    /// Verbose logging (-v, -vv)
    ///
    /// If specified, the default log level of INFO is increased to DEBUG (-v)
    /// or TRACE (-vv). Errors and Warnings are always logged unless in quiet
    /// (-q) mode.
    #[arg(short, long)]
    #[arg(action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output (overrules --verbose)
    #[arg(short, long)]
    quiet: bool,
}

// Wrapper for byte order used by vtkio
#[doc(hidden)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CliByteOrder {
    BigEndian,
    LittleEndian,
}

#[doc(hidden)]
fn logging_init(verbosity: usize, quiet: bool) {
    let result = stderrlog::new()
        .modules(vec![module_path!(), "ftools_facies", "ftools_plot"])
        .quiet(quiet)
        .verbosity(verbosity)
        .show_level(false)
        .color(stderrlog::ColorChoice::Never)
        .timestamp(stderrlog::Timestamp::Off)
        .init();

    if let Err(e) = result {
        eprintln!("Warning: logging unavailable ({e})");
    }
}

#[doc(hidden)]
fn batch_init(cli: &Cli) -> BatchReader {
    let dimensions = Dimensions::new(cli.nx, cli.ny, cli.nz);
    info!("Grid size {dimensions}");

    let mut builder = BatchReader::builder()
        .dimensions(dimensions)
        .delimiter(cli.delimiter)
        .save_data(cli.save_data)
        .parallel(cli.parallel)
        .progress(!(cli.quiet || cli.verbose > 1));

    if cli.save_figure {
        let figures = figures_init(cli);
        debug!("{figures:?}");
        builder = builder.post_process(move |file: &FaciesFile| Ok(figures.save(file)?));
    }

    builder.build()
}

#[doc(hidden)]
fn figures_init(cli: &Cli) -> Figures {
    let panel = SlicePanel::builder()
        .slices(cli.slices.clone())
        .colormap(cli.colormap)
        .scale(cli.scale)
        .build();

    let converter = VolumeToVtk::builder()
        .byte_order(match cli.endian {
            CliByteOrder::LittleEndian => ByteOrder::LittleEndian,
            CliByteOrder::BigEndian => ByteOrder::BigEndian,
        })
        .build();

    Figures::new(panel, converter, cli.vtk_format)
}

#[doc(hidden)]
fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "space" => Ok(b' '),
        "tab" | "\\t" => Ok(b'\t'),
        "comma" => Ok(b','),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(f!("expected a single character delimiter, found \"{s}\"")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn long_help(id: &str) -> String {
        Cli::command()
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .and_then(|arg| arg.get_long_help().or(arg.get_help()))
            .map(|help| help.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn command_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn save_figure_help() {
        let help = long_help("save_figure");
        assert!(help.contains("_slices.png"), "{help}");
        assert!(help.contains("_volume.vtr"), "{help}");
        assert!(help.contains("not an image"), "{help}");
    }

    #[test]
    fn help_spelling() {
        assert!(long_help("endian").contains("most systems are little endian"));
        assert!(long_help("quiet").starts_with("Suppress"));
    }

    #[test]
    fn delimiters() {
        assert_eq!(parse_delimiter("space"), Ok(b' '));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert!(parse_delimiter("::").is_err());
    }
}
