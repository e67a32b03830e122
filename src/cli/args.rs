use clap::Parser;
use std::path::PathBuf;

use contactplot::core::params::DEFAULT_OUTPUT;
use contactplot::{Colormap, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "contactplot",
    version,
    about = "Plot contact-matrix .dat files as heatmaps"
)]
pub struct CliArgs {
    /// Path to the .dat file that should be plotted (single file mode)
    #[arg(
        value_name = "DAT_FILE",
        required_unless_present = "input_dir",
        conflicts_with = "input_dir"
    )]
    pub input: Option<PathBuf>,

    /// Output image (single file mode)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Directory of .dat files to plot (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output directory for batch mode
    #[arg(long, requires = "input_dir")]
    pub output_dir: Option<PathBuf>,

    /// Batch mode: continue with the remaining files after a failure
    #[arg(long, default_value_t = false)]
    pub keep_going: bool,

    /// Output format (png, jpeg or tiff); inferred from the output extension if omitted
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Colormap (inferno, viridis, magma, plasma, gray)
    #[arg(long, value_enum)]
    pub colormap: Option<Colormap>,

    /// Image size in pixels as WIDTHxHEIGHT (default 3200x2400)
    #[arg(long)]
    pub size: Option<String>,

    /// Lower end of the color scale in percent (default: data minimum)
    #[arg(long, allow_hyphen_values = true)]
    pub vmin: Option<f64>,

    /// Upper end of the color scale in percent (default: data maximum)
    #[arg(long, allow_hyphen_values = true)]
    pub vmax: Option<f64>,

    /// Title of the x axis
    #[arg(long)]
    pub xlabel: Option<String>,

    /// Title of the y axis
    #[arg(long)]
    pub ylabel: Option<String>,

    /// Title of the colorbar
    #[arg(long)]
    pub cbar_label: Option<String>,

    /// Write a JSON metadata sidecar next to each image
    #[arg(long, default_value_t = false)]
    pub metadata: bool,

    /// JSON file with plot parameters; explicit options take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
