use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use contactplot::{PlotParams, plot_dat_to_path, plot_directory_to_path};

use super::args::CliArgs;
use super::errors::AppError;

/// Parse `WIDTHxHEIGHT` (the separator may also be `X`).
fn parse_size(size: &str) -> Result<(u32, u32), AppError> {
    let invalid = || AppError::InvalidSize {
        size: size.to_string(),
    };
    let (w, h) = size
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(invalid)?;
    let width = w.trim().parse::<u32>().map_err(|_| invalid())?;
    let height = h.trim().parse::<u32>().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(AppError::ZeroSize {
            size: size.to_string(),
        });
    }
    Ok((width, height))
}

/// Start from the config file (or defaults) and apply explicit options on top.
fn build_params(args: &CliArgs) -> Result<PlotParams, AppError> {
    let mut params = match &args.config {
        Some(path) => {
            info!("Loading plot parameters from {:?}", path);
            PlotParams::from_json_file(path)?
        }
        None => PlotParams::default(),
    };

    if let Some(format) = args.format {
        params.format = Some(format);
    }
    if let Some(colormap) = args.colormap {
        params.colormap = colormap;
    }
    if let Some(size) = &args.size {
        let (width, height) = parse_size(size)?;
        params.width = width;
        params.height = height;
    }
    if args.vmin.is_some() {
        params.vmin = args.vmin;
    }
    if args.vmax.is_some() {
        params.vmax = args.vmax;
    }
    if let Some(label) = &args.xlabel {
        params.x_label = label.clone();
    }
    if let Some(label) = &args.ylabel {
        params.y_label = label.clone();
    }
    if let Some(label) = &args.cbar_label {
        params.colorbar_label = label.clone();
    }
    params.metadata |= args.metadata;

    params.validate()?;
    Ok(params)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let params = build_params(&args)?;

    if let Some(input_dir) = &args.input_dir {
        let output_dir = args.output_dir.clone().ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;

        info!("Starting batch plotting from directory: {:?}", input_dir);
        info!("Output directory: {:?}", output_dir);

        let report = plot_directory_to_path(input_dir, &output_dir, &params, args.keep_going)?;

        info!("Batch plotting complete!");
        info!("Processed: {}", report.processed);
        info!("Skipped: {}", report.skipped);
        info!("Errors: {}", report.errors);

        if report.errors > 0 {
            warn!("Some files could not be plotted");
            return Err(AppError::BatchFailed {
                errors: report.errors,
                total: report.processed + report.errors,
            }
            .into());
        }
    } else {
        let input = args.input.clone().ok_or(AppError::MissingArgument {
            arg: "<DAT_FILE>".to_string(),
        })?;

        let report = plot_dat_to_path(&input, &args.output, &params)?;
        info!(
            "Successfully plotted: {:?} -> {:?} ({}x{} {}, {} rows x {} cols)",
            input, report.output, report.width, report.height, report.format, report.rows, report.cols
        );
        if let Some(sidecar) = report.sidecar {
            info!("Metadata written to {:?}", sidecar);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use contactplot::{Colormap, OutputFormat};
    use std::io::Write;

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn size_accepts_both_separators() {
        assert_eq!(parse_size("800x600").unwrap(), (800, 600));
        assert_eq!(parse_size(" 1024X768 ").unwrap(), (1024, 768));
        assert!(matches!(
            parse_size("800"),
            Err(AppError::InvalidSize { .. })
        ));
        assert!(matches!(
            parse_size("0x600"),
            Err(AppError::ZeroSize { .. })
        ));
        assert!(matches!(
            parse_size("axb"),
            Err(AppError::InvalidSize { .. })
        ));
    }

    #[test]
    fn defaults_match_plain_invocation() {
        let args = parse(&["contactplot", "contacts.dat"]);
        assert_eq!(args.output.to_str(), Some("contact.png"));
        let params = build_params(&args).unwrap();
        assert_eq!(params, PlotParams::default());
    }

    #[test]
    fn explicit_options_override_config() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        write!(
            config,
            r#"{{ "colormap": "magma", "width": 1000, "height": 800, "x_label": "lipids" }}"#
        )
        .unwrap();
        let config_path = config.path().to_str().unwrap().to_string();

        let args = parse(&[
            "contactplot",
            "contacts.dat",
            "--config",
            config_path.as_str(),
            "--colormap",
            "viridis",
            "--vmin",
            "-5",
            "--format",
            "tiff",
        ]);
        let params = build_params(&args).unwrap();
        assert_eq!(params.colormap, Colormap::Viridis);
        assert_eq!((params.width, params.height), (1000, 800));
        assert_eq!(params.x_label, "lipids");
        assert_eq!(params.vmin, Some(-5.0));
        assert_eq!(params.format, Some(OutputFormat::Tiff));
    }

    #[test]
    fn input_and_input_dir_are_exclusive() {
        assert!(CliArgs::try_parse_from(["contactplot"]).is_err());
        assert!(CliArgs::try_parse_from(["contactplot", "a.dat", "b.dat"]).is_err());
        assert!(
            CliArgs::try_parse_from(["contactplot", "a.dat", "--input-dir", "dats"]).is_err()
        );
        let args = parse(&["contactplot", "--input-dir", "dats", "--output-dir", "pngs"]);
        assert!(args.input.is_none());
    }
}
