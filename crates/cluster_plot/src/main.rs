use anyhow::{Context, Result};
use clap::Parser;
use cluster_plot::{
    Config, OutputTarget, PlotBackend, PlotError, PngBackend, WindowBackend, load_system_font,
    plot_files,
};
use log::{error, info};
use std::{io::Write, path::PathBuf};

#[derive(Parser)]
#[command(author, version, about = "Plot 2D clustering results", long_about = None)]
struct Args {
    /// Points file: id, label, x, y
    #[arg(short = 'p', long = "points")]
    points: Option<PathBuf>,

    /// Centroids file: id, x, y
    #[arg(short = 'c', long = "centroids")]
    centroids: Option<PathBuf>,

    /// Write a PNG here instead of opening a window
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Window/image width in px
    #[arg(long = "width")]
    width: Option<u32>,

    /// Window/image height in px
    #[arg(long = "height")]
    height: Option<u32>,
}

impl Args {
    /// defaults < config file < environment < flags
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)?,
            None => Config::default(),
        };
        config.apply_env();

        if let Some(points) = &self.points {
            config.input.points = points.clone();
        }
        if let Some(centroids) = &self.centroids {
            config.input.centroids = centroids.clone();
        }
        if let Some(output) = &self.output {
            config.output.path = Some(output.clone());
        }
        if let Some(width) = self.width {
            config.style.width = width;
        }
        if let Some(height) = self.height {
            config.style.height = height;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => std::process::exit(0),
        Err(e) => exit_with_error(e),
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.resolve_config()?;
    info!(
        "points: {}, centroids: {}",
        config.input.points.display(),
        config.input.centroids.display()
    );

    let target = config.output_target();
    let mut backend = backend_for(&target, &config);
    let summary = plot_files(&config.input.points, &config.input.centroids, backend.as_mut())
        .with_context(|| format!("failed to plot into {target}"))?;

    info!(
        "{} marks for {} points and {} centroids",
        summary.marks, summary.dimensions.num_vectors, summary.dimensions.num_centroids
    );
    Ok(())
}

fn backend_for(target: &OutputTarget, config: &Config) -> Box<dyn PlotBackend> {
    match target {
        OutputTarget::Window => Box::new(WindowBackend::new(config.style.clone())),
        OutputTarget::Png(path) => Box::new(PngBackend::new(
            path.clone(),
            config.style.clone(),
            load_system_font(),
        )),
    }
}

/// The 2D check is the one expected failure, reported as its bare message
fn standalone_message(e: &anyhow::Error) -> Option<String> {
    match e.downcast_ref::<PlotError>() {
        Some(dims @ PlotError::UnsupportedDimensions { .. }) => Some(dims.to_string()),
        _ => None,
    }
}

fn exit_with_error(e: anyhow::Error) -> ! {
    if let Some(message) = standalone_message(&e) {
        eprintln!("{message}");
        let _ = std::io::stderr().flush();
        std::process::exit(1);
    }

    error!("Error: {e:#}");

    use std::io::ErrorKind;
    for cause in e.chain() {
        if let Some(ioe) = cause.downcast_ref::<std::io::Error>() {
            match ioe.kind() {
                ErrorKind::NotFound => {
                    error!(
                        "Hint: run from the directory holding points.csv and centroids.csv, \
                         or pass --points/--centroids."
                    );
                    break;
                }
                ErrorKind::PermissionDenied => {
                    error!("Hint: check that the input files are readable and the output directory is writable.");
                    break;
                }
                _ => {}
            }
        }
    }
    let _ = std::io::stderr().flush();
    std::process::exit(1);
}
