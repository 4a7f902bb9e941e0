use clap::Parser;
use gridcorr::io::{load_gray_grid, save_gray_grid};
use gridcorr::kernel::{
    horizontal_difference, laplace4, laplace8, laplacian_of_gaussian5, vertical_difference,
};
use gridcorr::post::{abs, count_nonzero, edge_mask, min_max, normalize_to_u8, threshold};
use gridcorr::{Anchor, EdgeConfig, EdgeDetector, Kernel, ValidRegion};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "gridcorr edge detection CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PresetName {
    Laplace4,
    Laplace8,
    LaplacianOfGaussian5,
    HorizontalDifference,
    VerticalDifference,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KernelConfig {
    Preset(PresetName),
    Custom {
        weights: Vec<Vec<i32>>,
        #[serde(default)]
        anchor: Option<[usize; 2]>,
    },
}

impl Default for KernelConfig {
    fn default() -> Self {
        KernelConfig::Preset(PresetName::Laplace4)
    }
}

impl KernelConfig {
    fn build(&self) -> gridcorr::GridCorrResult<Kernel<i32>> {
        match self {
            KernelConfig::Preset(name) => Ok(match name {
                PresetName::Laplace4 => laplace4(),
                PresetName::Laplace8 => laplace8(),
                PresetName::LaplacianOfGaussian5 => laplacian_of_gaussian5(),
                PresetName::HorizontalDifference => horizontal_difference(),
                PresetName::VerticalDifference => vertical_difference(),
            }),
            KernelConfig::Custom { weights, anchor } => {
                let kernel = Kernel::from_rows(weights)?;
                match anchor {
                    Some([row, column]) => kernel.with_anchor(Anchor::new(*row, *column)),
                    None => Ok(kernel),
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum OutputMode {
    Response,
    #[default]
    Magnitude,
    Mask,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    output_path: Option<String>,
    kernel: KernelConfig,
    threshold: Option<i64>,
    parallel: bool,
    output: OutputMode,
}

#[derive(Debug, Serialize)]
struct Summary {
    width: usize,
    height: usize,
    kernel_rows: usize,
    kernel_columns: usize,
    anchor: [usize; 2],
    valid_rows: [usize; 2],
    valid_columns: [usize; 2],
    min_response: i64,
    max_response: i64,
    edge_pixels: Option<usize>,
    output_path: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("gridcorr=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() {
        return Err("image_path must be set in the config".into());
    }

    let image = load_gray_grid(&config.image_path)?;
    let kernel = config.kernel.build()?;
    let edge_config = EdgeConfig {
        threshold: config.threshold,
        parallel: config.parallel,
    };
    edge_config.validate()?;
    let detector = EdgeDetector::new(kernel).with_config(edge_config);

    let response = detector.response(image.view());
    let (min_response, max_response) = min_max(&response).unwrap_or((0, 0));
    let magnitude = abs(&response);
    let edges = config.threshold.map(|t| threshold(&magnitude, t));
    let edge_pixels = edges.as_ref().map(count_nonzero);

    if let Some(path) = &config.output_path {
        let rendered = match config.output {
            OutputMode::Response => normalize_to_u8(&response),
            OutputMode::Magnitude => normalize_to_u8(edges.as_ref().unwrap_or(&magnitude)),
            OutputMode::Mask => {
                let t = config
                    .threshold
                    .ok_or("output \"mask\" requires a threshold")?;
                edge_mask(&response, t)
            }
        };
        save_gray_grid(path, &rendered)?;
    }

    let kernel = detector.kernel();
    let region = ValidRegion::new(kernel, image.width(), image.height());
    let summary = Summary {
        width: image.width(),
        height: image.height(),
        kernel_rows: kernel.rows(),
        kernel_columns: kernel.columns(),
        anchor: [kernel.anchor().row, kernel.anchor().column],
        valid_rows: [region.rows.start, region.rows.end],
        valid_columns: [region.columns.start, region.columns.end],
        min_response,
        max_response,
        edge_pixels,
        output_path: config.output_path,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
