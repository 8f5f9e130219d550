use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use voxfilt::image::io::{load_gray_volume, save_gray_volume};
use voxfilt::{
    compare, convolve_with, dump_comparators, median_filter_with, parse_modifier,
    register_builtin_comparators, Extents, FilterOptions, KernelShape, Volume,
};

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "voxfilt CLI (JSON config driven)")]
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
    /// List the registered comparators with their parameters and exit.
    #[arg(long)]
    list_comparators: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Task {
    #[default]
    Median,
    Convolve,
    Compare,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MedianConfigJson {
    kernel: [usize; 3],
    shape: String,
}

impl Default for MedianConfigJson {
    fn default() -> Self {
        Self {
            kernel: [3, 3, 1],
            shape: KernelShape::Block.as_str().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    task: Task,
    image_path: String,
    /// Kernel image for `convolve`, reference image for `compare`.
    with_path: Option<String>,
    output_path: Option<String>,
    output_image_path: Option<String>,
    parallel: bool,
    normalize_kernel: bool,
    median: MedianConfigJson,
    /// Modifier strings such as `frc` or `optvariance:invert=1`.
    comparators: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            task: Task::default(),
            image_path: String::new(),
            with_path: None,
            output_path: None,
            output_image_path: None,
            parallel: false,
            normalize_kernel: true,
            median: MedianConfigJson::default(),
            comparators: vec!["variance".to_string()],
        }
    }
}

#[derive(Debug, Serialize)]
struct ScoreRecord {
    comparator: String,
    score: f32,
}

#[derive(Debug, Serialize)]
struct VolumeSummary {
    extents: [usize; 3],
    min: f32,
    max: f32,
}

impl From<&Volume> for VolumeSummary {
    fn from(value: &Volume) -> Self {
        let (min, max) = value.min_max();
        Self {
            extents: value.extents().as_array(),
            min,
            max,
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct Output {
    #[serde(skip_serializing_if = "Option::is_none")]
    filtered: Option<VolumeSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    scores: Vec<ScoreRecord>,
}

fn load_with(config: &Config) -> Result<Volume, Box<dyn std::error::Error>> {
    let path = config
        .with_path
        .as_deref()
        .ok_or("with_path must be set for this task")?;
    Ok(load_gray_volume(path)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("voxfilt=info".parse()?))
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

    register_builtin_comparators();
    if cli.list_comparators {
        print!("{}", dump_comparators());
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() {
        return Err("image_path must be set in the config".into());
    }

    let image = load_gray_volume(&config.image_path)?;
    let opts = FilterOptions {
        parallel: config.parallel,
    };
    tracing::info!(task = ?config.task, extents = %image.extents(), "loaded image");

    let mut output = Output::default();
    let filtered = match config.task {
        Task::Median => {
            let [kx, ky, kz] = config.median.kernel;
            let shape: KernelShape = config.median.shape.parse()?;
            Some(median_filter_with(&image, Extents::new(kx, ky, kz)?, shape, &opts)?)
        }
        Task::Convolve => {
            let mut kernel = load_with(&config)?;
            if config.normalize_kernel {
                let sum: f32 = kernel.as_slice().iter().sum();
                if sum != 0.0 {
                    kernel.as_mut_slice().iter_mut().for_each(|v| *v /= sum);
                }
            }
            Some(convolve_with(&image, &kernel, &opts)?)
        }
        Task::Compare => {
            let with = load_with(&config)?;
            if config.comparators.is_empty() {
                return Err("comparators must list at least one comparator".into());
            }
            for spec in &config.comparators {
                let (name, params) = parse_modifier(spec)?;
                let score = compare(&name, Some(&image), Some(&with), &params)?;
                output.scores.push(ScoreRecord {
                    comparator: spec.clone(),
                    score,
                });
            }
            None
        }
    };

    if let Some(volume) = &filtered {
        if let Some(path) = &config.output_image_path {
            save_gray_volume(volume, 0, path)?;
        }
        output.filtered = Some(VolumeSummary::from(volume));
    }

    let json = serde_json::to_string_pretty(&output)?;
    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
