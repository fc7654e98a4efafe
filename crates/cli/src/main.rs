#![deny(unsafe_code)]
//! CLI binary for the rosebud parametric flower generator.
//!
//! Subcommands:
//! - `render <shape>`: build a particle cloud, splat it, write PNG
//! - `export <shape>`: build a particle cloud, write it as JSON
//! - `stage <bloom>`: print the bloom coefficients and stage
//! - `list`: print available shapes and palettes

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use rosebud_core::recipe::DEFAULT_NOISE_BOUND;
use rosebud_core::{ColorMapper, Recipe, Surface};
use rosebud_rose::{BloomMorph, BloomStage};
use rosebud_shapes::pixel::View;
use rosebud_shapes::ShapeKind;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rosebud", about = "Parametric rose and heart generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log generation details to stderr. `RUST_LOG` takes precedence.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a shape's particle cloud and write a PNG snapshot.
    Render {
        #[command(flatten)]
        generate: GenerateArgs,

        /// Color category (Red, Pink, Purple, Blue, Gold).
        #[arg(short, long, default_value = "Red")]
        palette: String,

        /// Image width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: usize,

        /// Image height in pixels.
        #[arg(short = 'H', long, default_value_t = 800)]
        height: usize,

        /// Camera tilt toward the viewer, radians.
        #[arg(long, default_value_t = 0.6, allow_negative_numbers = true)]
        pitch: f64,

        /// Camera rotation about the vertical axis, radians.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        yaw: f64,

        /// Side of each splatted particle, in pixels.
        #[arg(long, default_value_t = 1)]
        point_size: usize,

        /// Output file path.
        #[arg(short, long, default_value = "rosebud.png")]
        output: PathBuf,

        /// Also write the recipe used for this render.
        #[arg(long)]
        save_recipe: Option<PathBuf>,
    },
    /// Generate a shape's particle cloud and write it as JSON.
    Export {
        #[command(flatten)]
        generate: GenerateArgs,

        /// Output file path; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the morph coefficients and stage for a bloom value.
    Stage {
        /// Bloom value in [0, 1].
        #[arg(allow_negative_numbers = true)]
        bloom: f64,

        /// Previously shown bloom value, to decide whether full bloom was just reached.
        #[arg(long, allow_negative_numbers = true)]
        previous: Option<f64>,
    },
    /// List available shapes and palettes.
    List,
}

/// Flags shared by every subcommand that generates a particle cloud.
#[derive(Args)]
struct GenerateArgs {
    /// Shape name (rose, heart).
    #[arg(default_value = "rose")]
    shape: String,

    /// Load the generation from a recipe JSON file. The recipe carries its
    /// own shape and controls, so it cannot be combined with them.
    #[arg(
        long,
        conflicts_with_all = ["shape", "rows", "cols", "params", "chaos", "noise_seed", "noise_bound"]
    )]
    recipe: Option<PathBuf>,

    /// Samples along the first surface parameter.
    #[arg(long)]
    rows: Option<usize>,

    /// Samples along the second surface parameter.
    #[arg(long)]
    cols: Option<usize>,

    /// Shape parameters as a JSON string, e.g. '{"bloom": 0.4}'.
    #[arg(long, default_value = "{}")]
    params: String,

    /// Scatter amount in [0, 1].
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    chaos: f64,

    /// Seed of the per-particle noise.
    #[arg(long, default_value_t = 0)]
    noise_seed: u64,

    /// Half-width of the noise box.
    #[arg(long, default_value_t = DEFAULT_NOISE_BOUND, allow_negative_numbers = true)]
    noise_bound: f64,
}

impl GenerateArgs {
    fn recipe(&self) -> Result<Recipe, CliError> {
        if let Some(path) = &self.recipe {
            let text = fs::read_to_string(path)
                .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
            return Ok(Recipe::from_json(&text)?);
        }

        let params: serde_json::Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        let (rows, cols) = ShapeKind::default_resolution(&self.shape)?;
        let recipe = Recipe {
            shape: self.shape.clone(),
            rows: self.rows.unwrap_or(rows),
            cols: self.cols.unwrap_or(cols),
            params,
            chaos: self.chaos,
            noise_seed: self.noise_seed,
            noise_bound: self.noise_bound,
        };
        recipe.validate()?;
        Ok(recipe)
    }
}

fn write_json(path: &Path, value: &impl serde::Serialize) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).map_err(|e| CliError::Io(format!("cannot write {}: {e}", path.display())))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let shapes = ShapeKind::list_shapes();
            let mapper = ColorMapper::builtin();
            let palettes = mapper.names();
            if cli.json {
                let mut schemas = serde_json::Map::new();
                for name in shapes {
                    let shape = ShapeKind::from_name(name, &json!({}))?;
                    schemas.insert(name.to_string(), shape.param_schema());
                }
                let info = json!({
                    "shapes": shapes,
                    "palettes": palettes,
                    "params": schemas,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Shapes:");
                for name in shapes {
                    println!("  {name}");
                }
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
            }
        }
        Command::Stage { bloom, previous } => {
            let morph = BloomMorph::new(bloom)?;
            let stage = morph.stage();
            let previous = previous.map(BloomStage::classify).transpose()?;
            let celebrate = BloomStage::should_celebrate(previous, stage);
            if cli.json {
                let info = json!({
                    "bloom": morph.bloom(),
                    "radial_scale": morph.radial_scale(),
                    "height_stretch": morph.height_stretch(),
                    "stage": stage.label(),
                    "celebrate": celebrate,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "bloom {:.3}: {} (radial scale {:.3}, height stretch {:.3})",
                    morph.bloom(),
                    stage.label(),
                    morph.radial_scale(),
                    morph.height_stretch()
                );
                if celebrate {
                    println!("full bloom reached");
                }
            }
        }
        Command::Export { generate, output } => {
            let recipe = generate.recipe()?;
            let set = rosebud_shapes::generate(&recipe)?;
            match output {
                Some(path) => {
                    write_json(&path, &set)?;
                    if cli.json {
                        let info = json!({
                            "shape": recipe.shape,
                            "particles": set.len(),
                            "output": path.display().to_string(),
                        });
                        println!("{}", serde_json::to_string_pretty(&info)?);
                    } else {
                        eprintln!(
                            "exported {} ({} particles) -> {}",
                            recipe.shape,
                            set.len(),
                            path.display()
                        );
                    }
                }
                None => println!("{}", serde_json::to_string_pretty(&set)?),
            }
        }
        Command::Render {
            generate,
            palette,
            width,
            height,
            pitch,
            yaw,
            point_size,
            output,
            save_recipe,
        } => {
            let recipe = generate.recipe()?;
            let mapper = ColorMapper::builtin();
            let spec = mapper.gradient(&palette)?;
            let view = View {
                width,
                height,
                yaw,
                pitch,
                point_size,
                ..View::default()
            };

            let set = rosebud_shapes::generate(&recipe)?;
            rosebud_shapes::snapshot::write_png(&set, spec, &view, &output)?;
            if let Some(path) = &save_recipe {
                write_json(path, &recipe)?;
            }

            if cli.json {
                let info = json!({
                    "shape": recipe.shape,
                    "rows": recipe.rows,
                    "cols": recipe.cols,
                    "chaos": recipe.chaos,
                    "noise_seed": recipe.noise_seed,
                    "palette": palette,
                    "width": width,
                    "height": height,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, chaos {}, palette {palette}) -> {}",
                    recipe.shape,
                    recipe.rows,
                    recipe.cols,
                    recipe.chaos,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        tracing::debug!(exit_code = e.exit_code(), "command failed");
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
