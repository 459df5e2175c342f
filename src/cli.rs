use crate::config::{Config, load_config};
use crate::ir::Employee;
use crate::layout::{ChartSession, EdgeStyle, organize_into, sync};
use crate::layout_dump::write_layout_dump;
use crate::render::{render_svg, write_output_svg};
use crate::store::PositionStore;
use crate::validate::validate_hierarchy;
use anyhow::{Context, Result};
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "orgc", version, about = "Org chart hierarchy validation and layout")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log more (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Repair manager links and print the repaired list with warnings
    Validate {
        #[command(flatten)]
        input: InputArgs,

        /// Output file for the JSON report. Defaults to stdout.
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
    /// Recompute every position from scratch and write the position store
    Organize {
        #[command(flatten)]
        input: InputArgs,

        /// Position store (JSON)
        #[arg(short = 'p', long = "positions")]
        positions: PathBuf,
    },
    /// Keep stored positions, seed new nodes, drop removed ones
    Sync {
        #[command(flatten)]
        input: InputArgs,

        /// Position store (JSON)
        #[arg(short = 'p', long = "positions")]
        positions: PathBuf,
    },
    /// Render the chart
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Position store (JSON). Updated in place when given.
        #[arg(short = 'p', long = "positions")]
        positions: Option<PathBuf>,

        /// Output file. Defaults to stdout for SVG and JSON.
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
        output_format: OutputFormat,

        /// Connector style: straight, curved or bezier
        #[arg(long = "edge-style")]
        edge_style: Option<EdgeStyle>,

        /// Recompute all positions before rendering
        #[arg(long = "organize")]
        organize: bool,

        /// Width
        #[arg(short = 'w', long = "width")]
        width: Option<f32>,

        /// Height
        #[arg(short = 'H', long = "height")]
        height: Option<f32>,
    },
}

#[derive(ClapArgs, Debug)]
pub struct InputArgs {
    /// Employee list (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EmployeeFile {
    List(Vec<Employee>),
    Wrapped { employees: Vec<Employee> },
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Validate { input, output } => {
            let employees = read_employees(input.input.as_deref())?;
            let report = validate_hierarchy(&employees);
            let json = serde_json::to_string_pretty(&report)?;
            write_text(&json, output.as_deref())?;
        }
        Command::Organize { input, positions } => {
            let config = load_config(input.config.as_deref())?;
            let report = validate_hierarchy(&read_employees(input.input.as_deref())?);
            let mut store = PositionStore::load_or_default(&positions)?;
            organize_into(&report.employees, &mut store, &config.layout);
            store.save(&positions)?;
            tracing::info!(
                nodes = store.len(),
                path = %positions.display(),
                "wrote organized positions"
            );
        }
        Command::Sync { input, positions } => {
            let config = load_config(input.config.as_deref())?;
            let report = validate_hierarchy(&read_employees(input.input.as_deref())?);
            let mut store = PositionStore::load_or_default(&positions)?;
            let summary = sync(&report.employees, &mut store, &config.layout);
            store.save(&positions)?;
            tracing::info!(
                kept = summary.kept,
                seeded = summary.seeded.len(),
                dropped = summary.dropped,
                path = %positions.display(),
                "wrote synced positions"
            );
        }
        Command::Render {
            input,
            positions,
            output,
            output_format,
            edge_style,
            organize,
            width,
            height,
        } => {
            let mut config = load_config(input.config.as_deref())?;
            if let Some(style) = edge_style {
                config.layout.edge_style = style;
            }
            if let Some(width) = width {
                config.render.width = width;
            }
            if let Some(height) = height {
                config.render.height = height;
            }
            let employees = read_employees(input.input.as_deref())?;
            render(
                employees,
                &config,
                positions.as_deref(),
                output.as_deref(),
                output_format,
                organize,
            )?;
        }
    }

    Ok(())
}

fn render(
    employees: Vec<Employee>,
    config: &Config,
    positions: Option<&Path>,
    output: Option<&Path>,
    format: OutputFormat,
    organize: bool,
) -> Result<()> {
    let store = match positions {
        Some(path) => PositionStore::load_or_default(path)?,
        None => PositionStore::new(),
    };
    let mut session = ChartSession::with_store(config.layout.clone(), store);
    session.load(employees);
    if organize {
        session.organize();
    }
    if let Some(path) = positions {
        session.store().save(path)?;
    }

    let layout = session.layout();
    match format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.layout);
            write_output_svg(&svg, output)?;
        }
        OutputFormat::Json => {
            write_layout_dump(output, &layout, session.warnings())?;
        }
        OutputFormat::Png => {
            let output =
                output.ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            write_png(&render_svg(&layout, &config.theme, &config.layout), output, config)?;
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_employees(path: Option<&Path>) -> Result<Vec<Employee>> {
    let contents = read_input(path)?;
    parse_employees(&contents)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn parse_employees(contents: &str) -> Result<Vec<Employee>> {
    let file: EmployeeFile =
        serde_json::from_str(contents).context("employee input is not a JSON employee list")?;
    Ok(match file {
        EmployeeFile::List(employees) => employees,
        EmployeeFile::Wrapped { employees } => employees,
    })
}

fn write_text(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => println!("{text}"),
    }
    Ok(())
}
