// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `windtree`: builds annotated Windtree documents and probes them headlessly.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use kurbo::{Point, Rect};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use windtree_explainer::{
    Document, DocumentViewport, Explainer, ExplainerConfig, FillMode, MemorySurface, Toggles,
};
use windtree_quadtree::{BuildConfig, build};

mod report;

use report::ProbeReport;

#[derive(Parser, Debug)]
#[command(name = "windtree", version, about)]
struct Cli {
    /// Raise log verbosity (`-v` debug, `-vv` trace). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split an SVG drawing into segments and annotate it with a quadtree.
    Build(BuildArgs),
    /// Probe winding numbers of an annotated document.
    Probe(ProbeArgs),
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Input SVG drawing.
    input: PathBuf,
    /// Where to write the annotated document; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Deepest quadtree level.
    #[arg(long)]
    max_depth: Option<usize>,
}

#[derive(Args, Debug, Default)]
struct ProbeArgs {
    /// Annotated document produced by `windtree build`.
    document: PathBuf,
    /// Pointer position as `X,Y`; repeat for several probes.
    #[arg(long = "at", value_parser = parse_point, required = true)]
    at: Vec<Point>,
    /// Device rectangle `X0,Y0,X1,Y1` the drawing is fitted into. Probe
    /// positions are in document coordinates when omitted.
    #[arg(long, value_parser = parse_rect)]
    view_rect: Option<Rect>,
    /// Hover the deepest node under each probe before probing; probes no
    /// node covers leave the drawing.
    #[arg(long)]
    hover: bool,
    /// Hover the node with this id for every probe.
    #[arg(long, conflicts_with = "hover")]
    node: Option<String>,
    /// Count shortcuts of the hovered node.
    #[arg(long)]
    shortcuts: bool,
    /// Show the tree.
    #[arg(long)]
    tree: bool,
    /// Seed readouts with the hovered node's base winding number.
    #[arg(long)]
    winding_numbers: bool,
    /// Check every toggle.
    #[arg(long)]
    all: bool,
    /// Fill rule for the original paths.
    #[arg(long, value_enum)]
    fill: Option<FillArg>,
    /// JSON file with explainer settings.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FillArg {
    None,
    Nonzero,
    Evenodd,
}

impl From<FillArg> for FillMode {
    fn from(value: FillArg) -> Self {
        match value {
            FillArg::None => Self::None,
            FillArg::Nonzero => Self::NonZero,
            FillArg::Evenodd => Self::EvenOdd,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Build(args) => run_build(&args),
        Command::Probe(args) => {
            let content = fs::read_to_string(&args.document)
                .with_context(|| format!("reading {}", args.document.display()))?;
            let config = match &args.config {
                Some(path) => load_config(path)?,
                None => ExplainerConfig::default(),
            };
            let reports = probe(&content, &args, config)?;
            println!("{}", serde_json::to_string_pretty(&reports)?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_build(args: &BuildArgs) -> Result<()> {
    let input = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let mut config = BuildConfig::default();
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }
    let drawing = build(&input, &config)
        .with_context(|| format!("building {}", args.input.display()))?;
    let svg = drawing.to_svg_string();
    match &args.output {
        Some(path) => {
            fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
            debug!(output = %path.display(), "wrote annotated document");
        }
        None => println!("{svg}"),
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<ExplainerConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn probe(content: &str, args: &ProbeArgs, config: ExplainerConfig) -> Result<Vec<ProbeReport>> {
    let document = Document::from_svg_str(content).context("loading document")?;
    let viewport = match args.view_rect {
        Some(rect) => DocumentViewport::new(rect, document.view_box()),
        None => DocumentViewport::identity(document.view_box()),
    };
    let fixed_node = match &args.node {
        Some(name) => match document.node_by_name(name) {
            Some(id) => Some(id),
            None => bail!("no tree node with id {name:?}"),
        },
        None => None,
    };

    let mut surface = MemorySurface::default();
    let mut explainer = Explainer::new(document, config).with_viewport(viewport);
    explainer.init(&mut surface);
    if args.all {
        explainer.set_all_toggles(true, &mut surface);
    }
    for (flag, toggle) in [
        (args.tree, Toggles::TREE),
        (args.shortcuts, Toggles::SHORTCUTS),
        (args.winding_numbers, Toggles::WINDING_NUMBERS),
    ] {
        if flag {
            explainer.set_toggle(toggle, true, &mut surface);
        }
    }
    if let Some(fill) = args.fill {
        explainer.set_fill_mode(fill.into(), &mut surface);
    }
    if let Some(node) = fixed_node {
        explainer.node_enter(node, &mut surface);
    }

    let mut reports = Vec::with_capacity(args.at.len());
    for &device in &args.at {
        if args.hover && explainer.hover_at(device, &mut surface).is_none() {
            explainer.pointer_leave(&mut surface);
        }
        let outcome = explainer.pointer_move(device, &mut surface);
        reports.push(ProbeReport::new(&explainer, device, &outcome, &surface));
    }
    Ok(reports)
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[f64; N], String> {
    let values: Vec<f64> = s
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("{s:?}: {e}"))?;
    values
        .try_into()
        .map_err(|v: Vec<f64>| format!("{s:?}: expected {N} numbers, got {}", v.len()))
}

fn parse_point(s: &str) -> Result<Point, String> {
    let [x, y] = parse_numbers(s)?;
    Ok(Point::new(x, y))
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let [x0, y0, x1, y1] = parse_numbers(s)?;
    Ok(Rect::new(x0, y0, x1, y1))
}
