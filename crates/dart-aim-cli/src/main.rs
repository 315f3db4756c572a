//! dart-aim CLI: dartboard score maps and optimal aim points.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use dart_aim_analysis::{
    format_coord, AnalysisConfig, AnalysisReport, BoundaryMode, ExpectedScoreAnalyzer,
};
use dart_aim_render::{render_board_figure, render_expected_grid, write_png, ExpectedPanel};

#[cfg(not(feature = "tracing"))]
use log::LevelFilter;
use log::{info, warn};

#[cfg(feature = "tracing")]
use dart_aim_core::init_tracing;
#[cfg(not(feature = "tracing"))]
use dart_aim_core::init_with_level;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "dart-aim")]
#[command(about = "Where to aim on a dartboard, given how accurately you throw")]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the raw board score heatmap.
    Board(BoardArgs),

    /// Find the best aim point for each accuracy radius.
    Analyze(AnalyzeArgs),

    /// Print the value under a pixel position (raw or smoothed).
    Probe(ProbeArgs),

    /// Write the default configuration as JSON.
    InitConfig {
        /// Destination path.
        #[arg(long, default_value = "dart_aim.json")]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct ConfigArgs {
    /// JSON configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Image width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Vertical space not covered by the board, in pixels.
    #[arg(long)]
    border: Option<u32>,

    /// Boundary handling of the Gaussian smoothing.
    #[arg(long, value_enum)]
    boundary: Option<BoundaryArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BoundaryArg {
    Reflect,
    Nearest,
    Wrap,
    /// Zero outside the image.
    Constant,
}

impl From<BoundaryArg> for BoundaryMode {
    fn from(arg: BoundaryArg) -> Self {
        match arg {
            BoundaryArg::Reflect => BoundaryMode::Reflect,
            BoundaryArg::Nearest => BoundaryMode::Nearest,
            BoundaryArg::Wrap => BoundaryMode::Wrap,
            BoundaryArg::Constant => BoundaryMode::Constant { value: 0.0 },
        }
    }
}

#[derive(Debug, Clone, Args)]
struct BoardArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output PNG path.
    #[arg(long, default_value = "board.png")]
    out: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Accuracy radius in mm (95% of throws land within it). Repeatable.
    #[arg(long = "radius")]
    radii: Vec<f64>,

    /// Directory for the rendered figures.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Skip writing PNG figures.
    #[arg(long)]
    no_figures: bool,

    /// Write a JSON report with every recommendation.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct ProbeArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Horizontal image coordinate.
    #[arg(long, allow_negative_numbers = true)]
    x: f64,

    /// Vertical image coordinate.
    #[arg(long, allow_negative_numbers = true)]
    y: f64,

    /// Read the expected-score map for this accuracy radius instead of the raw board.
    #[arg(long)]
    radius: Option<f64>,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    #[cfg(not(feature = "tracing"))]
    init_with_level(match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    })?;

    #[cfg(feature = "tracing")]
    init_tracing(false);

    match cli.command {
        Commands::Board(args) => run_board(&args),
        Commands::Analyze(args) => run_analyze(&args),
        Commands::Probe(args) => run_probe(&args),
        Commands::InitConfig { out } => run_init_config(&out),
    }
}

fn load_config(args: &ConfigArgs) -> CliResult<AnalysisConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            info!("loading config {}", path.display());
            AnalysisConfig::load_json(path)?
        }
        None => AnalysisConfig::default(),
    };
    if let Some(height) = args.height {
        cfg.board.height = height;
    }
    if let Some(width) = args.width {
        cfg.board.width = width;
    }
    if let Some(border) = args.border {
        cfg.board.border = border;
    }
    if let Some(boundary) = args.boundary {
        cfg.smoothing.boundary = boundary.into();
    }
    Ok(cfg)
}

// ── board ──────────────────────────────────────────────────────────────

fn run_board(args: &BoardArgs) -> CliResult<()> {
    let cfg = load_config(&args.config)?;
    let analyzer = cfg.build_analyzer()?;
    write_png(&render_board_figure(analyzer.score_image())?, &args.out)?;
    println!("wrote board scores to {}", args.out.display());
    Ok(())
}

// ── analyze ────────────────────────────────────────────────────────────

fn run_analyze(args: &AnalyzeArgs) -> CliResult<()> {
    let mut cfg = load_config(&args.config)?;
    if !args.radii.is_empty() {
        cfg.accuracy_radii_mm = args.radii.clone();
    }
    if cfg.accuracy_radii_mm.is_empty() {
        warn!("no accuracy radii configured; nothing to analyse");
        return Ok(());
    }

    let analyzer = cfg.build_analyzer()?;
    let mut entries = Vec::with_capacity(cfg.accuracy_radii_mm.len());
    for &radius in &cfg.accuracy_radii_mm {
        println!("Analysis of a player with accuracy radius: {radius}mm");
        let entry = analyzer.analyze(&[radius])?.remove(0);
        let rec = &entry.recommendation;
        println!("Aim for {} ({})", rec.raw_score, rec.region);
        entries.push(entry);
    }

    let mut report = AnalysisReport::new(&analyzer, &entries);
    if !args.no_figures {
        let out_dir = args.out_dir.clone().unwrap_or_else(|| cfg.output_dir());
        let figure = write_figures(&analyzer, &entries, &out_dir)?;
        report.figure_path = Some(figure.to_string_lossy().into_owned());
    }

    if let Some(path) = &args.report {
        report.write_json(path)?;
        println!("wrote report JSON to {}", path.display());
    }
    Ok(())
}

fn write_figures(
    analyzer: &ExpectedScoreAnalyzer,
    entries: &[dart_aim_analysis::AnalysisEntry],
    out_dir: &Path,
) -> CliResult<PathBuf> {
    let board_path = out_dir.join("board.png");
    write_png(&render_board_figure(analyzer.score_image())?, &board_path)?;

    let panels: Vec<ExpectedPanel<'_>> = entries
        .iter()
        .map(|e| ExpectedPanel {
            accuracy_radius_mm: e.map.accuracy_radius_mm,
            field: &e.map.field,
            aim_pixel: e.recommendation.aim_pixel,
        })
        .collect();
    let grid_path = out_dir.join("expected_scores.png");
    write_png(&render_expected_grid(&panels)?, &grid_path)?;

    for (panel, e) in panels.iter().zip(entries) {
        info!(
            "panel {}: aim {} at {:?}",
            panel.title(),
            e.recommendation.region,
            e.recommendation.aim_pixel
        );
    }
    println!("wrote figures to {}", out_dir.display());
    Ok(grid_path)
}

// ── probe ──────────────────────────────────────────────────────────────

fn run_probe(args: &ProbeArgs) -> CliResult<()> {
    let cfg = load_config(&args.config)?;
    let analyzer = cfg.build_analyzer()?;
    let line = match args.radius {
        Some(radius) => {
            let map = analyzer.expected_map(radius)?;
            format_coord(&map.field, args.x, args.y)
        }
        None => format_coord(analyzer.score_image(), args.x, args.y),
    };
    println!("{line}");
    Ok(())
}

// ── init-config ────────────────────────────────────────────────────────

fn run_init_config(out: &Path) -> CliResult<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    AnalysisConfig::default().write_json(out)?;
    println!("wrote default config to {}", out.display());
    Ok(())
}
