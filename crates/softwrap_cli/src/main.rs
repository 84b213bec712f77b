//! Command-line front end for the softwrap engine.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use serde_json::json;
use softwrap_core::{
    DocPosition, LineBuffer, WrapCache, WrapConfig, WrapSegment, WrapView, WrappedLocation,
    EMPTY_ROW_INDICATOR,
};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "softwrap", about = "Soft-wrap a text file for a terminal viewport", version)]
struct Cli {
    /// Terminal width in columns
    #[arg(short, long, global = true, default_value = "80")]
    width: usize,

    /// Terminal height in rows
    #[arg(long, global = true, default_value = "30")]
    height: usize,

    /// TOML file with wrap settings (defaults come from SOFTWRAP_* env vars)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Print the rows of one viewport
    View {
        file: PathBuf,
        /// First wrapped row to show
        #[arg(short, long, default_value = "0")]
        offset: usize,
    },
    /// Map a document position to its wrapped row
    Locate {
        file: PathBuf,
        #[arg(long)]
        line: usize,
        #[arg(long)]
        column: usize,
    },
    /// Map a wrapped row back to a document position
    Goto {
        file: PathBuf,
        #[arg(long)]
        row: usize,
        #[arg(long, default_value = "0")]
        preferred_column: usize,
    },
    /// Compare lazy viewport wrapping with wrapping the whole file
    Stats { file: PathBuf },
}

struct Settings {
    config: WrapConfig,
    width: usize,
    height: usize,
    json: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("softwrap=warn,softwrap_core=warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn load_config(path: Option<&Path>) -> Result<WrapConfig> {
    let config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            toml::from_str::<WrapConfig>(&raw)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => WrapConfig::from_env(),
    };
    config.validate()?;
    debug!(?config, "loaded wrap config");
    Ok(config)
}

fn load_buffer(path: &Path) -> Result<LineBuffer> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(LineBuffer::new(&text))
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

fn format_view_output(rows: &[WrapSegment], height: usize, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(rows).context("failed to encode rows");
    }

    let mut lines: Vec<&str> = rows.iter().map(|row| row.text.as_str()).collect();
    while lines.len() < height {
        lines.push(EMPTY_ROW_INDICATOR);
    }
    Ok(lines.join("\n"))
}

fn format_locate_output(
    pos: DocPosition,
    location: &WrappedLocation,
    json: bool,
) -> Result<String> {
    if json {
        let value = json!({ "position": pos, "location": location });
        return serde_json::to_string_pretty(&value).context("failed to encode location");
    }

    Ok(format!(
        "{}:{} -> row {} (segment {} starting at column {}, visual column {})",
        pos.line,
        pos.column,
        location.wrapped_index,
        location.segment,
        location.segment_start,
        location.visual_column
    ))
}

fn format_goto_output(row: usize, pos: DocPosition, json: bool) -> Result<String> {
    if json {
        let value = json!({ "row": row, "position": pos });
        return serde_json::to_string_pretty(&value).context("failed to encode position");
    }

    Ok(format!("row {} -> {}:{}", row, pos.line, pos.column))
}

struct WrapPassReport {
    lines_wrapped: u64,
    rows: usize,
    elapsed: Duration,
}

fn eager_pass(buffer: &LineBuffer, width: usize) -> WrapPassReport {
    let mut cache = WrapCache::new(width);
    let start = Instant::now();
    let rows = cache.total_wrapped_lines(buffer);
    WrapPassReport {
        lines_wrapped: cache.stats().misses,
        rows,
        elapsed: start.elapsed(),
    }
}

fn lazy_pass(buffer: &LineBuffer, width: usize, height: usize) -> WrapPassReport {
    let mut cache = WrapCache::new(width);
    let start = Instant::now();
    let rows = cache.visible(buffer, 0, height).len();
    WrapPassReport {
        lines_wrapped: cache.stats().misses,
        rows,
        elapsed: start.elapsed(),
    }
}

fn format_stats_output(
    line_count: usize,
    lazy: &WrapPassReport,
    eager: &WrapPassReport,
    json: bool,
) -> Result<String> {
    if json {
        let value = json!({
            "source_lines": line_count,
            "lazy": {
                "lines_wrapped": lazy.lines_wrapped,
                "rows": lazy.rows,
                "elapsed_ms": millis(lazy.elapsed),
            },
            "eager": {
                "lines_wrapped": eager.lines_wrapped,
                "rows": eager.rows,
                "elapsed_ms": millis(eager.elapsed),
            },
        });
        return serde_json::to_string_pretty(&value).context("failed to encode stats");
    }

    Ok(format!(
        "source lines: {}\nlazy:  {} lines wrapped, {} rows, {:.3} ms\neager: {} lines wrapped, {} rows, {:.3} ms",
        line_count,
        lazy.lines_wrapped,
        lazy.rows,
        millis(lazy.elapsed),
        eager.lines_wrapped,
        eager.rows,
        millis(eager.elapsed)
    ))
}

fn render(command: &Commands, settings: &Settings) -> Result<String> {
    let mut view = WrapView::new(settings.config, settings.width, settings.height);
    match command {
        Commands::Completions { .. } => Ok(String::new()),
        Commands::View { file, offset } => {
            let buffer = load_buffer(file)?;
            view.scroll_to(*offset);
            let rows = view.visible_rows(&buffer);
            format_view_output(&rows, view.viewport().height(), settings.json)
        }
        Commands::Locate { file, line, column } => {
            let buffer = load_buffer(file)?;
            let pos = DocPosition::new(*line, *column);
            let location = view.locate(&buffer, pos);
            format_locate_output(pos, &location, settings.json)
        }
        Commands::Goto {
            file,
            row,
            preferred_column,
        } => {
            let buffer = load_buffer(file)?;
            let pos = view
                .cache_mut()
                .position_at_wrapped_index(&buffer, *row, *preferred_column)?;
            format_goto_output(*row, pos, settings.json)
        }
        Commands::Stats { file } => {
            let buffer = load_buffer(file)?;
            let width = view.wrap_width();
            let height = view.viewport().height();
            let lazy = lazy_pass(&buffer, width, height);
            let eager = eager_pass(&buffer, width);
            info!(
                target: "softwrap::perf",
                lines = buffer.line_count(),
                lazy_wrapped = lazy.lines_wrapped,
                eager_wrapped = eager.lines_wrapped,
                lazy_ms = millis(lazy.elapsed),
                eager_ms = millis(eager.elapsed),
                "wrap pass comparison"
            );
            format_stats_output(buffer.line_count(), &lazy, &eager, settings.json)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings {
        config: load_config(cli.config.as_deref())?,
        width: cli.width,
        height: cli.height,
        json: cli.json,
    };
    let output = render(&cli.command, &settings)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

fn run_and_report<F, E>(runner: F) -> i32
where
    F: FnOnce() -> Result<(), E>,
    E: std::fmt::Display,
{
    match runner() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("softwrap error: {:#}", err);
            1
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = run_and_report(|| run(cli));
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

#[cfg(test)]
mod tests;
