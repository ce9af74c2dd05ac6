//! ncm-to-alac - convert the selected (or clipboard-named) NCM file to
//! an ALAC-coded M4A, carrying over embedded cover art.
//!
//! Takes no arguments; behavior is fixed by the configuration file.
//! Failures are communicated through the printed status lines, and the
//! process exits 0 on every path.

mod providers;

use std::path::PathBuf;
use std::sync::Arc;

use directories::ProjectDirs;

use ncm_core::config::{ConfigManager, Settings};
use ncm_core::input::{self, InputProvider};
use ncm_core::logging::{self, LogConfig, LogLevel, RunLogger};
use ncm_core::models::InputStrategy;
use ncm_core::orchestrator::{create_conversion_pipeline, Context, JobState};
use ncm_core::tools::ToolPaths;

use providers::{ClipboardProvider, FinderSelectionProvider};

fn main() {
    logging::init_tracing(LogLevel::Warn);

    if let Err(message) = run() {
        eprintln!("[ERROR] {message}");
    }
}

fn run() -> Result<(), String> {
    let dirs = ProjectDirs::from("", "", "ncm-to-alac");

    // Configuration
    let config_path = dirs
        .as_ref()
        .map(|d| d.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("ncm-to-alac.toml"));

    let mut config = ConfigManager::new(&config_path);
    config
        .load_or_create()
        .map_err(|e| format!("{} ({})", e, config_path.display()))?;
    let settings = config.settings().clone();

    // External tools, resolved up front
    let tools = ToolPaths::resolve(&settings.tools).map_err(|e| e.to_string())?;

    // Source file
    let provider: Box<dyn InputProvider> = match settings.input.strategy {
        InputStrategy::FinderSelection => Box::new(FinderSelectionProvider),
        InputStrategy::Clipboard => Box::new(ClipboardProvider),
    };

    let source = input::resolve_source(provider.as_ref(), &settings.input)
        .map_err(|e| e.to_string())?;
    println!("Source: {}", source.display());

    // Per-run logger: log file + console echo
    let run_name = run_name_for(&source);
    let logs_dir = resolve_logs_dir(&settings, dirs.as_ref());
    let log_config = LogConfig::from_settings(&settings.logging);

    let logger = RunLogger::new(
        run_name.as_str(),
        &logs_dir,
        log_config,
        Some(Box::new(|line: &str| println!("{line}"))),
    )
    .map_err(|e| format!("Failed to create run log in {}: {}", logs_dir.display(), e))?;

    // Pipeline
    let ctx = Context::new(settings, source, run_name.as_str(), tools, Arc::new(logger));
    let mut state = JobState::new(run_name.as_str());

    let pipeline = create_conversion_pipeline(&ctx.settings);
    pipeline.run(&ctx, &mut state).map_err(|e| e.to_string())?;

    print_report(&state);
    Ok(())
}

/// Run name: source stem plus a start timestamp, so repeated runs on the
/// same file get distinct log files.
fn run_name_for(source: &std::path::Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "run".to_string());
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    format!("{}_{}", stem, stamp)
}

/// Logs folder: configured value, or the platform data dir.
fn resolve_logs_dir(settings: &Settings, dirs: Option<&ProjectDirs>) -> PathBuf {
    let configured = settings.logging.logs_folder.trim();
    if !configured.is_empty() {
        return PathBuf::from(configured);
    }
    dirs.map(|d| d.data_local_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from(".logs"))
}

/// Final summary listing every produced artifact path.
fn print_report(state: &JobState) {
    println!();
    println!("[SUCCESS] Conversion finished");
    if let Some(decoded) = state.decoded_path() {
        println!("  FLAC file:  {}", decoded.display());
    }
    if let Some(output) = state.output_path() {
        println!("  ALAC file:  {}", output.display());
    }
    if let Some(cover) = &state.cover {
        println!("  Cover art:  {}", cover.cover_path.display());
    }
    if let Some(subtitles) = &state.subtitles {
        println!("  Subtitles:  {}", subtitles.subtitle_path.display());
    }
}
