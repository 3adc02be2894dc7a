//! Logging Module
//!
//! Structured logging and error reporting:
//! - JSON file logs with daily rotation (tracing-appender)
//! - Pretty console output (tracing-subscriber)
//! - `log` crate records bridged into `tracing`
//! - Error reports with source context (miette)
//! - Old log files gzip-compressed in the background

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use flate2::write::GzEncoder;
use flate2::Compression;
use miette::Diagnostic;
use supports_color::Stream;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::AppConfig;

const LOG_FILE_PREFIX: &str = "lessonsmith.log";

static TERMINAL_CAPS: OnceLock<TerminalCapabilities> = OnceLock::new();

fn get_terminal_caps() -> &'static TerminalCapabilities {
    TERMINAL_CAPS.get_or_init(TerminalCapabilities::detect)
}

// ============================================================================
// Terminal Capability Detection
// ============================================================================

/// Detected terminal capabilities
#[derive(Debug, Clone)]
pub struct TerminalCapabilities {
    pub truecolor: bool,
    pub has_color: bool,
    pub supports_unicode: bool,
    pub is_interactive: bool,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities from environment
    pub fn detect() -> Self {
        use is_terminal::IsTerminal;

        let support = supports_color::on(Stream::Stderr);
        let supports_unicode = std::env::var("TERM")
            .map(|t| !t.contains("dumb"))
            .unwrap_or(true)
            && std::env::var("LANG")
                .map(|l| l.contains("UTF-8") || l.contains("utf8"))
                .unwrap_or(true);

        Self {
            truecolor: support.map(|s| s.has_16m).unwrap_or(false),
            has_color: support.is_some(),
            supports_unicode,
            is_interactive: io::stderr().is_terminal(),
        }
    }

    /// Check if colors should be used
    pub fn should_colorize(&self) -> bool {
        self.is_interactive && self.has_color
    }
}

// ============================================================================
// Logging Initialization
// ============================================================================

fn prepare_log_dir(config: &AppConfig) -> PathBuf {
    let log_dir = config.log_dir();
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }
    log_dir
}

fn env_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.default_filter))
}

/// Initialize the logging system.
///
/// This sets up:
/// 1. A console logger (pretty formatted with colors).
/// 2. A file logger (JSON formatted) in the log directory.
/// 3. Redirects standard `log` crate events to `tracing`.
/// 4. Configures miette for error reporting.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of the
/// process to ensure buffered logs are flushed on shutdown.
pub fn init(config: &AppConfig) -> WorkerGuard {
    install(config, true)
}

/// Like [`init()`] but without the console layer, for commands whose stdout
/// is machine-readable output.
pub fn init_file_only(config: &AppConfig) -> WorkerGuard {
    install(config, false)
}

fn install(config: &AppConfig, console: bool) -> WorkerGuard {
    let log_dir = prepare_log_dir(config);

    // Daily rotation, no size limit
    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter(config));

    let console_layer = console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .pretty()
            .with_filter(env_filter(config))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {}", e);
    }

    init_miette();

    // After init so the log macros inside work
    let log_dir_clone = log_dir.clone();
    std::thread::spawn(move || {
        compress_old_logs(&log_dir_clone);
    });

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );

    guard
}

/// Compress rolled log files other than today's.
fn compress_old_logs(log_dir: &Path) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();
    let rolled_prefix = format!("{}.", LOG_FILE_PREFIX);

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if name.starts_with(&rolled_prefix)
            && !name.ends_with(&today_suffix)
            && !name.ends_with(".gz")
        {
            match compress_file(&path) {
                Ok(()) => log::info!("Compressed old log: {:?}", path),
                Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
            }
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);

    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?
        .join(gz_name);

    if gz_path.exists() {
        return Ok(());
    }

    let output = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)
}

/// Initialize miette for error reporting
fn init_miette() {
    let caps = get_terminal_caps();

    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(caps.truecolor)
                .unicode(caps.supports_unicode)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .color(caps.should_colorize())
                .build(),
        )
    }))
    .ok(); // Ignore if already set
}

// ============================================================================
// Diagnostic Errors
// ============================================================================

/// Top-level diagnostic error for the command line
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code("LESSONSMITH::ERROR"))]
pub struct AppError {
    message: String,

    #[source_code]
    source_code: Option<String>,

    #[label("error occurs here")]
    span: Option<miette::SourceSpan>,

    #[help]
    help_text: Option<String>,
}

impl AppError {
    /// Create a simple error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source_code: None,
            span: None,
            help_text: None,
        }
    }

    /// Add source context
    pub fn with_source(mut self, source: impl Into<String>, offset: usize, length: usize) -> Self {
        self.source_code = Some(source.into());
        self.span = Some(miette::SourceSpan::new(offset.into(), length));
        self
    }

    /// Add help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help_text = Some(help.into());
        self
    }

    /// Error for a request file that is not valid JSON, pointing at the
    /// offending line and column.
    pub fn invalid_request(source: &str, error: &serde_json::Error) -> Self {
        let offset = line_col_offset(source, error.line(), error.column());
        Self::new(format!("Invalid request: {}", error))
            .with_source(source, offset, 1)
            .with_help("Expected fields: grade_level, subject, topic, and optionally style, problem_count, intensity_level, profile_key")
    }
}

/// Byte offset of a 1-based line and column, clamped to the source.
fn line_col_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len().saturating_sub(1))
}
