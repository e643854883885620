use crate::config::{LoggingConfig, Section};
use crate::paths::resolve_under;
use std::{
    collections::HashMap,
    io::{IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::Targets, fmt};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

// -------- level helpers --------

/// Empty strings mean "not configured"; unknown names fall back to INFO.
fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" => None,
        "trace" => Some(LevelFilter::TRACE),
        "debug" => Some(LevelFilter::DEBUG),
        "info" => Some(LevelFilter::INFO),
        "warn" => Some(LevelFilter::WARN),
        "error" => Some(LevelFilter::ERROR),
        "off" | "none" => Some(LevelFilter::OFF),
        _ => Some(LevelFilter::INFO),
    }
}

/// Returns true if target == prefix or target starts with "prefix::"
fn matches_target_prefix(target: &str, prefix: &str) -> bool {
    target == prefix
        || (target.starts_with(prefix) && target[prefix.len()..].starts_with("::"))
}

// -------- rotating writers --------

#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log writer poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log writer poisoned"))?
            .flush()
    }
}

/// Writer that silently drops records when no file matches.
struct MaybeWriter(Option<RotWriter>);

impl Write for MaybeWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.0 {
            Some(w) => w.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.0 {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

/// Routes records to per-subsystem files by target prefix, falling back to the default file.
#[derive(Clone, Default)]
struct FileRouter {
    default: Option<RotWriter>,
    by_prefix: Vec<(String, RotWriter)>,
}

impl FileRouter {
    fn resolve_for(&self, target: &str) -> Option<RotWriter> {
        self.by_prefix
            .iter()
            .find(|(prefix, _)| matches_target_prefix(target, prefix))
            .map(|(_, w)| w.clone())
            .or_else(|| self.default.clone())
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_prefix.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = MaybeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        MaybeWriter(self.default.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        MaybeWriter(self.resolve_for(meta.target()))
    }
}

fn file_limit(section: &Section) -> FileLimit {
    match (section.max_backups, section.max_age_days) {
        (Some(n), _) => FileLimit::MaxFiles(n.max(1)),
        (None, Some(days)) => FileLimit::Age(chrono::Duration::days(i64::from(days.max(1)))),
        (None, None) => FileLimit::Age(chrono::Duration::days(1)),
    }
}

/// Create a rotating writer, ensuring the parent directory exists.
fn create_rotating_writer(log_path: &Path, section: &Section) -> std::io::Result<RotWriter> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let max_bytes = section.max_size_mb.unwrap_or(100) * 1024 * 1024;
    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(file_limit(section)),
        ContentLimit::BytesSurpassed(max_bytes as usize),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

fn open_section_file(name: &str, section: &Section, base_dir: &Path) -> Option<RotWriter> {
    if section.file.trim().is_empty() {
        return None;
    }
    let log_path = resolve_under(base_dir, &section.file);
    match create_rotating_writer(&log_path, section) {
        Ok(writer) => Some(writer),
        Err(e) => {
            eprintln!(
                "Failed to init log file for '{}': {} ({})",
                name,
                log_path.display(),
                e
            );
            None
        }
    }
}

// -------- filters --------

fn console_targets(cfg: &LoggingConfig) -> Targets {
    let default_level = cfg
        .get("default")
        .and_then(|s| parse_level(&s.console_level))
        .unwrap_or(LevelFilter::INFO);

    cfg.iter()
        .filter(|(name, _)| name.as_str() != "default")
        .fold(Targets::new().with_default(default_level), |t, (name, s)| {
            match parse_level(&s.console_level) {
                Some(level) => t.with_target(name.clone(), level),
                None => t,
            }
        })
}

fn file_targets(cfg: &LoggingConfig, router: &FileRouter) -> Targets {
    let default_level = match (cfg.get("default"), &router.default) {
        (Some(s), Some(_)) => parse_level(&s.file_level).unwrap_or(LevelFilter::DEBUG),
        _ => LevelFilter::OFF,
    };

    cfg.iter()
        .filter(|(name, s)| name.as_str() != "default" && !s.file.trim().is_empty())
        .fold(Targets::new().with_default(default_level), |t, (name, s)| {
            let level = parse_level(&s.file_level).unwrap_or(default_level);
            t.with_target(name.clone(), level)
        })
}

fn build_file_router(cfg: &LoggingConfig, base_dir: &Path) -> FileRouter {
    let mut by_prefix: HashMap<String, RotWriter> = HashMap::new();
    for (name, section) in cfg.iter().filter(|(n, _)| n.as_str() != "default") {
        if let Some(w) = open_section_file(name, section, base_dir) {
            by_prefix.insert(name.clone(), w);
        }
    }

    // Longest prefix first so nested targets win over their parents.
    let mut by_prefix: Vec<_> = by_prefix.into_iter().collect();
    by_prefix.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    FileRouter {
        default: cfg
            .get("default")
            .and_then(|s| open_section_file("default", s, base_dir)),
        by_prefix,
    }
}

// -------- public init --------

/// Initialize logging from a configuration.
/// - `cfg`: logging sections keyed by subsystem (target prefix); "default" is the catch-all
/// - `base_dir`: directory used to resolve relative log file paths (usually server.home_dir)
///
/// Calling it more than once is harmless; only the first subscriber is installed.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    use tracing_subscriber::{layer::SubscriberExt, prelude::*, Registry};

    // Bridge `log` → `tracing` before installing the subscriber
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        let _ = fmt()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .try_init();
        return;
    }

    let console_layer = fmt::layer()
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(console_targets(cfg));

    let router = build_file_router(cfg, base_dir);
    if router.is_empty() {
        let _ = Registry::default().with(console_layer).try_init();
        return;
    }

    let file_filter = file_targets(cfg, &router);
    let file_layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(router)
        .with_filter(file_filter);

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_logging_config;
    use tempfile::tempdir;

    fn section(console: &str, file: &str, file_level: &str) -> Section {
        Section {
            console_level: console.into(),
            file: file.into(),
            file_level: file_level.into(),
            max_age_days: None,
            max_backups: Some(2),
            max_size_mb: Some(1),
        }
    }

    #[test]
    fn test_logging_level_parsing() {
        assert_eq!(parse_level("trace"), Some(LevelFilter::TRACE));
        assert_eq!(parse_level("DEBUG"), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level("Info"), Some(LevelFilter::INFO));
        assert_eq!(parse_level("warn"), Some(LevelFilter::WARN));
        assert_eq!(parse_level("ERROR"), Some(LevelFilter::ERROR));
        assert_eq!(parse_level("off"), Some(LevelFilter::OFF));
        assert_eq!(parse_level(""), None);
        assert_eq!(parse_level("loud"), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_target_prefix_matching() {
        assert!(matches_target_prefix("users_directory", "users_directory"));
        assert!(matches_target_prefix(
            "users_directory::domain::service",
            "users_directory"
        ));
        assert!(!matches_target_prefix("users_directory_extra", "users_directory"));
    }

    #[test]
    fn test_router_prefers_subsystem_file() {
        let tmp = tempdir().unwrap();
        let mut cfg = default_logging_config();
        cfg.insert(
            "api_ingress".into(),
            section("info", "logs/ingress.log", "debug"),
        );

        let router = build_file_router(&cfg, tmp.path());
        assert!(router.default.is_some());
        assert_eq!(router.by_prefix.len(), 1);
        assert!(router.resolve_for("api_ingress::request_id").is_some());
        assert!(tmp.path().join("logs").is_dir());
    }

    #[test]
    fn test_empty_file_disables_sink() {
        let tmp = tempdir().unwrap();
        let mut cfg = LoggingConfig::new();
        cfg.insert("default".into(), section("info", "", "debug"));

        let router = build_file_router(&cfg, tmp.path());
        assert!(router.is_empty());
        assert!(router.resolve_for("anything").is_none());
    }

    #[test]
    fn test_create_rotating_writer_creates_parent() {
        let tmp = tempdir().unwrap();
        let p = tmp.path().join("nested/dir/app.log");

        let mut w = create_rotating_writer(&p, &section("info", "x", "info")).unwrap();
        w.write_all(b"hello\n").unwrap();
        w.flush().unwrap();
        assert!(p.parent().unwrap().exists(), "parent dir must be created");
    }
}
