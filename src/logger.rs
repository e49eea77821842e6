//! Console logger for the `log` facade, with colored levels and optional
//! timestamps. Binaries call [`init`] or [`init_with_config`] once at
//! startup; the library itself only emits through `log` macros.

use chrono::Local;
use colored::{Color, Colorize};
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::Lazy;
use std::sync::Mutex;

static CONSOLE_LOGGER: Lazy<ConsoleLogger> = Lazy::new(ConsoleLogger::new);

pub fn init() -> Result<(), String> {
    init_with_config(LoggerConfig::default())
}

pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    let max_level = config.min_level;
    CONSOLE_LOGGER.update_config(config);

    log::set_logger(&*CONSOLE_LOGGER).map_err(|e| format!("Failed to set logger: {:?}", e))?;
    log::set_max_level(max_level);
    Ok(())
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LevelFilter,
    pub show_colors: bool,
    pub show_timestamp: bool,
    pub show_module: bool,
    pub timestamp_format: String,
    pub custom_prefix: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            min_level: LevelFilter::Info,
            show_colors: true,
            show_timestamp: true,
            show_module: true,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            custom_prefix: None,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.custom_prefix = Some(prefix.into());
        self
    }

    pub fn development() -> Self {
        Self {
            min_level: LevelFilter::Debug,
            ..Default::default()
        }
    }

    pub fn production() -> Self {
        Self {
            min_level: LevelFilter::Info,
            show_colors: false,
            ..Default::default()
        }
    }
}

struct ConsoleLogger {
    config: Mutex<LoggerConfig>,
}

impl ConsoleLogger {
    fn new() -> Self {
        ConsoleLogger {
            config: Mutex::new(LoggerConfig::default()),
        }
    }

    fn update_config(&self, new_config: LoggerConfig) {
        *self.config.lock().unwrap() = new_config;
    }
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Trace => Color::Cyan,
        Level::Debug => Color::Blue,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error => Color::Red,
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.config.lock().unwrap().min_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let config = self.config.lock().unwrap();

        let mut line = String::new();
        if let Some(prefix) = &config.custom_prefix {
            line.push_str(&format!("[{}] ", prefix));
        }
        if config.show_timestamp {
            line.push_str(&format!(
                "{} ",
                Local::now().format(&config.timestamp_format)
            ));
        }

        let level = record.level().to_string();
        if config.show_colors {
            line.push_str(&format!(
                "[{}] ",
                level.color(level_color(record.level())).bold()
            ));
        } else {
            line.push_str(&format!("[{}] ", level));
        }

        if config.show_module {
            if let Some(module) = record.module_path() {
                line.push_str(&format!("{}: ", module));
            }
        }

        line.push_str(&record.args().to_string());
        println!("{}", line);
    }

    fn flush(&self) {}
}
