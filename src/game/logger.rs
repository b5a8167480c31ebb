//! Match logger
//!
//! Every match owns one logger. Its buffer is the match's append-only log and
//! travels with the match value when it is cloned; stdout echo is optional
//! and off by default so the engine stays silent unless a host asks for it.

use serde::{Deserialize, Serialize};

/// Verbosity level for match output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Silent - no output during the match
    Silent = 0,
    /// Minimal - only the match outcome and warnings
    Minimal = 1,
    /// Normal - turns, phases, and key actions (default)
    #[default]
    Normal = 2,
    /// Verbose - every state change
    Verbose = 3,
}

/// Output format for echoed log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Echo to stdout only, nothing retained
    Stdout,
    /// Retain in the in-memory log only (default)
    #[default]
    Memory,
    /// Both stdout and the in-memory log
    Both,
}

/// A log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Verbosity level of this log entry
    pub level: VerbosityLevel,
    /// Log message
    pub message: String,
    /// Optional category (e.g., "controller_choice", "warning", "phase")
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MatchLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    log_buffer: Vec<LogEntry>,
}

impl MatchLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logger with specified verbosity
    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        MatchLogger {
            verbosity,
            ..Self::default()
        }
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    /// Captured log entries, oldest first
    pub fn logs(&self) -> &[LogEntry] {
        &self.log_buffer
    }

    /// Entries in one category
    pub fn logs_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.log_buffer
            .iter()
            .filter(move |e| e.category.as_deref() == Some(category))
    }

    /// Print the last `tail_lines` retained entries, noting how many were elided
    pub fn print_tail(&self, tail_lines: usize) {
        let total_lines = self.log_buffer.len();
        let elided_count = total_lines.saturating_sub(tail_lines);
        if elided_count > 0 {
            println!(
                ">>> {} LOG LINES ELIDED. PRINTING LAST {} LINES <<<",
                elided_count, tail_lines
            );
        }
        for entry in self.log_buffer.iter().skip(elided_count) {
            if entry.level <= self.verbosity {
                self.log_to_stdout(entry);
            }
        }
    }

    fn log_to_stdout(&self, entry: &LogEntry) {
        match self.output_format {
            OutputFormat::Json => match serde_json::to_string(entry) {
                Ok(line) => println!("{}", line),
                Err(_) => println!("{}", entry.message),
            },
            OutputFormat::Text => {
                if entry.level == VerbosityLevel::Minimal {
                    println!("{}", entry.message);
                } else {
                    println!("  {}", entry.message);
                }
            }
        }
    }

    fn record(&mut self, level: VerbosityLevel, message: &str, category: Option<&str>) {
        let should_capture = self.is_capturing();
        let should_output = matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both)
            && level <= self.verbosity;

        // Early exit if message won't be used
        if !should_capture && !should_output {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            category: category.map(str::to_string),
        };
        if should_output {
            self.log_to_stdout(&entry);
        }
        if should_capture {
            self.log_buffer.push(entry);
        }
    }

    pub fn minimal(&mut self, message: &str) {
        self.record(VerbosityLevel::Minimal, message, None);
    }

    pub fn normal(&mut self, message: &str) {
        self.record(VerbosityLevel::Normal, message, None);
    }

    pub fn verbose(&mut self, message: &str) {
        self.record(VerbosityLevel::Verbose, message, None);
    }

    /// Conditions worth surfacing but not errors, such as drawing from an empty deck
    pub fn warning(&mut self, message: &str) {
        self.record(VerbosityLevel::Minimal, message, Some("warning"));
    }

    /// Phase skips and other automatic transitions
    pub fn phase(&mut self, message: &str) {
        self.record(VerbosityLevel::Normal, message, Some("phase"));
    }

    /// A decision made by a seat's controller
    pub fn controller_choice(&mut self, controller_name: &str, message: &str) {
        let formatted = format!("[{}] {}", controller_name, message);
        self.record(VerbosityLevel::Normal, &formatted, Some("controller_choice"));
    }
}
