//! Core formatting trait, the plain text formatter and report sinks

use crate::models::{Guidance, ProbeName};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Width of the `=` rules around section headers
pub const RULE_WIDTH: usize = 60;

/// Main trait for report formatting
pub trait OutputFormatter: Send + Sync {
    /// Opening banner of the run
    fn format_banner(&self, title: &str, subtitle: &str) -> String;

    /// Header printed before each probe
    fn format_section(&self, number: usize, title: &str) -> String;

    /// Header of the closing summary
    fn format_summary_header(&self) -> String;

    fn format_success(&self, message: &str) -> String;

    fn format_failure(&self, message: &str) -> String;

    fn format_warning(&self, message: &str) -> String;

    /// Indented supporting line under a success/failure/warning
    fn format_detail(&self, message: &str) -> String;

    /// One row of the summary table
    fn format_summary_row(&self, name: ProbeName, passed: bool) -> String;

    fn format_pass_rate(&self, passed: usize, total: usize) -> String;

    /// Closing advice block
    fn format_guidance(&self, guidance: Guidance) -> String;
}

/// Plain text formatter for logs, pipes and `--no-color`
#[derive(Debug, Clone, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_banner(&self, title: &str, subtitle: &str) -> String {
        let rule = "#".repeat(RULE_WIDTH);
        format!("\n{}\n{}\n{}\n{}\n", rule, title, subtitle, rule)
    }

    fn format_section(&self, number: usize, title: &str) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        format!("\n{}\nTest {}: {}\n{}", rule, number, title, rule)
    }

    fn format_summary_header(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        format!("\n{}\nSummary\n{}", rule, rule)
    }

    fn format_success(&self, message: &str) -> String {
        format!("[OK] {}", message)
    }

    fn format_failure(&self, message: &str) -> String {
        format!("[FAIL] {}", message)
    }

    fn format_warning(&self, message: &str) -> String {
        format!("[WARN] {}", message)
    }

    fn format_detail(&self, message: &str) -> String {
        format!("  {}", message)
    }

    fn format_summary_row(&self, name: ProbeName, passed: bool) -> String {
        format!("{} - {}", if passed { "PASS" } else { "FAIL" }, name.key())
    }

    fn format_pass_rate(&self, passed: usize, total: usize) -> String {
        format!("\nPass rate: {}/{}", passed, total)
    }

    fn format_guidance(&self, guidance: Guidance) -> String {
        let mut output = format!("\n{}\n", guidance.headline());
        for line in guidance.details() {
            output.push_str(&format!("\n{}", line));
        }
        output
    }
}

/// Destination of report lines
pub trait ReportSink: Send {
    fn write_line(&mut self, line: &str);
}

/// Writes the report to stdout
#[derive(Debug, Default)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn write_line(&mut self, line: &str) {
        let _ = writeln!(io::stdout(), "{}", line);
    }
}

/// Keeps the report in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, joined with newlines
    pub fn contents(&self) -> String {
        self.lines
            .lock()
            .map(|lines| lines.join("\n"))
            .unwrap_or_default()
    }
}

impl ReportSink for MemorySink {
    fn write_line(&mut self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }
}
