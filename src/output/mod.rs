//! Output formatting and display system
//!
//! Report lines are produced by an [`OutputFormatter`] (plain or colored) and
//! written to a [`ReportSink`] (stdout, or memory in tests).

mod colored;
mod formatter;

pub use colored::{ColorScheme, ColoredFormatter};
pub use formatter::{MemorySink, OutputFormatter, PlainFormatter, ReportSink, StdoutSink, RULE_WIDTH};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color preference
    pub fn create_formatter(enable_color: bool) -> Box<dyn OutputFormatter> {
        if enable_color {
            Box::new(ColoredFormatter::new())
        } else {
            Box::new(PlainFormatter::new())
        }
    }
}
