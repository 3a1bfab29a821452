//! Colored formatter implementation with terminal color support
//!
//! Uses ANSI colors and Unicode markers for the interactive console.

use super::formatter::{OutputFormatter, RULE_WIDTH};
use crate::models::{Guidance, ProbeName};
use colored::*;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,
            muted: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    pub fn new() -> Self {
        Self::with_color_scheme(ColorScheme::default())
    }

    pub fn with_color_scheme(color_scheme: ColorScheme) -> Self {
        Self { color_scheme }
    }

    fn rule(&self, ch: &str) -> ColoredString {
        ch.repeat(RULE_WIDTH).color(self.color_scheme.muted)
    }

    fn guidance_color(&self, guidance: Guidance) -> Color {
        match guidance {
            Guidance::FullySupported => self.color_scheme.success,
            Guidance::BetaApiMissing | Guidance::SkillsListingMissing => self.color_scheme.warning,
            Guidance::Unsupported => self.color_scheme.error,
        }
    }

    fn guidance_marker(guidance: Guidance) -> &'static str {
        match guidance {
            Guidance::FullySupported => "🎉",
            Guidance::BetaApiMissing | Guidance::SkillsListingMissing => "⚠️",
            Guidance::Unsupported => "❌",
        }
    }
}

impl Default for ColoredFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_banner(&self, title: &str, subtitle: &str) -> String {
        let rule = "🔍".repeat(RULE_WIDTH / 2);
        format!(
            "\n{}\n{}\n{}\n{}\n",
            rule,
            title.color(self.color_scheme.header).bold(),
            subtitle.color(self.color_scheme.info),
            rule
        )
    }

    fn format_section(&self, number: usize, title: &str) -> String {
        format!(
            "\n{}\n{}\n{}",
            self.rule("="),
            format!("Test {}: {}", number, title).color(self.color_scheme.header).bold(),
            self.rule("=")
        )
    }

    fn format_summary_header(&self) -> String {
        format!(
            "\n{}\n{}\n{}",
            self.rule("="),
            "Summary".color(self.color_scheme.header).bold(),
            self.rule("=")
        )
    }

    fn format_success(&self, message: &str) -> String {
        format!("{} {}", "✓".color(self.color_scheme.success).bold(), message)
    }

    fn format_failure(&self, message: &str) -> String {
        format!("{} {}", "❌", message.color(self.color_scheme.error))
    }

    fn format_warning(&self, message: &str) -> String {
        format!("{} {}", "⚠️", message.color(self.color_scheme.warning))
    }

    fn format_detail(&self, message: &str) -> String {
        format!("  {}", message.color(self.color_scheme.muted))
    }

    fn format_summary_row(&self, name: ProbeName, passed: bool) -> String {
        if passed {
            format!("✅ {} - {}", "PASS".color(self.color_scheme.success).bold(), name.key())
        } else {
            format!("❌ {} - {}", "FAIL".color(self.color_scheme.error).bold(), name.key())
        }
    }

    fn format_pass_rate(&self, passed: usize, total: usize) -> String {
        let color = if total > 0 && passed == total {
            self.color_scheme.success
        } else if passed == 0 {
            self.color_scheme.error
        } else {
            self.color_scheme.warning
        };
        format!("\nPass rate: {}", format!("{}/{}", passed, total).color(color).bold())
    }

    fn format_guidance(&self, guidance: Guidance) -> String {
        let mut output = format!(
            "\n{} {}\n",
            Self::guidance_marker(guidance),
            guidance.headline().color(self.guidance_color(guidance)).bold()
        );
        for line in guidance.details() {
            output.push_str(&format!("\n{}", line));
        }
        output
    }
}
