//! Compatibility checker
//!
//! Runs the six probes in order:
//!
//! 1. client SDK version (halts the run on failure)
//! 2. basic connection (halts the run on failure)
//! 3. beta messages with a `container` parameter
//! 4. skill listing
//! 5. code execution tool
//! 6. full skills workflow, only when 3 and 5 passed
//!
//! Probes 3 to 5 each convert their own failure into `false`, so one failing
//! never stops the next from running. After the last probe the summary and
//! one of four guidance messages are printed.

mod probes;


pub use probes::{
    beta_request, code_execution_request, connection_request, full_skills_request, FULL_SKILLS_BETAS,
    SKILL_SOURCE,
};

use crate::{
    client::ClientProvider,
    logging::Logger,
    models::{Config, Guidance, ProbeName, ProbeResults},
    output::{OutputFormatter, ReportSink},
};
use std::sync::Arc;

/// Lowest client binding version with skills support
pub const MIN_SDK_VERSION: &str = "0.71.0";

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// A blocking probe failed; later probes never ran
    Halted { at: ProbeName, results: ProbeResults },
    /// Every probe was attempted or skipped and the report was printed
    Completed { results: ProbeResults, guidance: Guidance },
}

impl CheckOutcome {
    pub fn results(&self) -> &ProbeResults {
        match self {
            Self::Halted { results, .. } | Self::Completed { results, .. } => results,
        }
    }

    pub fn guidance(&self) -> Option<Guidance> {
        match self {
            Self::Completed { guidance, .. } => Some(*guidance),
            Self::Halted { .. } => None,
        }
    }

    pub fn is_halted(&self) -> bool {
        matches!(self, Self::Halted { .. })
    }
}

/// Runs the probes against one endpoint and prints the report
pub struct CompatibilityChecker<P: ClientProvider> {
    provider: P,
    config: Config,
    formatter: Box<dyn OutputFormatter>,
    sink: Box<dyn ReportSink>,
    logger: Arc<Logger>,
}

impl<P: ClientProvider> CompatibilityChecker<P> {
    pub fn new(
        provider: P,
        config: Config,
        formatter: Box<dyn OutputFormatter>,
        sink: Box<dyn ReportSink>,
        logger: Arc<Logger>,
    ) -> Self {
        Self {
            provider,
            config,
            formatter,
            sink,
            logger,
        }
    }

    /// Run the whole checklist
    pub async fn run(&mut self) -> CheckOutcome {
        let banner = self.formatter.format_banner(
            "Claude Skills Compatibility Test",
            &format!("Endpoint: {}  Model: {}", self.config.base_url, self.config.model),
        );
        self.emit(&banner);

        let mut results = ProbeResults::new();

        let operation = self.begin(ProbeName::SdkVersion).await;
        let sdk_ok = self.check_sdk_version();
        self.finish(&operation, ProbeName::SdkVersion, sdk_ok, &mut results).await;
        if !sdk_ok {
            self.emit("");
            self.failure("Client SDK is missing or too old, cannot continue");
            self.detail(&format!("A Messages API client binding >= {} is required", MIN_SDK_VERSION));
            return CheckOutcome::Halted { at: ProbeName::SdkVersion, results };
        }

        let operation = self.begin(ProbeName::ApiConnection).await;
        let client = self.check_connection().await;
        self.finish(&operation, ProbeName::ApiConnection, client.is_some(), &mut results).await;
        let Some(client) = client else {
            self.emit("");
            self.failure("API connection failed, cannot continue");
            self.detail("Check the API key configuration in your .env file");
            return CheckOutcome::Halted { at: ProbeName::ApiConnection, results };
        };

        let operation = self.begin(ProbeName::BetaApi).await;
        let passed = self.check_beta_api(&client).await;
        self.finish(&operation, ProbeName::BetaApi, passed, &mut results).await;

        let operation = self.begin(ProbeName::SkillsApi).await;
        let passed = self.check_skills_listing(&client).await;
        self.finish(&operation, ProbeName::SkillsApi, passed, &mut results).await;

        let operation = self.begin(ProbeName::CodeExecution).await;
        let passed = self.check_code_execution(&client).await;
        self.finish(&operation, ProbeName::CodeExecution, passed, &mut results).await;

        if results.passed(ProbeName::BetaApi) && results.passed(ProbeName::CodeExecution) {
            let operation = self.begin(ProbeName::FullSkills).await;
            let passed = self.check_full_skills(&client).await;
            self.finish(&operation, ProbeName::FullSkills, passed, &mut results).await;
        } else {
            results.record(ProbeName::FullSkills, false);
            self.emit("");
            self.warning("Skipping the full workflow test (prerequisites not met)");
            self.logger
                .info("Skipped probe full_skills")
                .field("probe", ProbeName::FullSkills.key())
                .field("beta_api", results.passed(ProbeName::BetaApi))
                .field("code_execution", results.passed(ProbeName::CodeExecution))
                .log()
                .await;
        }

        let guidance = self.report(&results);
        CheckOutcome::Completed { results, guidance }
    }

    /// Print the summary table, pass rate and guidance
    fn report(&mut self, results: &ProbeResults) -> Guidance {
        let header = self.formatter.format_summary_header();
        self.emit(&header);

        for (name, passed) in results.iter() {
            let row = self.formatter.format_summary_row(name, passed);
            self.emit(&row);
        }

        let rate = self.formatter.format_pass_rate(results.passed_count(), results.total_count());
        self.emit(&rate);

        let guidance = Guidance::select(results.guidance_flags());
        let text = self.formatter.format_guidance(guidance);
        self.emit(&text);
        guidance
    }

    async fn begin(&mut self, probe: ProbeName) -> String {
        let section = self.formatter.format_section(probe.number(), probe.title());
        self.emit(&section);
        self.logger.start_operation(probe.key()).await
    }

    async fn finish(&mut self, operation: &str, probe: ProbeName, passed: bool, results: &mut ProbeResults) {
        results.record(probe, passed);
        self.logger.end_operation(operation, probe.key(), passed).await;
    }

    fn emit(&mut self, text: &str) {
        for line in text.split('\n') {
            self.sink.write_line(line);
        }
    }

    fn success(&mut self, message: &str) {
        let line = self.formatter.format_success(message);
        self.emit(&line);
    }

    fn failure(&mut self, message: &str) {
        let line = self.formatter.format_failure(message);
        self.emit(&line);
    }

    fn warning(&mut self, message: &str) {
        let line = self.formatter.format_warning(message);
        self.emit(&line);
    }

    fn detail(&mut self, message: &str) {
        let line = self.formatter.format_detail(message);
        self.emit(&line);
    }
}
