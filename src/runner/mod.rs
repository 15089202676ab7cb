//! Sequential scenario runner.
//!
//! Scenarios run one after another in registry order. A failing scenario
//! never stops the run; every error is printed where it happens and kept in
//! the [`RunSummary`], which decides the exit status.

mod report;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::errors::ScenarioError;
use crate::scenarios::{Scenario, ScenarioOutput};

/// Optional token restricting which scenarios run.
///
/// A scenario matches when its name contains the token, or when the decimal
/// form of its 1-based index contains it (so `1` also matches 10-19).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter(Option<String>);

impl Filter {
    pub fn new(token: Option<&str>) -> Self {
        Self(token.filter(|t| !t.is_empty()).map(str::to_string))
    }

    pub fn matches(&self, index: usize, name: &str) -> bool {
        match &self.0 {
            None => true,
            Some(token) => name.contains(token.as_str()) || index.to_string().contains(token.as_str()),
        }
    }
}

pub enum OutcomeStatus {
    Skipped,
    Passed(ScenarioOutput),
    Failed(ScenarioError),
}

/// What happened to one registry entry.
pub struct RunOutcome {
    pub index: usize,
    pub name: String,
    pub status: OutcomeStatus,
    pub elapsed: Duration,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub executed: usize,
    pub elapsed: Duration,
    pub errors: Vec<ScenarioError>,
}

impl RunSummary {
    fn record(&mut self, outcome: RunOutcome) {
        match outcome.status {
            OutcomeStatus::Skipped => return,
            OutcomeStatus::Passed(_) => {}
            OutcomeStatus::Failed(err) => self.errors.push(err),
        }
        self.executed += 1;
        self.elapsed += outcome.elapsed;
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

pub struct Runner<'a> {
    scenarios: &'a [Scenario],
    config: &'a AppConfig,
    filter: Filter,
}

impl<'a> Runner<'a> {
    pub fn new(scenarios: &'a [Scenario], config: &'a AppConfig, filter: Filter) -> Self {
        Self {
            scenarios,
            config,
            filter,
        }
    }

    pub async fn run<W: Write>(&self, out: &mut W) -> io::Result<RunSummary> {
        info!(
            "running {} scenarios (filter: {:?})",
            self.scenarios.len(),
            self.filter.0
        );
        let mut summary = RunSummary::default();

        for (position, scenario) in self.scenarios.iter().enumerate() {
            let outcome = self.execute(position + 1, scenario, out).await?;
            report::outcome(out, &outcome)?;
            summary.record(outcome);
        }

        report::summary(out, &summary)?;
        info!(
            "executed {} scenarios, {} failed",
            summary.executed,
            summary.errors.len()
        );
        Ok(summary)
    }

    async fn execute<W: Write>(
        &self,
        index: usize,
        scenario: &Scenario,
        out: &mut W,
    ) -> io::Result<RunOutcome> {
        report::header(out, index, scenario.name())?;

        if scenario.is_skipped() || !self.filter.matches(index, scenario.name()) {
            debug!("skipping scenario {} ({})", index, scenario.name());
            return Ok(RunOutcome {
                index,
                name: scenario.name().to_string(),
                status: OutcomeStatus::Skipped,
                elapsed: Duration::ZERO,
            });
        }

        // Streaming scenarios write to stdout themselves.
        out.flush()?;

        debug!("running scenario {} ({})", index, scenario.name());
        let begin = Instant::now();
        let result = scenario.run(self.config).await;
        let elapsed = begin.elapsed();

        let status = match result {
            Ok(output) => OutcomeStatus::Passed(output),
            Err(err) => {
                warn!("scenario {} failed: {}", scenario.name(), err);
                OutcomeStatus::Failed(err)
            }
        };

        Ok(RunOutcome {
            index,
            name: scenario.name().to_string(),
            status,
            elapsed,
        })
    }
}

/// Prints every scenario's 1-based index and name without running anything.
pub fn list<W: Write>(scenarios: &[Scenario], out: &mut W) -> io::Result<()> {
    for (position, scenario) in scenarios.iter().enumerate() {
        report::listing(out, position + 1, scenario)?;
    }
    Ok(())
}
