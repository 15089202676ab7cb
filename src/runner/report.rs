use std::io::{self, Write};

use colored::Colorize;

use super::{OutcomeStatus, RunOutcome, RunSummary};
use crate::errors::ScenarioError;
use crate::render::Render;
use crate::scenarios::Scenario;

const API_RULER: &str = "++++++++++++++++++++++";
const SUMMARY_RULER: &str = "===============================================";

pub(super) fn header<W: Write>(out: &mut W, index: usize, name: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("[{:03}] {}", index, name).bold().blue())
}

pub(super) fn listing<W: Write>(out: &mut W, index: usize, scenario: &Scenario) -> io::Result<()> {
    if scenario.is_skipped() {
        writeln!(out, "{:>2} [SKIP] {}", index, scenario.name())
    } else {
        writeln!(out, "{:>2} {}", index, scenario.name())
    }
}

pub(super) fn outcome<W: Write>(out: &mut W, outcome: &RunOutcome) -> io::Result<()> {
    match &outcome.status {
        OutcomeStatus::Skipped => write!(out, "{}\n\n", "====> SKIP".yellow()),
        OutcomeStatus::Passed(output) => {
            writeln!(out, "{}", output.render())?;
            write!(out, "{} {:?}\n\n", "Time:".green(), outcome.elapsed)
        }
        OutcomeStatus::Failed(err) => {
            failure(out, err)?;
            write!(out, "Time: {:?}\n\n", outcome.elapsed)
        }
    }
}

fn failure<W: Write>(out: &mut W, err: &ScenarioError) -> io::Result<()> {
    writeln!(out, "{} {}", "Error:".red(), err)?;
    if let Some(partial) = err.partial_output() {
        writeln!(out, "Partial:    {} chars received", partial.chars().count())?;
    }

    if let Some(api) = err.api_error() {
        writeln!(out, "{}", API_RULER)?;
        writeln!(out, "Status:     {}", api.status)?;
        writeln!(out, "Type:       {}", api.kind)?;
        writeln!(out, "Message:    {}", api.message)?;
        writeln!(out, "Code:       {}", api.code.as_deref().unwrap_or(""))?;
        writeln!(out, "Param:      {}", api.param.as_deref().unwrap_or(""))?;
        writeln!(out, "{}", API_RULER)?;
    }
    Ok(())
}

pub(super) fn summary<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    writeln!(out, "{}", SUMMARY_RULER)?;
    writeln!(
        out,
        "Total {} scenario executed in {:?}.",
        summary.executed, summary.elapsed
    )
}
