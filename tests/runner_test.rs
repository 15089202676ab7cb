use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use genai_client::ApiError;
use genai_testapp::config::AppConfig;
use genai_testapp::errors::ScenarioError;
use genai_testapp::runner::{self, Filter, RunSummary, Runner};
use genai_testapp::scenarios::{Scenario, ScenarioOutput};

fn config() -> AppConfig {
    AppConfig {
        api_key: String::new(),
        base_url: None,
        image_path: "unused.png".into(),
    }
}

fn counted_ok(name: &str, calls: &Arc<AtomicUsize>) -> Scenario {
    let calls = calls.clone();
    Scenario::new(name, move |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Ok(Box::new("fine".to_string()) as ScenarioOutput) }.boxed()
    })
}

fn ok(name: &str) -> Scenario {
    counted_ok(name, &Arc::new(AtomicUsize::new(0)))
}

fn failing(name: &str) -> Scenario {
    Scenario::new(name, |_| {
        async {
            Err(ScenarioError::io(
                "missing.png",
                io::Error::new(io::ErrorKind::NotFound, "gone"),
            ))
        }
        .boxed()
    })
}

async fn run(scenarios: &[Scenario], filter: Option<&str>) -> (RunSummary, String) {
    colored::control::set_override(false);
    let config = config();
    let mut out = Vec::new();
    let summary = Runner::new(scenarios, &config, Filter::new(filter))
        .run(&mut out)
        .await
        .unwrap();
    (summary, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn runs_unskipped_and_collects_failures() {
    let skipped_calls = Arc::new(AtomicUsize::new(0));
    let scenarios = vec![
        ok("A"),
        failing("B"),
        counted_ok("C", &skipped_calls).skipped(),
    ];

    let (summary, output) = run(&scenarios, Some("")).await;

    assert_eq!(summary.executed, 2);
    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.exit_code(), 1);
    assert_eq!(skipped_calls.load(Ordering::SeqCst), 0);

    assert!(output.contains("[001] A\nfine\nTime: "));
    assert!(output.contains("[002] B\nError: failed to read missing.png: gone\nTime: "));
    assert!(output.contains("[003] C\n====> SKIP\n\n"));
    assert!(output.contains("Total 2 scenario executed in "));
}

#[tokio::test]
async fn name_filter_runs_only_matching() {
    let scenarios = vec![ok("A"), failing("B"), ok("C").skipped()];

    let (summary, output) = run(&scenarios, Some("A")).await;

    assert_eq!(summary.executed, 1);
    assert_eq!(summary.exit_code(), 0);
    assert!(output.contains("[002] B\n====> SKIP"));
}

#[tokio::test]
async fn index_filter_matches_position() {
    let calls = Arc::new(AtomicUsize::new(0));
    let scenarios = vec![counted_ok("A", &calls), failing("B")];

    let (summary, _) = run(&scenarios, Some("1")).await;

    assert_eq!(summary.executed, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(summary.is_success());
}

#[tokio::test]
async fn unmatched_filter_skips_everything() {
    let scenarios = vec![ok("A"), failing("B")];

    let (summary, output) = run(&scenarios, Some("nothing-matches")).await;

    assert_eq!(summary.executed, 0);
    assert_eq!(summary.exit_code(), 0);
    assert_eq!(output.matches("====> SKIP").count(), 2);
    assert!(output.contains("Total 0 scenario executed in 0ns."));
}

#[tokio::test]
async fn skip_marker_wins_over_matching_filter() {
    let calls = Arc::new(AtomicUsize::new(0));
    let scenarios = vec![counted_ok("gpt4", &calls).skipped()];

    let (summary, _) = run(&scenarios, Some("gpt4")).await;

    assert_eq!(summary.executed, 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn api_errors_print_structured_fields() {
    let scenarios = vec![Scenario::new("chat", |_| {
        async {
            Err(ScenarioError::Client(genai_client::Error::Api(ApiError {
                status_code: 401,
                status: "401 Unauthorized".to_string(),
                kind: "invalid_request_error".to_string(),
                message: "Incorrect API key provided".to_string(),
                code: Some("invalid_api_key".to_string()),
                param: None,
            })))
        }
        .boxed()
    })];

    let (summary, output) = run(&scenarios, None).await;

    assert_eq!(summary.errors.len(), 1);
    assert!(output.contains("Error: API error (401 Unauthorized): Incorrect API key provided"));
    assert!(output.contains("Status:     401 Unauthorized\n"));
    assert!(output.contains("Type:       invalid_request_error\n"));
    assert!(output.contains("Code:       invalid_api_key\n"));
    assert!(output.contains("Param:      \n"));
}

#[tokio::test]
async fn stream_failures_report_partial_text() {
    let scenarios = vec![Scenario::new("stream", |_| {
        async {
            Err(ScenarioError::Stream {
                partial: "On this dáy".to_string(),
                source: genai_client::Error::Stream("connection reset".to_string()),
            })
        }
        .boxed()
    })];

    let (summary, output) = run(&scenarios, None).await;

    assert_eq!(summary.exit_code(), 1);
    assert!(output.contains("Error: stream failed after 12 bytes of output: "));
    assert!(output.contains("\nPartial:    11 chars received\nTime: "));
}

#[test]
fn list_enumerates_registry_in_order() {
    let scenarios = vec![ok("A"), failing("B"), ok("C").skipped()];
    let mut out = Vec::new();

    runner::list(&scenarios, &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        " 1 A\n 2 B\n 3 [SKIP] C\n"
    );
}
