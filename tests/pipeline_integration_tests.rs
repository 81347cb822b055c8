mod common;

use chrono::NaiveDate;

use gh_stats::GhStatsError;
use gh_stats::feed::{self, CancelToken, FeedConfig};
use gh_stats::output::{JsonFormatter, ReportFormatter, TextFormatter};
use gh_stats::stats::ReferenceDate;

use common::{MockTransport, create, page, pull_request, push, simple};

fn reference() -> ReferenceDate {
    ReferenceDate::from_date(NaiveDate::from_ymd_opt(2026, 2, 12).unwrap())
}

fn small_pages() -> FeedConfig {
    FeedConfig {
        api_root: "https://feed.test".to_string(),
        page_size: 2,
    }
}

#[test]
fn five_event_fixture_aggregates_to_seventy_two() {
    let transport = MockTransport::single_page(&[
        push("2026-02-12T09:00:00Z", "ttibsi/gh-stats", 54),
        pull_request("2026-02-10T12:00:00Z", "ttibsi/advent-of-code", 13),
        push("2026-01-20T18:30:00Z", "ttibsi/dotfiles", 3),
        simple("WatchEvent", "2026-02-12T10:00:00Z", "bashbunni/dotfiles"),
        simple("ForkEvent", "2026-01-02T08:00:00Z", "clarkdave/cancellation-checker"),
    ]);

    let block = feed::run(
        "ttibsi",
        &transport,
        None,
        reference(),
        &CancelToken::new(),
        &FeedConfig::default(),
    )
    .unwrap();

    assert_eq!(block.total_count, 72);
    assert_eq!(block.per_repo.len(), 5);
    assert_eq!(block.most_active_repo().unwrap(), ("ttibsi/gh-stats", 54));
    assert_eq!(block.new_repo_count, 0);
    assert!(!block.partial);
}

#[test]
fn run_builds_the_start_cursor_from_the_config() {
    let transport = MockTransport::single_page(&[]);

    feed::run(
        "octocat",
        &transport,
        None,
        reference(),
        &CancelToken::new(),
        &small_pages(),
    )
    .unwrap();

    assert_eq!(
        transport.first_url().as_deref(),
        Some("https://feed.test/users/octocat/events?per_page=2")
    );
}

#[test]
fn run_passes_the_token_to_the_transport() {
    let transport = MockTransport::single_page(&[]);

    feed::run(
        "octocat",
        &transport,
        Some("ghp_example"),
        reference(),
        &CancelToken::new(),
        &small_pages(),
    )
    .unwrap();

    assert_eq!(transport.last_token().as_deref(), Some("ghp_example"));
}

#[test]
fn pagination_stops_at_the_year_boundary() {
    // Page 1 is full and advertises page 2, but its last event crossed
    // into the previous year: page 2 must never be requested.
    let transport = MockTransport::new(vec![Ok(page(
        &[
            push("2026-01-05T09:00:00Z", "a/a", 4),
            push("2025-12-30T09:00:00Z", "a/a", 6),
        ],
        Some("https://feed.test/page2"),
    ))]);

    let block = feed::run(
        "octocat",
        &transport,
        None,
        reference(),
        &CancelToken::new(),
        &small_pages(),
    )
    .unwrap();

    assert_eq!(transport.call_count(), 1);
    assert_eq!(block.total_count, 4);
}

#[test]
fn short_page_ends_the_run_for_a_new_account() {
    let transport = MockTransport::single_page(&[
        push("2026-02-12T09:00:00Z", "new/repo", 1),
        create("2026-02-11T09:00:00Z", "new/repo", "repository"),
        create("2026-02-11T08:59:00Z", "new/repo", "branch"),
    ]);

    let block = feed::run(
        "newcomer",
        &transport,
        None,
        reference(),
        &CancelToken::new(),
        &FeedConfig::default(),
    )
    .unwrap();

    assert_eq!(transport.call_count(), 1);
    assert_eq!(block.total_count, 3);
    assert_eq!(block.new_repo_count, 1);
}

#[test]
fn full_pages_are_followed_until_the_feed_is_exhausted() {
    let transport = MockTransport::paged(vec![
        vec![
            push("2026-02-12T09:00:00Z", "a/a", 2),
            push("2026-02-11T09:00:00Z", "b/b", 3),
        ],
        vec![
            push("2026-02-10T09:00:00Z", "a/a", 4),
            push("2026-02-09T09:00:00Z", "b/b", 5),
        ],
        vec![push("2026-02-08T09:00:00Z", "a/a", 6)],
    ]);

    let block = feed::run(
        "octocat",
        &transport,
        None,
        reference(),
        &CancelToken::new(),
        &small_pages(),
    )
    .unwrap();

    assert_eq!(transport.call_count(), 3);
    assert_eq!(block.total_count, 20);
    assert_eq!(block.per_repo["a/a"], 12);
    assert_eq!(block.per_repo["b/b"], 8);

    let per_repo_sum: u64 = block.per_repo.values().sum();
    assert_eq!(per_repo_sum, block.total_count);
}

#[test]
fn cancelled_run_returns_a_partial_block_without_fetching() {
    let transport = MockTransport::new(vec![]);
    let cancel = CancelToken::new();
    cancel.cancel();

    let block = feed::run(
        "octocat",
        &transport,
        None,
        reference(),
        &cancel,
        &small_pages(),
    )
    .unwrap();

    assert_eq!(transport.call_count(), 0);
    assert!(block.partial);
}

#[test]
fn malformed_payload_aborts_the_whole_run() {
    let transport = MockTransport::single_page(&[common::event(
        "PushEvent",
        "2026-02-12T09:00:00Z",
        "a/a",
        serde_json::json!({}),
    )]);

    let err = feed::run(
        "octocat",
        &transport,
        None,
        reference(),
        &CancelToken::new(),
        &FeedConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(err, GhStatsError::MalformedEvent { .. }));
}

#[test]
fn transient_failure_is_reported_retryable() {
    let transport = MockTransport::new(vec![Err(GhStatsError::TransientFetch(
        "HTTP 429 (rate limited)".to_string(),
    ))]);

    let err = feed::run(
        "octocat",
        &transport,
        None,
        reference(),
        &CancelToken::new(),
        &FeedConfig::default(),
    )
    .unwrap_err();

    assert!(err.is_retryable());
}

#[test]
fn aggregated_run_renders_through_the_text_formatter() {
    let transport = MockTransport::single_page(&[
        push("2026-02-12T09:00:00Z", "ttibsi/gh-stats", 54),
        create("2026-02-01T09:00:00Z", "ttibsi/fresh", "repository"),
    ]);

    let block = feed::run(
        "ttibsi",
        &transport,
        None,
        reference(),
        &CancelToken::new(),
        &FeedConfig::default(),
    )
    .unwrap();

    let output = TextFormatter::new(true).format(&block).unwrap();
    assert!(output.contains("====== 2026-02-12 ======"));
    assert!(output.contains("GitHub interactions: 55"));
    assert!(output.contains("Monthly interactions (Feb): 55"));
    assert!(output.contains("Most active repo (ttibsi/gh-stats): 54"));
    assert!(output.contains("Repos created this year: 1"));
    assert!(output.contains("Interactions today: 54"));
}

#[test]
fn aggregated_run_renders_through_the_json_formatter() {
    let transport = MockTransport::single_page(&[
        push("2026-02-12T09:00:00Z", "ttibsi/gh-stats", 54),
        simple("WatchEvent", "2026-02-12T10:00:00Z", "bashbunni/dotfiles"),
    ]);

    let block = feed::run(
        "ttibsi",
        &transport,
        None,
        reference(),
        &CancelToken::new(),
        &FeedConfig::default(),
    )
    .unwrap();

    let output = JsonFormatter.format(&block).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["total_count"], 55);
    assert_eq!(json["daily_count"], 55);
    assert_eq!(json["events_by_type"]["PushEvent"], 1);
    assert_eq!(json["events_by_type"]["WatchEvent"], 1);
    assert_eq!(json["most_active_repo"]["name"], "ttibsi/gh-stats");
}
