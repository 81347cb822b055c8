#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use serde_json::{Value, json};

use gh_stats::Result;
use gh_stats::feed::{Transport, TransportResponse};

/// Builds one feed event record in the wire format.
pub fn event(event_type: &str, created_at: &str, repo: &str, payload: Value) -> Value {
    json!({
        "type": event_type,
        "created_at": created_at,
        "repo": {"name": repo},
        "payload": payload,
    })
}

pub fn push(created_at: &str, repo: &str, size: u64) -> Value {
    event("PushEvent", created_at, repo, json!({"size": size}))
}

pub fn pull_request(created_at: &str, repo: &str, commits: u64) -> Value {
    event(
        "PullRequestEvent",
        created_at,
        repo,
        json!({"pull_request": {"commits": commits}}),
    )
}

pub fn create(created_at: &str, repo: &str, ref_type: &str) -> Value {
    event("CreateEvent", created_at, repo, json!({"ref_type": ref_type}))
}

/// Payload-less event such as `WatchEvent` or `ForkEvent`.
pub fn simple(event_type: &str, created_at: &str, repo: &str) -> Value {
    event(event_type, created_at, repo, json!({}))
}

/// Scripted transport: serves a fixed page sequence and records how it
/// was called.
pub struct MockTransport {
    responses: RefCell<VecDeque<Result<TransportResponse>>>,
    calls: Cell<usize>,
    last_token: RefCell<Option<String>>,
    first_url: RefCell<Option<String>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<TransportResponse>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: Cell::new(0),
            last_token: RefCell::new(None),
            first_url: RefCell::new(None),
        }
    }

    /// One page carrying `events`, with no further page advertised.
    pub fn single_page(events: &[Value]) -> Self {
        Self::new(vec![Ok(page(events, None))])
    }

    /// A page sequence; every page but the last advertises a next cursor.
    pub fn paged(pages: Vec<Vec<Value>>) -> Self {
        let last = pages.len().saturating_sub(1);
        let responses = pages
            .into_iter()
            .enumerate()
            .map(|(i, events)| {
                let next = (i != last).then(|| format!("https://feed.test/page{}", i + 2));
                Ok(page(&events, next.as_deref()))
            })
            .collect();
        Self::new(responses)
    }

    pub fn call_count(&self) -> usize {
        self.calls.get()
    }

    pub fn last_token(&self) -> Option<String> {
        self.last_token.borrow().clone()
    }

    pub fn first_url(&self) -> Option<String> {
        self.first_url.borrow().clone()
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str, token: Option<&str>) -> Result<TransportResponse> {
        if self.calls.get() == 0 {
            *self.first_url.borrow_mut() = Some(url.to_string());
        }
        self.calls.set(self.calls.get() + 1);
        *self.last_token.borrow_mut() = token.map(str::to_string);
        self.responses
            .borrow_mut()
            .pop_front()
            .expect("run fetched more pages than the test scripted")
    }
}

/// Wraps a slice of events into a transport response body.
pub fn page(events: &[Value], next: Option<&str>) -> TransportResponse {
    TransportResponse {
        body: Value::Array(events.to_vec()).to_string(),
        next: next.map(str::to_string),
    }
}
