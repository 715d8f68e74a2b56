//! Scripted `HttpClient` used by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::utils::{HttpClient, HttpResponse};

#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, String),
    Transport(String),
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Reply::Status(200, body.to_string())
    }

    pub fn status(status: u16) -> Self {
        Reply::Status(status, String::new())
    }

    pub fn transport(message: &str) -> Self {
        Reply::Transport(message.to_string())
    }
}

struct Route {
    pattern: String,
    replies: VecDeque<Reply>,
}

/// Answers requests by the first route whose pattern occurs in the URL.
///
/// A route replays its queued replies in order and repeats the last one.
/// Unmatched URLs get a transport error.
#[derive(Default)]
pub struct StubClient {
    routes: Mutex<Vec<Route>>,
    calls: Mutex<Vec<String>>,
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, pattern: &str, replies: Vec<Reply>) -> Self {
        self.routes.lock().unwrap().push(Route {
            pattern: pattern.to_string(),
            replies: replies.into(),
        });
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pattern: &str) -> usize {
        self.calls()
            .iter()
            .filter(|url| url.contains(pattern))
            .count()
    }
}

#[async_trait]
impl HttpClient for StubClient {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.calls.lock().unwrap().push(url.to_string());

        let reply = {
            let mut routes = self.routes.lock().unwrap();
            routes
                .iter_mut()
                .find(|route| url.contains(&route.pattern))
                .and_then(|route| {
                    if route.replies.len() > 1 {
                        route.replies.pop_front()
                    } else {
                        route.replies.front().cloned()
                    }
                })
        };

        match reply {
            Some(Reply::Status(status, body)) => Ok(HttpResponse::new(status, body)),
            Some(Reply::Transport(message)) => Err(AppError::Transport(message)),
            None => Err(AppError::transport(format!("no stub route for {url}"))),
        }
    }
}
