//! Scriptable in-memory Activity Directory API for tests

use futures::channel::oneshot;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::{ErrorKind, Result};
use crate::interface::ActivityApi;
use crate::model::dtos::{MembershipParams, SignupResponse};

/// A request the mock received, in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    FetchDirectory,
    Signup { activity_id: String, email: String },
    Unregister { activity_id: String, email: String },
}

/// Scripted answer for one signup or unregister call
#[derive(Debug, Clone)]
pub enum MockReply {
    Accept,
    /// 2xx with this body message
    AcceptWith(String),
    Reject { status: u16, detail: Option<String> },
    Unreachable,
}

impl MockReply {
    pub fn reject(status: u16, detail: &str) -> Self {
        MockReply::Reject {
            status,
            detail: Some(detail.to_string()),
        }
    }
}

/// Mock API. The directory is unreachable unless one is configured, and
/// signup/unregister calls are accepted unless a reply is queued.
#[derive(Default)]
pub struct MockApi {
    directory: Option<Value>,
    signup_replies: RefCell<VecDeque<MockReply>>,
    unregister_replies: RefCell<VecDeque<MockReply>>,
    calls: RefCell<Vec<ApiCall>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directory(mut self, directory: Value) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn then_signup(self, reply: MockReply) -> Self {
        self.signup_replies.borrow_mut().push_back(reply);
        self
    }

    pub fn then_unregister(self, reply: MockReply) -> Self {
        self.unregister_replies.borrow_mut().push_back(reply);
        self
    }

    /// Keeps the next call in flight until the returned sender fires or is
    /// dropped.
    pub fn hold_next_call(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        tx
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    pub fn membership_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| !matches!(c, ApiCall::FetchDirectory))
            .count()
    }

    async fn arrive(&self, call: ApiCall) {
        self.calls.borrow_mut().push(call);
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }

    fn answer(reply: Option<MockReply>) -> Result<Option<String>> {
        match reply.unwrap_or(MockReply::Accept) {
            MockReply::Accept => Ok(None),
            MockReply::AcceptWith(message) => Ok(Some(message)),
            MockReply::Reject { status, detail } => {
                Err(ErrorKind::RequestRejected { status, detail }.into())
            }
            MockReply::Unreachable => {
                Err(ErrorKind::TransportError("connection refused".to_string()).into())
            }
        }
    }
}

impl ActivityApi for MockApi {
    async fn fetch_directory(&self) -> Result<Value> {
        self.arrive(ApiCall::FetchDirectory).await;
        self.directory
            .clone()
            .ok_or_else(|| ErrorKind::TransportError("directory unreachable".to_string()).into())
    }

    async fn signup(&self, params: MembershipParams<'_>) -> Result<SignupResponse> {
        self.arrive(ApiCall::Signup {
            activity_id: params.activity_id.to_string(),
            email: params.email.to_string(),
        })
        .await;

        let reply = self.signup_replies.borrow_mut().pop_front();
        let message = Self::answer(reply)?;
        Ok(SignupResponse { message })
    }

    async fn unregister(&self, params: MembershipParams<'_>) -> Result<()> {
        self.arrive(ApiCall::Unregister {
            activity_id: params.activity_id.to_string(),
            email: params.email.to_string(),
        })
        .await;

        let reply = self.unregister_replies.borrow_mut().pop_front();
        Self::answer(reply).map(|_| ())
    }
}
