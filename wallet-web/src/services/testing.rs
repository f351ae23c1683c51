//! Fake collaborators for unit tests: a scriptable wallet connector, an
//! in-memory flag store and a scriptable DAO API. All substitute the real
//! implementations behind the same traits the production code uses.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use shared::dto::dao::{ApprovalRequest, ApprovalResponse, ScoreRequest, ScoreResponse, VoteTally};

use super::api::DaoApi;
use super::autoconnect::FlagStore;
use super::connector::{
    ConnectorDescriptor, ConnectorKind, LocalBoxFuture, WalletConnector, WalletError,
};

// ---------------------------------------------------------------------------
// Manual polling helpers
// ---------------------------------------------------------------------------

fn noop_raw_waker() -> RawWaker {
    fn clone(_: *const ()) -> RawWaker {
        noop_raw_waker()
    }
    fn no_op(_: *const ()) {}
    static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
    RawWaker::new(std::ptr::null(), &VTABLE)
}

pub fn noop_waker() -> Waker {
    // SAFETY: the vtable functions never dereference the null data pointer.
    unsafe { Waker::from_raw(noop_raw_waker()) }
}

/// Poll a future once without an executor. Tests use this to interleave an
/// unresolved connect attempt with pushed provider events.
pub fn poll_once<F: Future>(fut: &mut Pin<Box<F>>) -> Poll<F::Output> {
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    fut.as_mut().poll(&mut cx)
}

/// Future that stays pending while its gate is closed. Polled manually, so
/// it never registers a waker.
struct GatedFuture<T> {
    gate: Rc<Cell<bool>>,
    value: Option<T>,
}

impl<T: Unpin> Future for GatedFuture<T> {
    type Output = T;

    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<T> {
        if self.gate.get() {
            Poll::Ready(self.value.take().expect("gated future polled after completion"))
        } else {
            Poll::Pending
        }
    }
}

// ---------------------------------------------------------------------------
// Fake connector
// ---------------------------------------------------------------------------

pub struct FakeConnector {
    descriptor: ConnectorDescriptor,
    request_results: RefCell<VecDeque<Result<Vec<String>, WalletError>>>,
    authorized_result: RefCell<Result<Vec<String>, WalletError>>,
    request_count: Cell<usize>,
    authorized_count: Cell<usize>,
    gate: Rc<Cell<bool>>,
}

impl FakeConnector {
    pub fn available(id: &str, kind: ConnectorKind) -> Self {
        Self::new(id, kind, true)
    }

    pub fn unavailable(id: &str, kind: ConnectorKind) -> Self {
        Self::new(id, kind, false)
    }

    fn new(id: &str, kind: ConnectorKind, is_available: bool) -> Self {
        Self {
            descriptor: ConnectorDescriptor {
                id: id.to_string(),
                display_name: id.to_string(),
                kind,
                is_available,
            },
            request_results: RefCell::new(VecDeque::new()),
            authorized_result: RefCell::new(Ok(Vec::new())),
            request_count: Cell::new(0),
            authorized_count: Cell::new(0),
            gate: Rc::new(Cell::new(true)),
        }
    }

    /// Queue the outcome of the next `request_accounts` call.
    pub fn push_request_result(&self, result: Result<Vec<String>, WalletError>) {
        self.request_results.borrow_mut().push_back(result);
    }

    /// Set the outcome of silent `authorized_accounts` probes.
    pub fn set_authorized(&self, result: Result<Vec<String>, WalletError>) {
        *self.authorized_result.borrow_mut() = result;
    }

    /// Keep `request_accounts` futures pending until [`Self::release`].
    pub fn hold(&self) {
        self.gate.set(false);
    }

    pub fn release(&self) {
        self.gate.set(true);
    }

    pub fn request_count(&self) -> usize {
        self.request_count.get()
    }

    pub fn authorized_count(&self) -> usize {
        self.authorized_count.get()
    }
}

impl WalletConnector for FakeConnector {
    fn descriptor(&self) -> ConnectorDescriptor {
        self.descriptor.clone()
    }

    fn request_accounts(&self) -> LocalBoxFuture<'_, Result<Vec<String>, WalletError>> {
        self.request_count.set(self.request_count.get() + 1);
        let result = self
            .request_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()));
        Box::pin(GatedFuture {
            gate: self.gate.clone(),
            value: Some(result),
        })
    }

    fn authorized_accounts(&self) -> LocalBoxFuture<'_, Result<Vec<String>, WalletError>> {
        self.authorized_count.set(self.authorized_count.get() + 1);
        let result = self.authorized_result.borrow().clone();
        Box::pin(GatedFuture {
            gate: self.gate.clone(),
            value: Some(result),
        })
    }
}

// ---------------------------------------------------------------------------
// In-memory flag store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryFlags {
    values: RefCell<HashMap<String, String>>,
}

impl FlagStore for MemoryFlags {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

// ---------------------------------------------------------------------------
// Fake DAO API
// ---------------------------------------------------------------------------

pub struct FakeDaoApi {
    pub score: Cell<f64>,
    pub approve_results: RefCell<VecDeque<Result<ApprovalResponse, String>>>,
    pub score_calls: Cell<usize>,
    pub approve_calls: Cell<usize>,
    gate: Rc<Cell<bool>>,
}

impl FakeDaoApi {
    pub fn new(score: f64) -> Self {
        Self {
            score: Cell::new(score),
            approve_results: RefCell::new(VecDeque::new()),
            score_calls: Cell::new(0),
            approve_calls: Cell::new(0),
            gate: Rc::new(Cell::new(true)),
        }
    }

    pub fn approval_response(approved: bool) -> ApprovalResponse {
        ApprovalResponse {
            approved,
            tx_ref: "0xcafebabecafebabecafebabecafebabe".to_string(),
            votes: VoteTally {
                yes: if approved { 10 } else { 2 },
                no: if approved { 2 } else { 10 },
                quorum: 10,
            },
            timestamp: chrono::Utc::now(),
        }
    }

    /// Keep API futures pending until [`Self::release`].
    pub fn hold(&self) {
        self.gate.set(false);
    }

    pub fn release(&self) {
        self.gate.set(true);
    }
}

impl DaoApi for FakeDaoApi {
    fn fetch_score(
        &self,
        _request: ScoreRequest,
    ) -> LocalBoxFuture<'_, Result<ScoreResponse, String>> {
        self.score_calls.set(self.score_calls.get() + 1);
        let score = self.score.get();
        Box::pin(GatedFuture {
            gate: self.gate.clone(),
            value: Some(Ok(ScoreResponse { score })),
        })
    }

    fn submit_approval(
        &self,
        _request: ApprovalRequest,
    ) -> LocalBoxFuture<'_, Result<ApprovalResponse, String>> {
        self.approve_calls.set(self.approve_calls.get() + 1);
        let result = self
            .approve_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Self::approval_response(true)));
        Box::pin(GatedFuture {
            gate: self.gate.clone(),
            value: Some(result),
        })
    }
}
