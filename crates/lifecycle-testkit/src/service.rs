//! In-memory mock of the remote resource service.
//!
//! Uses `std::sync::Mutex` because this is test infrastructure: calls are
//! short, uncontended, and a synchronous API keeps the `Execute` blocking
//! path honest. Every call is recorded with a monotonically increasing
//! sequence number so tests can prove ordering and at-most-once properties.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lifecycle_harness::{DispatchFailure, DispatchResult, Execute};

use crate::requests::{CreateRequest, DeleteRequest, ExistsRequest, ReadRequest, UpdateRequest};
use crate::responses::{
    CreateResponse, DeleteResponse, ExistsResponse, ReadResponse, UpdateResponse,
};

/// The kind of service call, for log filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OpKind {
    /// Resource creation.
    Create,
    /// Resource read-back.
    Read,
    /// Resource update.
    Update,
    /// Existence check.
    Exists,
    /// Resource deletion.
    Delete,
}

/// One recorded service call.
#[derive(Debug, Clone)]
pub struct CallRecord {
    /// Position in the global dispatch order (1-based).
    pub seq: u64,
    /// What kind of call this was.
    pub kind: OpKind,
    /// The identifier it targeted.
    pub id: String,
}

#[derive(Debug, Default)]
struct MockState {
    resources: HashMap<String, String>,
    next_seq: u64,
    log: Vec<CallRecord>,
    failing: BTreeSet<OpKind>,
}

/// In-memory resource service with full call instrumentation.
#[derive(Debug, Default)]
pub struct MockService {
    state: Mutex<MockState>,
}

impl MockService {
    /// A fresh, empty service.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent call of the given kind fail at the capability
    /// boundary.
    pub fn inject_failure(&self, kind: OpKind) {
        self.locked().failing.insert(kind);
    }

    /// Total number of calls dispatched so far.
    pub fn dispatch_count(&self) -> u64 {
        self.locked().next_seq
    }

    /// Number of calls of one kind.
    pub fn count_of(&self, kind: OpKind) -> usize {
        self.locked().log.iter().filter(|r| r.kind == kind).count()
    }

    /// The full dispatch log, in order.
    pub fn records(&self) -> Vec<CallRecord> {
        self.locked().log.clone()
    }

    /// The dispatch log filtered to one kind, in order.
    pub fn records_of(&self, kind: OpKind) -> Vec<CallRecord> {
        self.locked()
            .log
            .iter()
            .filter(|r| r.kind == kind)
            .cloned()
            .collect()
    }

    /// Sequence number of the first call of one kind, if any happened.
    pub fn first_seq_of(&self, kind: OpKind) -> Option<u64> {
        self.locked()
            .log
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| r.seq)
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, MockState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn check_failure(state: &MockState, kind: OpKind) -> Result<(), DispatchFailure> {
        if state.failing.contains(&kind) {
            Err(DispatchFailure::new(format!(
                "injected {:?} failure",
                kind
            )))
        } else {
            Ok(())
        }
    }

    fn record(state: &mut MockState, kind: OpKind, id: &str) {
        state.next_seq += 1;
        let seq = state.next_seq;
        tracing::trace!(seq, ?kind, id, "mock service call");
        state.log.push(CallRecord {
            seq,
            kind,
            id: id.to_owned(),
        });
    }

    fn create(&self, req: CreateRequest) -> DispatchResult {
        let mut state = self.locked();
        Self::record(&mut state, OpKind::Create, &req.id);
        Self::check_failure(&state, OpKind::Create)?;
        state.resources.insert(req.id.clone(), req.payload);
        Ok(Box::new(CreateResponse {
            acknowledged: true,
            id: req.id,
        }))
    }

    fn read(&self, req: ReadRequest) -> DispatchResult {
        let mut state = self.locked();
        Self::record(&mut state, OpKind::Read, &req.id);
        Self::check_failure(&state, OpKind::Read)?;
        let payload = state.resources.get(&req.id).cloned();
        Ok(Box::new(ReadResponse {
            found: payload.is_some(),
            payload,
            id: req.id,
        }))
    }

    fn update(&self, req: UpdateRequest) -> DispatchResult {
        let mut state = self.locked();
        Self::record(&mut state, OpKind::Update, &req.id);
        Self::check_failure(&state, OpKind::Update)?;
        let acknowledged = match state.resources.get_mut(&req.id) {
            Some(slot) => {
                *slot = req.payload;
                true
            }
            None => false,
        };
        Ok(Box::new(UpdateResponse {
            acknowledged,
            id: req.id,
        }))
    }

    fn exists(&self, req: ExistsRequest) -> DispatchResult {
        let mut state = self.locked();
        Self::record(&mut state, OpKind::Exists, &req.id);
        Self::check_failure(&state, OpKind::Exists)?;
        let exists = state.resources.contains_key(&req.id);
        Ok(Box::new(ExistsResponse { exists, id: req.id }))
    }

    fn delete(&self, req: DeleteRequest) -> DispatchResult {
        let mut state = self.locked();
        Self::record(&mut state, OpKind::Delete, &req.id);
        Self::check_failure(&state, OpKind::Delete)?;
        let acknowledged = state.resources.remove(&req.id).is_some();
        Ok(Box::new(DeleteResponse {
            acknowledged,
            id: req.id,
        }))
    }
}

#[async_trait]
impl Execute<CreateRequest> for MockService {
    fn execute(&self, req: CreateRequest) -> DispatchResult {
        self.create(req)
    }
    async fn execute_async(&self, req: CreateRequest) -> DispatchResult {
        tokio::task::yield_now().await;
        self.create(req)
    }
}

#[async_trait]
impl Execute<ReadRequest> for MockService {
    fn execute(&self, req: ReadRequest) -> DispatchResult {
        self.read(req)
    }
    async fn execute_async(&self, req: ReadRequest) -> DispatchResult {
        tokio::task::yield_now().await;
        self.read(req)
    }
}

#[async_trait]
impl Execute<UpdateRequest> for MockService {
    fn execute(&self, req: UpdateRequest) -> DispatchResult {
        self.update(req)
    }
    async fn execute_async(&self, req: UpdateRequest) -> DispatchResult {
        tokio::task::yield_now().await;
        self.update(req)
    }
}

#[async_trait]
impl Execute<ExistsRequest> for MockService {
    fn execute(&self, req: ExistsRequest) -> DispatchResult {
        self.exists(req)
    }
    async fn execute_async(&self, req: ExistsRequest) -> DispatchResult {
        tokio::task::yield_now().await;
        self.exists(req)
    }
}

#[async_trait]
impl Execute<DeleteRequest> for MockService {
    fn execute(&self, req: DeleteRequest) -> DispatchResult {
        self.delete(req)
    }
    async fn execute_async(&self, req: DeleteRequest) -> DispatchResult {
        tokio::task::yield_now().await;
        self.delete(req)
    }
}
