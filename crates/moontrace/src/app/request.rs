//! Serialization of assistant requests.
//!
//! At most one request runs at a time; later submissions wait in FIFO order.

use std::collections::VecDeque;

use crate::infra::assistant::AssistantRequest;

/// Monotonic identifier attached to every submitted request.
pub type RequestId = u64;

/// What happened to a newly submitted request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Nothing was running, so the caller must start this request now.
    Start(RequestId, AssistantRequest),
    /// Another request is running; this one waits at `position` (1-based).
    Queued { id: RequestId, position: usize },
}

/// FIFO queue with a single active slot.
#[derive(Debug, Default)]
pub struct RequestQueue {
    active: Option<RequestId>,
    next_id: RequestId,
    pending: VecDeque<(RequestId, AssistantRequest)>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns an id to `request` and either activates or enqueues it.
    pub fn submit(&mut self, request: AssistantRequest) -> Submission {
        self.next_id += 1;
        let id = self.next_id;

        if self.active.is_none() {
            self.active = Some(id);

            return Submission::Start(id, request);
        }

        self.pending.push_back((id, request));

        Submission::Queued {
            id,
            position: self.pending.len(),
        }
    }

    /// Clears the active slot for `id` and returns the next request to start.
    ///
    /// Finishing an id that is not active changes nothing.
    pub fn finish(&mut self, id: RequestId) -> Option<(RequestId, AssistantRequest)> {
        if self.active != Some(id) {
            return None;
        }

        let next = self.pending.pop_front();
        self.active = next.as_ref().map(|(next_id, _)| *next_id);

        next
    }

    /// Returns whether `id` is the running request.
    pub fn is_active(&self, id: RequestId) -> bool {
        self.active == Some(id)
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
