use std::future::Future;
use tokio::task::AbortHandle;

/// Identifies one network request; ids only grow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RequestIds {
    next: u64,
}

impl RequestIds {
    pub fn next_id(&mut self) -> RequestId {
        self.next += 1;
        RequestId(self.next)
    }
}

/// A spawned request task. Dropping it aborts the task, which drops the
/// request future and with it the underlying connection.
#[derive(Debug)]
pub struct InFlight {
    id: RequestId,
    handle: AbortHandle,
}

impl InFlight {
    pub fn spawn<F>(id: RequestId, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future).abort_handle();
        Self { id, handle }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        // No-op when the task already finished
        self.handle.abort();
    }
}
