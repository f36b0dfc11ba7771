//! Per-run completion tracking.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Counts dispatched items and wakes one waiter once all have reported.
///
/// Created fresh for every batch run. Workers report through a
/// [`GateTicket`], which reports failure if dropped without an explicit
/// result, so a panicking worker still settles its item.
#[derive(Debug, Default)]
pub struct CompletionGate {
    pending: AtomicUsize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
    notify: Notify,
}

impl CompletionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one more in-flight item.
    pub fn dispatch(self: &Arc<Self>) -> GateTicket {
        self.pending.fetch_add(1, Ordering::SeqCst);
        GateTicket {
            gate: Arc::clone(self),
            settled: false,
        }
    }

    fn settle(&self, counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.notify.notify_one();
        }
    }

    /// Wait until every dispatched item has reported.
    ///
    /// Returns immediately when nothing is pending.
    pub async fn wait(&self) {
        while self.pending.load(Ordering::SeqCst) > 0 {
            self.notify.notified().await;
        }
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded.load(Ordering::SeqCst)
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }
}

/// One dispatched item's obligation to report back.
#[derive(Debug)]
pub struct GateTicket {
    gate: Arc<CompletionGate>,
    settled: bool,
}

impl GateTicket {
    pub fn succeed(mut self) {
        self.settled = true;
        self.gate.settle(&self.gate.succeeded);
    }

    pub fn fail(mut self) {
        self.settled = true;
        self.gate.settle(&self.gate.failed);
    }
}

impl Drop for GateTicket {
    fn drop(&mut self) {
        if !self.settled {
            self.gate.settle(&self.gate.failed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_without_items() {
        let gate = CompletionGate::new();
        gate.wait().await;
        assert_eq!(gate.pending.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_counts() {
        let gate = Arc::new(CompletionGate::new());
        gate.dispatch().succeed();
        gate.dispatch().fail();
        gate.dispatch().succeed();
        gate.wait().await;
        assert_eq!(gate.succeeded(), 2);
        assert_eq!(gate.failed(), 1);
        assert_eq!(gate.pending.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dropped_ticket_counts_as_failure() {
        let gate = Arc::new(CompletionGate::new());
        drop(gate.dispatch());
        gate.wait().await;
        assert_eq!(gate.failed(), 1);
        assert_eq!(gate.succeeded(), 0);
    }

    #[tokio::test]
    async fn test_panicking_holder_counts_as_failure() {
        let gate = Arc::new(CompletionGate::new());
        let ticket = gate.dispatch();
        let handle = tokio::spawn(async move {
            let _ticket = ticket;
            panic!("worker blew up");
        });
        assert!(handle.await.unwrap_err().is_panic());
        gate.wait().await;
        assert_eq!(gate.failed(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reports() {
        let gate = Arc::new(CompletionGate::new());
        let items = 64;

        let mut handles = Vec::new();
        for i in 0..items {
            let ticket = gate.dispatch();
            handles.push(tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis((i % 5) as u64)).await;
                if i % 4 == 0 {
                    ticket.fail();
                } else {
                    ticket.succeed();
                }
            }));
        }

        tokio::time::timeout(Duration::from_secs(5), gate.wait())
            .await
            .unwrap();
        assert_eq!(gate.succeeded() + gate.failed(), items);
        assert_eq!(gate.failed(), 16);
        for handle in handles {
            handle.await.unwrap();
        }
    }
}
