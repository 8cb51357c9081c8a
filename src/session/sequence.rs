use std::sync::atomic::{AtomicU64, Ordering};

use crate::prelude::*;

/// Identifies a single resolution request.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, derive_more::Display)]
pub struct Ticket(u64);

/// Last-result-wins ordering of concurrent resolutions.
///
/// Every request takes a ticket, and a completed result is only accepted if no newer
/// request has been issued since.
#[derive(Debug, Default)]
pub struct RequestSequence(AtomicU64);

impl RequestSequence {
    pub fn issue(&self) -> Ticket {
        Ticket(self.0.fetch_add(1, Ordering::AcqRel) + 1)
    }

    #[must_use]
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.0.load(Ordering::Acquire) == ticket.0
    }

    /// Pass the result through only if it answers the latest request.
    pub fn accept<T>(&self, ticket: Ticket, result: T) -> Option<T> {
        if self.is_latest(ticket) {
            Some(result)
        } else {
            debug!(%ticket, latest = self.0.load(Ordering::Acquire), "dropping a stale result");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use tokio::time::sleep;

    use super::*;

    #[test]
    fn test_tickets_increase() {
        let sequence = RequestSequence::default();
        let first = sequence.issue();
        let second = sequence.issue();
        assert!(second > first);
        assert!(!sequence.is_latest(first));
        assert!(sequence.is_latest(second));
    }

    #[test]
    fn test_stale_result_dropped() {
        let sequence = RequestSequence::default();
        let stale = sequence.issue();
        let latest = sequence.issue();
        assert_eq!(sequence.accept(latest, "latest"), Some("latest"));
        assert_eq!(sequence.accept(stale, "stale"), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_out_of_order_completion() {
        let sequence = Arc::new(RequestSequence::default());

        let slow = {
            let sequence = Arc::clone(&sequence);
            let ticket = sequence.issue();
            tokio::spawn(async move {
                sleep(Duration::from_millis(50)).await;
                sequence.accept(ticket, 1)
            })
        };
        let fast = {
            let sequence = Arc::clone(&sequence);
            let ticket = sequence.issue();
            tokio::spawn(async move { sequence.accept(ticket, 2) })
        };

        assert_eq!(fast.await.unwrap(), Some(2));
        assert_eq!(slow.await.unwrap(), None);
    }
}
