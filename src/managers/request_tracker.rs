use std::collections::HashMap;

use crate::types::view::ContainerId;

/// Identifies one issued request for a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    pub container: ContainerId,
    pub sequence: u64,
}

/// Hands out increasing sequence numbers and remembers the newest one per
/// container, so a slow response can be recognised once a newer request for
/// the same container has been issued.
#[derive(Debug, Default)]
pub struct RequestTracker {
    next_sequence: u64,
    latest: HashMap<ContainerId, u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, container: ContainerId) -> RequestTicket {
        self.next_sequence += 1;
        let sequence = self.next_sequence;
        self.latest.insert(container, sequence);
        RequestTicket {
            container,
            sequence,
        }
    }

    /// True while no newer request has been issued for the ticket's container.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.latest.get(&ticket.container) == Some(&ticket.sequence)
    }

    pub fn latest(&self, container: &ContainerId) -> Option<u64> {
        self.latest.get(container).copied()
    }
}
