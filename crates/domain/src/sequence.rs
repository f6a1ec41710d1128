//! Per-endpoint request sequencing.
//!
//! Poll requests for one endpoint may overlap and resolve out of order. Each
//! request is stamped with a sequence number when issued; a response is
//! applied only if it is newer than the last one applied.

/// Issues sequence numbers and admits only responses newer than the last
/// applied one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceGate {
    next: u64,
    last_applied: Option<u64>,
}

impl SequenceGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp a new request.
    pub fn issue(&mut self) -> u64 {
        let seq = self.next;
        self.next += 1;
        seq
    }

    /// Admit the response to request `seq`, or reject it as stale.
    pub fn admit(&mut self, seq: u64) -> bool {
        if self.last_applied.is_some_and(|last| seq <= last) {
            return false;
        }
        self.last_applied = Some(seq);
        true
    }

    #[must_use]
    pub fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }
}
