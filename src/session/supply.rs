/// Identifies one outstanding question request. Replies carrying any other
/// ticket are stale and must be dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SupplyTicket(u64);

impl SupplyTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Single-slot in-flight guard for question supply.
///
/// At most one ticket exists at a time; a second `try_acquire` while one is
/// outstanding is refused rather than queued.
#[derive(Debug, Default)]
pub struct SupplySlot {
    in_flight: Option<SupplyTicket>,
    issued: u64,
}

impl SupplySlot {
    pub fn try_acquire(&mut self) -> Option<SupplyTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        self.issued += 1;
        let ticket = SupplyTicket(self.issued);
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Frees the slot if `ticket` is the outstanding one.
    pub fn release(&mut self, ticket: SupplyTicket) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_refused_while_in_flight() {
        let mut slot = SupplySlot::default();
        let first = slot.try_acquire();
        assert!(first.is_some());
        assert!(slot.try_acquire().is_none());
        assert!(slot.try_acquire().is_none());
        assert!(slot.release(first.unwrap()));
    }

    #[test]
    fn test_release_requires_matching_ticket() {
        let mut slot = SupplySlot::default();
        let ticket = slot.try_acquire().unwrap();
        assert!(!slot.release(SupplyTicket(ticket.value() + 1)));
        assert!(slot.is_in_flight());
        assert!(slot.release(ticket));
        assert!(!slot.is_in_flight());
        assert!(!slot.release(ticket));
    }

    #[test]
    fn test_tickets_are_never_reused() {
        let mut slot = SupplySlot::default();
        let a = slot.try_acquire().unwrap();
        slot.release(a);
        let b = slot.try_acquire().unwrap();
        assert_ne!(a, b);
    }
}
