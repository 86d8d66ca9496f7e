/// Identifies the view state a request was issued against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScopeTicket(u64);

/// Generation counter for one view.
///
/// Every request takes a ticket before it suspends. Invalidating the scope
/// (navigation, unmount, a superseding request) makes all outstanding tickets
/// stale, and their responses are dropped when they arrive.
#[derive(Clone, Debug, Default)]
pub struct ViewScope {
    generation: u64,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self) -> ScopeTicket {
        ScopeTicket(self.generation)
    }

    pub fn is_current(&self, ticket: ScopeTicket) -> bool {
        ticket.0 == self.generation
    }

    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}
