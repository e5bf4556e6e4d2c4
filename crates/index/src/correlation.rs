use crate::IndexError;

/// Dense mapping from vector-index position to ticket identifier.
#[derive(Debug, Clone, Default)]
pub struct CorrelationTable {
    ids: Vec<u64>,
}

impl CorrelationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `ticket_id` at the next position and return that position.
    pub fn append(&mut self, ticket_id: u64) -> usize {
        let position = self.ids.len();
        self.ids.push(ticket_id);
        position
    }

    /// Ticket identifier stored at `position`.
    pub fn resolve(&self, position: usize) -> Result<u64, IndexError> {
        self.ids
            .get(position)
            .copied()
            .ok_or(IndexError::PositionOutOfRange {
                position,
                len: self.ids.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
