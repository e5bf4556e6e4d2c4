//! Append-only ticket log.
//!
//! Identifiers are dense: the ticket with id `n` lives at offset `n - 1`, so
//! lookups never need a map and ids can never be reused.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TicketError, TicketResult};

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 120;
pub const DESCRIPTION_MIN_CHARS: usize = 5;
pub const DESCRIPTION_MAX_CHARS: usize = 5000;

/// An immutable ticket record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    pub title: String,
    pub description: String,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Title and description that already passed length validation.
///
/// Appending a draft cannot fail, which lets ingestion validate up front and
/// keep the store append inside its critical section infallible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    title: String,
    description: String,
}

impl TicketDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> TicketResult<Self> {
        let title = title.into();
        let description = description.into();
        check_field("title", &title, TITLE_MIN_CHARS, TITLE_MAX_CHARS)?;
        check_field(
            "description",
            &description,
            DESCRIPTION_MIN_CHARS,
            DESCRIPTION_MAX_CHARS,
        )?;
        Ok(Self { title, description })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

fn check_field(name: &str, value: &str, min: usize, max: usize) -> TicketResult<()> {
    if value.trim().is_empty() {
        return Err(TicketError::validation(format!("{name} must not be blank")));
    }
    let len = value.chars().count();
    if len < min || len > max {
        return Err(TicketError::validation(format!(
            "{name} must be between {min} and {max} characters (got {len})"
        )));
    }
    Ok(())
}

/// Insertion-ordered ticket log.
#[derive(Debug, Clone, Default)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
}

impl TicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate, assign the next id, stamp the creation time and append.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> TicketResult<Ticket> {
        let draft = TicketDraft::new(title, description)?;
        Ok(self.append(draft))
    }

    /// Append an already validated draft.
    pub fn append(&mut self, draft: TicketDraft) -> Ticket {
        let ticket = Ticket {
            id: self.next_id(),
            title: draft.title,
            description: draft.description,
            created_at: Utc::now().trunc_subsecs(6),
        };
        self.tickets.push(ticket.clone());
        ticket
    }

    /// Drop tickets past `len`. Only used to undo an append inside the
    /// catalog's write critical section, before the ticket was ever visible.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.tickets.truncate(len);
    }

    pub fn get(&self, id: u64) -> TicketResult<Ticket> {
        id.checked_sub(1)
            .and_then(|offset| usize::try_from(offset).ok())
            .and_then(|offset| self.tickets.get(offset))
            .cloned()
            .ok_or(TicketError::NotFound(id))
    }

    /// All tickets in creation order.
    pub fn list(&self) -> Vec<Ticket> {
        self.tickets.clone()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    fn next_id(&self) -> u64 {
        self.tickets.len() as u64 + 1
    }
}
