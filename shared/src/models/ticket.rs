//! Support Ticket Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Support ticket lifecycle status
///
/// Forward-only: a closed ticket cannot be reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    /// Parse a status string from request input
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "open" => Some(TicketStatus::Open),
            "in_progress" => Some(TicketStatus::InProgress),
            "resolved" => Some(TicketStatus::Resolved),
            "closed" => Some(TicketStatus::Closed),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: TicketStatus) -> bool {
        use TicketStatus::*;
        matches!(
            (self, next),
            (Open, InProgress)
                | (Open, Resolved)
                | (Open, Closed)
                | (InProgress, Resolved)
                | (InProgress, Closed)
                | (Resolved, Closed)
        )
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Support ticket entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportTicket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-friendly reference, e.g. TKT-4F2A9C
    pub reference: String,
    pub user_id: String,
    pub subject: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create ticket payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TicketCreate {
    #[validate(length(min = 1, max = 100))]
    pub user_id: String,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
    pub order_number: Option<String>,
}

/// Ticket status update payload (raw string, parsed by the handler)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketStatusUpdate {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_status_serde() {
        assert_eq!(
            serde_json::to_string(&TicketStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        let parsed: TicketStatus = serde_json::from_str("\"resolved\"").unwrap();
        assert_eq!(parsed, TicketStatus::Resolved);
    }

    #[test]
    fn test_ticket_transitions() {
        use TicketStatus::*;
        assert!(Open.can_transition_to(InProgress));
        assert!(Open.can_transition_to(Closed));
        assert!(InProgress.can_transition_to(Resolved));
        assert!(Resolved.can_transition_to(Closed));

        assert!(!Closed.can_transition_to(Open));
        assert!(!Resolved.can_transition_to(InProgress));
        assert!(!Closed.can_transition_to(Resolved));
    }

    #[test]
    fn test_ticket_status_parse() {
        assert_eq!(TicketStatus::parse("in_progress"), Some(TicketStatus::InProgress));
        assert_eq!(TicketStatus::parse("OPEN"), Some(TicketStatus::Open));
        assert_eq!(TicketStatus::parse("reopened"), None);
    }
}
