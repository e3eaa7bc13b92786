//! Support Ticket Repository

use super::{BaseRepository, RepoError, RepoResult};
use chrono::Utc;
use shared::models::{SupportTicket, TicketCreate, TicketStatus};
use shared::types::PaginationParams;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TICKET_FIELDS: &str = "<string>id AS id, reference, user_id, subject, message, \
     order_number, status, created_at, updated_at";

/// Row shape for count statements
#[derive(serde::Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Clone, Debug)]
pub struct TicketRepository {
    base: BaseRepository,
}

impl TicketRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Open a new ticket (status always starts at `open`)
    pub async fn create(&self, data: TicketCreate) -> RepoResult<SupportTicket> {
        let reference = generate_reference();
        let now = Utc::now();
        let ticket = SupportTicket {
            id: None,
            reference: reference.clone(),
            user_id: data.user_id,
            subject: data.subject,
            message: data.message,
            order_number: data.order_number,
            status: TicketStatus::Open,
            created_at: now,
            updated_at: now,
        };

        self.base
            .db()
            .query("CREATE ticket CONTENT $data RETURN NONE")
            .bind(("data", ticket))
            .await?
            .check()?;

        self.find_by_reference(&reference)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create ticket".to_string()))
    }

    /// Find ticket by record id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<SupportTicket>> {
        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::NotFound(format!("Invalid ticket ID format: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {TICKET_FIELDS} FROM ticket WHERE id = $id"))
            .bind(("id", record_id))
            .await?;
        let tickets: Vec<SupportTicket> = result.take(0)?;
        Ok(tickets.into_iter().next())
    }

    /// Find ticket by its human-friendly reference
    pub async fn find_by_reference(&self, reference: &str) -> RepoResult<Option<SupportTicket>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {TICKET_FIELDS} FROM ticket WHERE reference = $reference LIMIT 1"
            ))
            .bind(("reference", reference.to_string()))
            .await?;
        let tickets: Vec<SupportTicket> = result.take(0)?;
        Ok(tickets.into_iter().next())
    }

    /// All tickets of one user, newest first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<SupportTicket>> {
        let tickets: Vec<SupportTicket> = self
            .base
            .db()
            .query(format!(
                "SELECT {TICKET_FIELDS} FROM ticket WHERE user_id = $user ORDER BY created_at DESC"
            ))
            .bind(("user", user_id.to_string()))
            .await?
            .take(0)?;
        Ok(tickets)
    }

    /// Paginated admin listing, newest first
    pub async fn find_page(&self, params: &PaginationParams) -> RepoResult<(Vec<SupportTicket>, i64)> {
        let tickets: Vec<SupportTicket> = self
            .base
            .db()
            .query(format!(
                "SELECT {TICKET_FIELDS} FROM ticket ORDER BY created_at DESC LIMIT $limit START $offset"
            ))
            .bind(("limit", params.limit()))
            .bind(("offset", params.offset()))
            .await?
            .take(0)?;

        let mut result = self
            .base
            .db()
            .query("SELECT count() AS count FROM ticket GROUP ALL")
            .await?;
        let counts: Vec<CountRow> = result.take(0)?;
        let total = counts.first().map(|c| c.count).unwrap_or(0);

        Ok((tickets, total))
    }

    /// Move a ticket along its lifecycle (forward-only)
    pub async fn update_status(&self, id: &str, next: TicketStatus) -> RepoResult<SupportTicket> {
        let ticket = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Ticket {} not found", id)))?;

        if !ticket.status.can_transition_to(next) {
            return Err(RepoError::Validation(format!(
                "Cannot move ticket from '{}' to '{}'",
                ticket.status, next
            )));
        }

        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::NotFound(format!("Invalid ticket ID format: {}", id)))?;
        self.base
            .db()
            .query("UPDATE $id SET status = $status, updated_at = $now RETURN NONE")
            .bind(("id", record_id))
            .bind(("status", next.as_str().to_string()))
            .bind(("now", Utc::now()))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Ticket {} not found", id)))
    }
}

/// Short uppercase reference, e.g. TKT-4F2A9C
fn generate_reference() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("TKT-{}", hex[..6].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn payload(subject: &str) -> TicketCreate {
        TicketCreate {
            user_id: "user_1".to_string(),
            subject: subject.to_string(),
            message: "Screen flickers on battery power".to_string(),
            order_number: Some("ENTION-12345678-001".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let service = DbService::memory().await.unwrap();
        let repo = TicketRepository::new(service.db);

        let ticket = repo.create(payload("Display issue")).await.unwrap();
        assert_eq!(ticket.status, TicketStatus::Open);
        assert!(ticket.reference.starts_with("TKT-"));
        assert_eq!(ticket.reference.len(), 10);

        let by_ref = repo
            .find_by_reference(&ticket.reference)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_ref.subject, "Display issue");

        let mine = repo.find_by_user("user_1").await.unwrap();
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn test_status_lifecycle() {
        let service = DbService::memory().await.unwrap();
        let repo = TicketRepository::new(service.db);

        let ticket = repo.create(payload("Display issue")).await.unwrap();
        let id = ticket.id.as_deref().unwrap();

        let in_progress = repo
            .update_status(id, TicketStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(in_progress.status, TicketStatus::InProgress);

        let resolved = repo.update_status(id, TicketStatus::Resolved).await.unwrap();
        assert_eq!(resolved.status, TicketStatus::Resolved);

        // Backwards moves are rejected
        let err = repo
            .update_status(id, TicketStatus::Open)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));

        repo.update_status(id, TicketStatus::Closed).await.unwrap();
        let err = repo
            .update_status(id, TicketStatus::Resolved)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
