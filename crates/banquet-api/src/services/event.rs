// Event service: upsert-by-date plus the calendar queries

use banquet_contracts::{Event, EventDraft};
use banquet_storage::{EventRepo, EventRow, NewEvent, Result};
use chrono::{Local, NaiveDate};

pub struct EventService {
    repo: EventRepo,
}

impl EventService {
    pub fn new(repo: EventRepo) -> Self {
        Self { repo }
    }

    pub async fn by_date(&self, date: NaiveDate) -> Result<Vec<Event>> {
        let rows = self.repo.list_by_date(date).await?;
        Ok(rows.into_iter().map(Self::row_to_event).collect())
    }

    /// Insert, or replace the existing booking for the same date.
    /// The bool is true when a new booking was created.
    pub async fn save(&self, draft: EventDraft) -> Result<(Event, bool)> {
        let (row, created) = self.repo.upsert_by_date(Self::draft_to_new(draft)).await?;
        Ok((Self::row_to_event(row), created))
    }

    pub async fn create(&self, draft: EventDraft) -> Result<Event> {
        let row = self.repo.insert(Self::draft_to_new(draft)).await?;
        Ok(Self::row_to_event(row))
    }

    pub async fn replace(&self, id: i64, draft: EventDraft) -> Result<Option<Event>> {
        let row = self.repo.replace(id, Self::draft_to_new(draft)).await?;
        Ok(row.map(Self::row_to_event))
    }

    /// Bookings strictly after the server's local calendar date.
    pub async fn future_count(&self) -> Result<i64> {
        let today = Local::now().date_naive();
        self.repo.count_after(today).await
    }

    pub async fn booked_dates(&self) -> Result<Vec<NaiveDate>> {
        self.repo.booked_dates().await
    }

    fn draft_to_new(draft: EventDraft) -> NewEvent {
        NewEvent {
            date: draft.date,
            name: draft.name,
            kind: draft.kind,
            guests: draft.guests,
            total_amount: draft.total_amount,
            deposit: draft.deposit,
            smoke_service: draft.smoke_service,
            banner_service: draft.banner_service,
            phone: draft.phone,
            notes: draft.notes,
        }
    }

    fn row_to_event(row: EventRow) -> Event {
        Event {
            id: row.id,
            date: row.date,
            name: row.name,
            kind: row.kind,
            guests: row.guests,
            total_amount: row.total_amount,
            deposit: row.deposit,
            smoke_service: row.smoke_service,
            banner_service: row.banner_service,
            phone: row.phone,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}
