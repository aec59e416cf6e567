// Outcome ledger service

use banquet_contracts::{Outcome, OutcomeDraft, OutcomePatch};
use banquet_storage::{NewOutcome, OutcomeRepo, OutcomeRow, Result, UpdateOutcome};
use chrono::NaiveDate;

pub struct OutcomeService {
    repo: OutcomeRepo,
}

impl OutcomeService {
    pub fn new(repo: OutcomeRepo) -> Self {
        Self { repo }
    }

    pub async fn by_date(&self, date: NaiveDate) -> Result<Vec<Outcome>> {
        let rows = self.repo.list_by_date(date).await?;
        Ok(rows.into_iter().map(Self::row_to_outcome).collect())
    }

    pub async fn create(&self, draft: OutcomeDraft) -> Result<Outcome> {
        let row = self.repo.insert(Self::draft_to_new(draft)).await?;
        Ok(Self::row_to_outcome(row))
    }

    /// Full (PUT) update; the draft carries the complete schema.
    pub async fn replace(&self, id: i64, draft: OutcomeDraft) -> Result<Option<Outcome>> {
        let row = self.repo.replace(id, Self::draft_to_new(draft)).await?;
        Ok(row.map(Self::row_to_outcome))
    }

    /// Partial (PATCH) update; only supplied fields change.
    pub async fn update(&self, id: i64, patch: OutcomePatch) -> Result<Option<Outcome>> {
        let input = UpdateOutcome {
            date: patch.date,
            worker_type: patch.worker_type.map(|w| w.to_string()),
            name: patch.name,
            salary: patch.salary,
            paid: patch.paid,
        };
        let row = self.repo.update(id, input).await?;
        Ok(row.map(Self::row_to_outcome))
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.repo.delete(id).await
    }

    fn draft_to_new(draft: OutcomeDraft) -> NewOutcome {
        NewOutcome {
            date: draft.date,
            worker_type: draft.worker_type.to_string(),
            name: draft.name,
            salary: draft.salary,
            paid: draft.paid,
        }
    }

    fn row_to_outcome(row: OutcomeRow) -> Outcome {
        Outcome {
            id: row.id,
            date: row.date,
            worker_type: row.worker_type.parse().unwrap_or_default(),
            name: row.name,
            salary: row.salary,
            paid: row.paid,
            created_at: row.created_at,
        }
    }
}
