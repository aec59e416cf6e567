// Income ledger service

use banquet_contracts::{Income, IncomeDraft, IncomePatch};
use banquet_storage::{IncomeRepo, IncomeRow, NewIncome, Result, UpdateIncome};
use chrono::NaiveDate;

pub struct IncomeService {
    repo: IncomeRepo,
}

impl IncomeService {
    pub fn new(repo: IncomeRepo) -> Self {
        Self { repo }
    }

    pub async fn by_date(&self, date: NaiveDate) -> Result<Vec<Income>> {
        let rows = self.repo.list_by_date(date).await?;
        Ok(rows.into_iter().map(Self::row_to_income).collect())
    }

    pub async fn create(&self, draft: IncomeDraft) -> Result<Income> {
        let row = self.repo.insert(Self::draft_to_new(draft)).await?;
        Ok(Self::row_to_income(row))
    }

    /// Full (PUT) update; the draft carries the complete schema.
    pub async fn replace(&self, id: i64, draft: IncomeDraft) -> Result<Option<Income>> {
        let row = self.repo.replace(id, Self::draft_to_new(draft)).await?;
        Ok(row.map(Self::row_to_income))
    }

    /// Partial (PATCH) update; only supplied fields change.
    pub async fn update(&self, id: i64, patch: IncomePatch) -> Result<Option<Income>> {
        let input = UpdateIncome {
            date: patch.date,
            title: patch.title,
            amount: patch.amount,
            note: patch.note,
        };
        let row = self.repo.update(id, input).await?;
        Ok(row.map(Self::row_to_income))
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.repo.delete(id).await
    }

    fn draft_to_new(draft: IncomeDraft) -> NewIncome {
        NewIncome {
            date: draft.date,
            title: draft.title,
            amount: draft.amount,
            note: draft.note,
        }
    }

    fn row_to_income(row: IncomeRow) -> Income {
        Income {
            id: row.id,
            date: row.date,
            title: row.title,
            amount: row.amount,
            note: row.note,
            created_at: row.created_at,
        }
    }
}
