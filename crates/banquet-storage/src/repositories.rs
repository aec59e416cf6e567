// Repository layer for database operations

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::models::*;
use crate::{Result, StorageError};

const EVENT_COLUMNS: &str = "id, date, name, type, guests, total_amount, deposit, \
     smoke_service, banner_service, phone, notes, created_at";

fn date_conflict(err: sqlx::Error, date: NaiveDate) -> StorageError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::DateTaken(date),
        _ => StorageError::Database(err),
    }
}

// ============================================
// Events (one booking per calendar date)
// ============================================

#[derive(Clone)]
pub struct EventRepo {
    pool: SqlitePool,
}

impl EventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, input: NewEvent) -> Result<EventRow> {
        let date = input.date;
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            INSERT INTO events (date, name, type, guests, total_amount, deposit,
                                smoke_service, banner_service, phone, notes, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(input.date)
        .bind(&input.name)
        .bind(&input.kind)
        .bind(input.guests)
        .bind(input.total_amount)
        .bind(input.deposit)
        .bind(input.smoke_service)
        .bind(input.banner_service)
        .bind(&input.phone)
        .bind(&input.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| date_conflict(e, date))?;

        Ok(row)
    }

    pub async fn get(&self, id: i64) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events
            WHERE date = ?1
            ORDER BY created_at ASC, id ASC
            "#
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert-or-replace keyed on the calendar date. Returns the stored row
    /// and whether a new row was created. The check and the write share one
    /// transaction, so two saves racing on a new date cannot both insert.
    pub async fn upsert_by_date(&self, input: NewEvent) -> Result<(EventRow, bool)> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM events WHERE date = ?1")
            .bind(input.date)
            .fetch_optional(&mut *tx)
            .await?;

        let (row, created) = match existing {
            Some(id) => {
                // Full overwrite of every mutable field; id, date and
                // created_at are preserved.
                let row = sqlx::query_as::<_, EventRow>(&format!(
                    r#"
                    UPDATE events
                    SET name = ?2, type = ?3, guests = ?4, total_amount = ?5,
                        deposit = ?6, smoke_service = ?7, banner_service = ?8,
                        phone = ?9, notes = ?10
                    WHERE id = ?1
                    RETURNING {EVENT_COLUMNS}
                    "#
                ))
                .bind(id)
                .bind(&input.name)
                .bind(&input.kind)
                .bind(input.guests)
                .bind(input.total_amount)
                .bind(input.deposit)
                .bind(input.smoke_service)
                .bind(input.banner_service)
                .bind(&input.phone)
                .bind(&input.notes)
                .fetch_one(&mut *tx)
                .await?;
                (row, false)
            }
            None => {
                let row = sqlx::query_as::<_, EventRow>(&format!(
                    r#"
                    INSERT INTO events (date, name, type, guests, total_amount, deposit,
                                        smoke_service, banner_service, phone, notes, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                    RETURNING {EVENT_COLUMNS}
                    "#
                ))
                .bind(input.date)
                .bind(&input.name)
                .bind(&input.kind)
                .bind(input.guests)
                .bind(input.total_amount)
                .bind(input.deposit)
                .bind(input.smoke_service)
                .bind(input.banner_service)
                .bind(&input.phone)
                .bind(&input.notes)
                .bind(Utc::now())
                .fetch_one(&mut *tx)
                .await?;
                (row, true)
            }
        };

        tx.commit().await?;
        Ok((row, created))
    }

    /// Full replace of every mutable field, including the date.
    pub async fn replace(&self, id: i64, input: NewEvent) -> Result<Option<EventRow>> {
        let date = input.date;
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            UPDATE events
            SET date = ?2, name = ?3, type = ?4, guests = ?5, total_amount = ?6,
                deposit = ?7, smoke_service = ?8, banner_service = ?9,
                phone = ?10, notes = ?11
            WHERE id = ?1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(input.date)
        .bind(&input.name)
        .bind(&input.kind)
        .bind(input.guests)
        .bind(input.total_amount)
        .bind(input.deposit)
        .bind(input.smoke_service)
        .bind(input.banner_service)
        .bind(&input.phone)
        .bind(&input.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| date_conflict(e, date))?;

        Ok(row)
    }

    /// Count of events whose date is strictly after `after`.
    pub async fn count_after(&self, after: NaiveDate) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events WHERE date > ?1")
            .bind(after)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Distinct booked dates, ascending.
    pub async fn booked_dates(&self) -> Result<Vec<NaiveDate>> {
        let dates = sqlx::query_scalar::<_, NaiveDate>(
            "SELECT DISTINCT date FROM events ORDER BY date ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(dates)
    }
}

// ============================================
// Income ledger
// ============================================

#[derive(Clone)]
pub struct IncomeRepo {
    pool: SqlitePool,
}

impl IncomeRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, input: NewIncome) -> Result<IncomeRow> {
        let row = sqlx::query_as::<_, IncomeRow>(
            r#"
            INSERT INTO income (date, title, amount, note, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, date, title, amount, note, created_at
            "#,
        )
        .bind(input.date)
        .bind(&input.title)
        .bind(input.amount)
        .bind(&input.note)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<IncomeRow>> {
        let rows = sqlx::query_as::<_, IncomeRow>(
            r#"
            SELECT id, date, title, amount, note, created_at
            FROM income
            WHERE date = ?1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Full replace; every field is overwritten.
    pub async fn replace(&self, id: i64, input: NewIncome) -> Result<Option<IncomeRow>> {
        let row = sqlx::query_as::<_, IncomeRow>(
            r#"
            UPDATE income
            SET date = ?2, title = ?3, amount = ?4, note = ?5
            WHERE id = ?1
            RETURNING id, date, title, amount, note, created_at
            "#,
        )
        .bind(id)
        .bind(input.date)
        .bind(&input.title)
        .bind(input.amount)
        .bind(&input.note)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Partial update; absent fields keep their stored value.
    pub async fn update(&self, id: i64, input: UpdateIncome) -> Result<Option<IncomeRow>> {
        let row = sqlx::query_as::<_, IncomeRow>(
            r#"
            UPDATE income
            SET date = COALESCE(?2, date),
                title = COALESCE(?3, title),
                amount = COALESCE(?4, amount),
                note = COALESCE(?5, note)
            WHERE id = ?1
            RETURNING id, date, title, amount, note, created_at
            "#,
        )
        .bind(id)
        .bind(input.date)
        .bind(&input.title)
        .bind(input.amount)
        .bind(&input.note)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM income WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================
// Outcome ledger
// ============================================

#[derive(Clone)]
pub struct OutcomeRepo {
    pool: SqlitePool,
}

impl OutcomeRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, input: NewOutcome) -> Result<OutcomeRow> {
        let row = sqlx::query_as::<_, OutcomeRow>(
            r#"
            INSERT INTO outcome (date, worker_type, name, salary, paid, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id, date, worker_type, name, salary, paid, created_at
            "#,
        )
        .bind(input.date)
        .bind(&input.worker_type)
        .bind(&input.name)
        .bind(input.salary)
        .bind(input.paid)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<OutcomeRow>> {
        let rows = sqlx::query_as::<_, OutcomeRow>(
            r#"
            SELECT id, date, worker_type, name, salary, paid, created_at
            FROM outcome
            WHERE date = ?1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Full replace; every field is overwritten.
    pub async fn replace(&self, id: i64, input: NewOutcome) -> Result<Option<OutcomeRow>> {
        let row = sqlx::query_as::<_, OutcomeRow>(
            r#"
            UPDATE outcome
            SET date = ?2, worker_type = ?3, name = ?4, salary = ?5, paid = ?6
            WHERE id = ?1
            RETURNING id, date, worker_type, name, salary, paid, created_at
            "#,
        )
        .bind(id)
        .bind(input.date)
        .bind(&input.worker_type)
        .bind(&input.name)
        .bind(input.salary)
        .bind(input.paid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Partial update; absent fields keep their stored value.
    pub async fn update(&self, id: i64, input: UpdateOutcome) -> Result<Option<OutcomeRow>> {
        let row = sqlx::query_as::<_, OutcomeRow>(
            r#"
            UPDATE outcome
            SET date = COALESCE(?2, date),
                worker_type = COALESCE(?3, worker_type),
                name = COALESCE(?4, name),
                salary = COALESCE(?5, salary),
                paid = COALESCE(?6, paid)
            WHERE id = ?1
            RETURNING id, date, worker_type, name, salary, paid, created_at
            "#,
        )
        .bind(id)
        .bind(input.date)
        .bind(&input.worker_type)
        .bind(&input.name)
        .bind(input.salary)
        .bind(input.paid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM outcome WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    fn event(date: NaiveDate, name: &str) -> NewEvent {
        NewEvent {
            date,
            name: name.to_string(),
            kind: "wedding".to_string(),
            guests: 100,
            total_amount: 150_000,
            deposit: 30_000,
            smoke_service: 1,
            banner_service: 0,
            phone: Some("+996 555 123456".to_string()),
            notes: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn upsert_inserts_then_replaces_in_place() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = db.events();
        let date = day(2026, 9, 12);

        let (first, created) = repo.upsert_by_date(event(date, "First")).await.unwrap();
        assert!(created);

        let (second, created) = repo.upsert_by_date(event(date, "Second")).await.unwrap();
        assert!(!created);
        assert_eq!(second.id, first.id);
        assert_eq!(second.name, "Second");
        assert_eq!(second.created_at, first.created_at);

        let rows = repo.list_by_date(date).await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_date() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = db.events();
        let date = day(2026, 9, 12);

        repo.insert(event(date, "First")).await.unwrap();
        let err = repo.insert(event(date, "Second")).await.unwrap_err();
        assert!(matches!(err, StorageError::DateTaken(d) if d == date));
    }

    #[tokio::test]
    async fn replace_unknown_id_is_none() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = db.events();
        let row = repo.replace(42, event(day(2026, 9, 12), "Ghost")).await.unwrap();
        assert!(row.is_none());
    }

    #[tokio::test]
    async fn count_after_is_strictly_greater() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = db.events();
        let today = day(2026, 8, 29);

        for (offset, name) in [(0, "today"), (1, "tomorrow"), (2, "after")] {
            let date = today + chrono::Days::new(offset);
            repo.insert(event(date, name)).await.unwrap();
        }

        assert_eq!(repo.count_after(today).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn booked_dates_are_ascending() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = db.events();

        for date in [day(2026, 12, 1), day(2026, 1, 15), day(2026, 6, 20)] {
            repo.insert(event(date, "toi")).await.unwrap();
        }

        let dates = repo.booked_dates().await.unwrap();
        assert_eq!(
            dates,
            vec![day(2026, 1, 15), day(2026, 6, 20), day(2026, 12, 1)]
        );
    }

    #[tokio::test]
    async fn income_partial_update_touches_only_supplied_fields() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = db.income();

        let row = repo
            .insert(NewIncome {
                date: day(2026, 8, 30),
                title: "Hall rent".to_string(),
                amount: 50_000,
                note: Some("deposit".to_string()),
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                row.id,
                UpdateIncome {
                    amount: Some(60_000),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.amount, 60_000);
        assert_eq!(updated.title, "Hall rent");
        assert_eq!(updated.note.as_deref(), Some("deposit"));
        assert_eq!(updated.date, row.date);
    }

    #[tokio::test]
    async fn income_delete_reports_missing_rows() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = db.income();

        let row = repo
            .insert(NewIncome {
                date: day(2026, 8, 30),
                title: "Bar".to_string(),
                amount: 12_000,
                note: None,
            })
            .await
            .unwrap();

        assert!(repo.delete(row.id).await.unwrap());
        assert!(!repo.delete(row.id).await.unwrap());
        assert!(repo.list_by_date(row.date).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn outcome_rows_keep_creation_order_per_date() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = db.outcome();
        let date = day(2026, 8, 30);

        for (name, worker_type) in [("Azamat", "chefs"), ("Nurlan", "waiters"), ("Aida", "other")]
        {
            repo.insert(NewOutcome {
                date,
                worker_type: worker_type.to_string(),
                name: name.to_string(),
                salary: 3_000,
                paid: 0,
            })
            .await
            .unwrap();
        }

        let rows = repo.list_by_date(date).await.unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Azamat", "Nurlan", "Aida"]);
    }
}
