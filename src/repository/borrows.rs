//! Borrows repository
//!
//! Checkout and return each mutate two rows (the borrow and the cached book
//! status). Both run inside a single transaction with the book row locked,
//! so the cache can never drift from the open-borrow fact. The partial
//! unique index on open borrows backstops concurrent checkouts.

use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{borrow::Borrow, enums::BookStatus},
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get borrow by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Borrow> {
        sqlx::query_as::<_, Borrow>("SELECT * FROM borrows WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrow {} not found", id)))
    }

    /// The open borrow for a book, if any
    pub async fn active_for_book(&self, book_id: Uuid) -> AppResult<Option<Borrow>> {
        let borrow = sqlx::query_as::<_, Borrow>(
            "SELECT * FROM borrows WHERE book_id = $1 AND returned_at IS NULL",
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(borrow)
    }

    /// Open borrows for a user, oldest first
    pub async fn active_for_user(&self, user_id: Uuid) -> AppResult<Vec<Borrow>> {
        let borrows = sqlx::query_as::<_, Borrow>(
            r#"
            SELECT * FROM borrows
            WHERE borrowed_by = $1 AND returned_at IS NULL
            ORDER BY borrowed_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(borrows)
    }

    /// Check a book out to a user.
    ///
    /// Locks the book row, verifies it is available with no open borrow,
    /// inserts the borrow and flips the cached status in one transaction.
    /// A concurrent winner leaves the loser with a conflict, never a second
    /// open borrow.
    pub async fn checkout(&self, book_id: Uuid, user_id: Uuid) -> AppResult<Borrow> {
        let mut tx = self.pool.begin().await?;

        let status = sqlx::query_scalar::<_, BookStatus>(
            "SELECT status FROM books WHERE id = $1 FOR UPDATE",
        )
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book_id)))?;

        let already_borrowed: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM borrows WHERE book_id = $1 AND returned_at IS NULL)",
        )
        .bind(book_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_borrowed || status == BookStatus::Borrowed {
            return Err(AppError::Conflict("Book is already borrowed".to_string()));
        }

        let borrow = sqlx::query_as::<_, Borrow>(
            r#"
            INSERT INTO borrows (book_id, borrowed_by, borrowed_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(user_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("Book is already borrowed".to_string())
            }
            other => other.into(),
        })?;

        sqlx::query("UPDATE books SET status = 'borrowed' WHERE id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(borrow)
    }

    /// Close an open borrow and restore the book to available.
    pub async fn close(&self, borrow_id: Uuid) -> AppResult<Borrow> {
        let mut tx = self.pool.begin().await?;

        let closed = sqlx::query_as::<_, Borrow>(
            r#"
            UPDATE borrows SET returned_at = $2
            WHERE id = $1 AND returned_at IS NULL
            RETURNING *
            "#,
        )
        .bind(borrow_id)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?;

        let borrow = match closed {
            Some(b) => b,
            None => {
                // Distinguish an unknown borrow from one already returned
                let existing = sqlx::query_as::<_, Borrow>("SELECT * FROM borrows WHERE id = $1")
                    .bind(borrow_id)
                    .fetch_optional(&mut *tx)
                    .await?;
                return match existing {
                    Some(_) => Err(AppError::Conflict("Borrow already returned".to_string())),
                    None => Err(AppError::NotFound(format!("Borrow {} not found", borrow_id))),
                };
            }
        };

        sqlx::query("UPDATE books SET status = 'available' WHERE id = $1")
            .bind(borrow.book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(borrow)
    }
}
