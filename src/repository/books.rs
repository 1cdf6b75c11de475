//! Books repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List books, newest first, optionally narrowed by a title/author
    /// substring match
    pub async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let books = match query.search.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => {
                let pattern = format!("%{}%", s);
                sqlx::query_as::<_, Book>(
                    r#"
                    SELECT * FROM books
                    WHERE title ILIKE $1 OR author ILIKE $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(books)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Create a book; new books start out available
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn, tags, summary, status)
            VALUES ($1, $2, $3, $4, $5, 'available')
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.isbn)
        .bind(&data.tags)
        .bind(&data.summary)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    /// Update a book. Status is deliberately not updatable here; it changes
    /// only through the checkout/return transactions.
    pub async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                isbn = COALESCE($4, isbn),
                tags = COALESCE($5, tags),
                summary = COALESCE($6, summary)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.isbn)
        .bind(&data.tags)
        .bind(&data.summary)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Delete a book; its borrow history goes with it
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }
}
