//! Catalog service: book CRUD and the checkout/return lifecycle

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookQuery, CreateBook, UpdateBook},
        borrow::Borrow,
        user::UserClaims,
    },
    policy,
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books with optional search
    pub async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.repository.books.list(query).await
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Add a book to the catalog (staff only)
    pub async fn create(&self, claims: &UserClaims, data: &CreateBook) -> AppResult<Book> {
        self.require_manage(claims)?;
        self.repository.books.create(data).await
    }

    /// Update a book (staff only)
    pub async fn update(&self, claims: &UserClaims, id: Uuid, data: &UpdateBook) -> AppResult<Book> {
        self.require_manage(claims)?;
        self.repository.books.update(id, data).await
    }

    /// Remove a book from the catalog (staff only)
    pub async fn delete(&self, claims: &UserClaims, id: Uuid) -> AppResult<()> {
        self.require_manage(claims)?;
        self.repository.books.delete(id).await
    }

    /// The open borrow for a book, if any
    pub async fn active_borrow(&self, book_id: Uuid) -> AppResult<Option<Borrow>> {
        self.repository.borrows.active_for_book(book_id).await
    }

    /// Check a book out to the current user
    pub async fn checkout(&self, claims: &UserClaims, book_id: Uuid) -> AppResult<Borrow> {
        self.repository
            .borrows
            .checkout(book_id, claims.user_id)
            .await
    }

    /// Return a borrowed book. Allowed for the borrower themselves or staff.
    pub async fn return_borrow(&self, claims: &UserClaims, borrow_id: Uuid) -> AppResult<Borrow> {
        let borrow = self.repository.borrows.get_by_id(borrow_id).await?;
        if !policy::can_act_on_borrow(borrow.borrowed_by, Some(claims.user_id), claims.role) {
            return Err(AppError::Authorization(
                "Only the borrower or staff may return this book".to_string(),
            ));
        }
        self.repository.borrows.close(borrow_id).await
    }

    fn require_manage(&self, claims: &UserClaims) -> AppResult<()> {
        if policy::can_manage_books(claims.role) {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Librarian privileges required".to_string(),
            ))
        }
    }
}
