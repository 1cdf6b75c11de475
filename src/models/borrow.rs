//! Borrow model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Borrow record. `returned_at = NULL` marks an open borrow; at most one
/// open borrow may exist per book at any time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrow {
    pub id: Uuid,
    pub book_id: Uuid,
    pub borrowed_by: Uuid,
    pub borrowed_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl Borrow {
    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }
}
