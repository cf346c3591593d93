//! Booking model and its queries.
//!
//! A booking is the only record type the service stores. Rows are created
//! by [`Booking::insert`], fully replaced by [`Booking::replace`] and removed
//! by [`Booking::delete`]; `id` and `created_at` never change after insert.

use serde::Serialize;
use sqlx::SqlitePool;

const BOOKING_COLUMNS: &str =
    "id, fullname, email, phone, checkin, checkout, roomtype, guests, created_at";

/// Same text layout as SQLite's `CURRENT_TIMESTAMP` so old and new rows sort together
const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Booking {
    pub id: i64,
    pub fullname: String,
    pub email: String,
    pub phone: String,
    pub checkin: String,
    pub checkout: String,
    pub roomtype: String,
    pub guests: i64,
    pub created_at: String,
}

/// The seven caller-supplied fields, already checked for presence.
///
/// Used for both create and update; an update always carries the full set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingInput {
    pub fullname: String,
    pub email: String,
    pub phone: String,
    pub checkin: String,
    pub checkout: String,
    pub roomtype: String,
    pub guests: i64,
}

impl Booking {
    /// All bookings, most recently created first
    pub async fn list(db: &SqlitePool) -> Result<Vec<Booking>, sqlx::Error> {
        // created_at only has second precision, id breaks ties
        sqlx::query_as(&format!(
            "SELECT {} FROM bookings ORDER BY created_at DESC, id DESC",
            BOOKING_COLUMNS
        ))
        .fetch_all(db)
        .await
    }

    pub async fn find(db: &SqlitePool, id: i64) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {} FROM bookings WHERE id = ?",
            BOOKING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Insert a new booking and return the stored row
    pub async fn insert(db: &SqlitePool, input: &BookingInput) -> Result<Booking, sqlx::Error> {
        let now = chrono::Utc::now().format(CREATED_AT_FORMAT).to_string();

        let result = sqlx::query(
            r#"
            INSERT INTO bookings (fullname, email, phone, checkin, checkout, roomtype, guests, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.fullname)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.checkin)
        .bind(&input.checkout)
        .bind(&input.roomtype)
        .bind(input.guests)
        .bind(&now)
        .execute(db)
        .await?;

        let id = result.last_insert_rowid();

        sqlx::query_as(&format!(
            "SELECT {} FROM bookings WHERE id = ?",
            BOOKING_COLUMNS
        ))
        .bind(id)
        .fetch_one(db)
        .await
    }

    /// Overwrite every mutable field of an existing booking.
    ///
    /// Returns `None` when no row has this id.
    pub async fn replace(
        db: &SqlitePool,
        id: i64,
        input: &BookingInput,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                fullname = ?,
                email = ?,
                phone = ?,
                checkin = ?,
                checkout = ?,
                roomtype = ?,
                guests = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.fullname)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.checkin)
        .bind(&input.checkout)
        .bind(&input.roomtype)
        .bind(input.guests)
        .bind(id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Self::find(db, id).await
    }

    /// Delete a booking. Returns whether a row was removed.
    pub async fn delete(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
