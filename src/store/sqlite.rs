//! SQLite-backed ticket store.
//!
//! Every operation checks a connection out of the pool for its own duration
//! only; the connection returns to the pool on every exit path, errors
//! included. Writes rely on SQLite's own transaction isolation, so two
//! updates to the same ticket resolve as last-write-wins.

use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;
use crate::store::ticket::{
    NewTicket, Ticket, TicketId, TicketUpdate, DEFAULT_PRIORITY, DEFAULT_STATUS,
};
use crate::store::{StoreError, StoreResult};

const COLUMNS: &str = "id, created_at, customer_name, channel, subject, status, priority";

/// Durable record keeping for tickets.
#[derive(Debug, Clone)]
pub struct TicketStore {
    pool: SqlitePool,
}

impl TicketStore {
    /// Open (creating if missing) the database described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

        // Each in-memory connection is its own database, so pin the pool to one.
        let pool = if config.url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .connect_with(options)
                .await?
        };

        tracing::info!(url = %config.url, "Ticket store connected");
        Ok(Self { pool })
    }

    /// A private in-memory store with the schema already applied.
    pub async fn in_memory() -> StoreResult<Self> {
        let store = Self::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await?;
        store.migrate().await?;
        Ok(store)
    }

    /// Create the tickets table if it does not exist yet.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS tickets (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                created_at    TEXT NOT NULL,
                customer_name TEXT NOT NULL,
                channel       TEXT NOT NULL,
                subject       TEXT NOT NULL,
                status        TEXT NOT NULL DEFAULT 'open',
                priority      TEXT NOT NULL DEFAULT 'medium'
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert a ticket, assigning its id and creation time.
    pub async fn insert(&self, new: &NewTicket) -> StoreResult<Ticket> {
        let sql = format!(
            "INSERT INTO tickets (created_at, customer_name, channel, subject, status, priority)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {COLUMNS}"
        );
        let ticket = sqlx::query_as::<_, Ticket>(&sql)
            .bind(Utc::now())
            .bind(&new.customer_name)
            .bind(&new.channel)
            .bind(&new.subject)
            .bind(new.status.as_deref().unwrap_or(DEFAULT_STATUS))
            .bind(new.priority.as_deref().unwrap_or(DEFAULT_PRIORITY))
            .fetch_one(&self.pool)
            .await?;
        Ok(ticket)
    }

    /// Insert a batch of tickets in one transaction.
    pub async fn insert_all(&self, tickets: &[NewTicket]) -> StoreResult<usize> {
        let mut tx = self.pool.begin().await?;
        for new in tickets {
            sqlx::query(
                "INSERT INTO tickets (created_at, customer_name, channel, subject, status, priority)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .bind(Utc::now())
            .bind(&new.customer_name)
            .bind(&new.channel)
            .bind(&new.subject)
            .bind(new.status.as_deref().unwrap_or(DEFAULT_STATUS))
            .bind(new.priority.as_deref().unwrap_or(DEFAULT_PRIORITY))
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(tickets.len())
    }

    /// Every stored ticket, in insertion order.
    pub async fn list_all(&self) -> StoreResult<Vec<Ticket>> {
        let sql = format!("SELECT {COLUMNS} FROM tickets ORDER BY id");
        let tickets = sqlx::query_as::<_, Ticket>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(tickets)
    }

    /// Number of stored tickets.
    pub async fn count(&self) -> StoreResult<i64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tickets")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    /// Look up a ticket by id.
    pub async fn get(&self, id: TicketId) -> StoreResult<Ticket> {
        let sql = format!("SELECT {COLUMNS} FROM tickets WHERE id = ?1");
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    /// Apply the supplied fields of `update` and return the stored result.
    ///
    /// Lookup, apply and persist happen in a single statement; a missing id
    /// leaves the table untouched and yields `StoreError::NotFound`.
    pub async fn update(&self, id: TicketId, update: &TicketUpdate) -> StoreResult<Ticket> {
        let sql = format!(
            "UPDATE tickets
             SET status = COALESCE(?1, status),
                 priority = COALESCE(?2, priority)
             WHERE id = ?3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(update.status())
            .bind(update.priority())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
