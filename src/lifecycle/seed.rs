//! Demonstration data loaded into an empty store at startup.
//!
//! Seeding keys off "the store is empty". If tickets ever become deletable,
//! a store emptied by deletes would be re-seeded on the next start.

use crate::store::{NewTicket, StoreResult, TicketStore};

/// (customer, channel, subject, status, priority)
const DEMO_TICKETS: [(&str, &str, &str, &str, &str); 20] = [
    ("Alice", "email", "Issue with login", "open", "high"),
    ("Bob", "phone", "Refund request", "closed", "medium"),
    ("Charlie", "chat", "Product question", "open", "low"),
    ("Diana", "email", "Bug report", "open", "high"),
    ("Eve", "phone", "Account setup", "closed", "medium"),
    ("Frank", "chat", "Feature request", "open", "low"),
    ("Grace", "email", "Password reset", "closed", "high"),
    ("Henry", "phone", "Billing issue", "open", "medium"),
    ("Ivy", "chat", "Technical support", "open", "low"),
    ("Jack", "email", "Order status", "closed", "high"),
    ("Kate", "phone", "Return policy", "open", "medium"),
    ("Leo", "chat", "App crash", "open", "low"),
    ("Mia", "email", "Subscription", "closed", "high"),
    ("Noah", "phone", "Delivery delay", "open", "medium"),
    ("Olivia", "chat", "User guide", "closed", "low"),
    ("Peter", "email", "Data export", "open", "high"),
    ("Quinn", "phone", "Payment failed", "open", "medium"),
    ("Rose", "chat", "Feedback", "closed", "low"),
    ("Sam", "email", "API access", "open", "high"),
    ("Tina", "phone", "Account deletion", "closed", "medium"),
];

/// Number of tickets a fresh store receives.
pub const SEED_COUNT: usize = DEMO_TICKETS.len();

/// The fixed demonstration dataset.
pub fn demo_tickets() -> Vec<NewTicket> {
    DEMO_TICKETS
        .iter()
        .map(|(customer, channel, subject, status, priority)| {
            NewTicket::new(*customer, *channel, *subject)
                .with_status(*status)
                .with_priority(*priority)
        })
        .collect()
}

/// Insert the demonstration dataset if the store holds no tickets.
///
/// Returns how many tickets were inserted (zero when the store was not empty).
pub async fn seed_if_empty(store: &TicketStore) -> StoreResult<usize> {
    let existing = store.count().await?;
    if existing > 0 {
        tracing::debug!(existing, "Store already populated, skipping seed");
        return Ok(0);
    }

    let inserted = store.insert_all(&demo_tickets()).await?;
    tracing::info!(inserted, "Seeded demonstration tickets");
    Ok(inserted)
}
