//! Repository implementations for the collection store
//!
//! One repository per entity kind, each borrowing the shared pool.
//! Lookups that need related rows run as two sequential queries rather
//! than a join; the gap between them is visible to concurrent writers.

pub mod collections;
pub mod items;
pub mod webhooks;

pub use collections::CollectionRepo;
pub use items::ItemRepo;
pub use webhooks::WebhookRepo;
