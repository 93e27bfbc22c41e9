//! Creation-time identifiers.
//!
//! Ids are decimal millisecond timestamps, which keeps them short, opaque
//! to callers, and creation-ordered. A process-wide atomic latches
//! `max(now, last + 1)`, so two mints inside the same clock tick take
//! consecutive values instead of colliding.
//!
//! Rows written by another process can still carry an id this process
//! minted; the store's schema does not assume cross-process uniqueness.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Mint the next identifier.
pub fn next_id() -> String {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = if now > last { now } else { last + 1 };
        match LAST_ID.compare_exchange_weak(last, candidate, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return candidate.to_string(),
            Err(observed) => last = observed,
        }
    }
}
