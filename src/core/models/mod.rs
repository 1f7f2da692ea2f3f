pub mod category;
pub mod product;
pub mod user;

use std::sync::atomic::{AtomicU32, Ordering};
use uuid::Uuid;

static SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// 24 hex chars: seconds since epoch, a per-process sequence, then random bits.
/// Ids created by one process sort in creation order.
pub fn new_document_id() -> String {
    let secs = chrono::Utc::now().timestamp().max(0) as u32;
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;
    let random = Uuid::new_v4().as_u128() as u64 & 0xff_ffff_ffff;
    format!("{:08x}{:06x}{:010x}", secs, seq, random)
}
