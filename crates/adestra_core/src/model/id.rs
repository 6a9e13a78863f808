//! Record identifier generation.
//!
//! Ids are a base-36 millisecond timestamp followed by a fixed-width base-36
//! random suffix. They are opaque to callers and only compared for equality.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Opaque identifier shared by every record kind.
///
/// Kept as a type alias; imported documents may carry ids produced by other
/// tools, so no format is enforced on read.
pub type RecordId = String;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 6;
// 36^6, fits comfortably in the 32 random low bits of a v4 UUID.
const SUFFIX_SPACE: u64 = 2_176_782_336;

/// Generates a fresh id stamped with the current time.
pub fn generate_id() -> RecordId {
    generate_id_at(Utc::now())
}

/// Generates a fresh id stamped with `now`.
pub fn generate_id_at(now: DateTime<Utc>) -> RecordId {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let random_bits = Uuid::new_v4().as_u128() as u32;

    let mut id = to_base36(millis);
    id.push_str(&random_suffix(u64::from(random_bits)));
    id
}

fn random_suffix(bits: u64) -> String {
    let encoded = to_base36(bits % SUFFIX_SPACE);
    format!("{encoded:0>width$}", width = SUFFIX_LEN)
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
