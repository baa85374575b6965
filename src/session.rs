//! Session identifier generation.
//!
//! The session id is an opaque analytics correlation key, generated once per
//! client and reused across visits. It is never an authorization token.

use chrono::Utc;
use rand::Rng;

use crate::storage::{self, KvStore, SESSION_KEY};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Return the stored session id, or generate and persist a fresh one. When
/// storage is unavailable the id is simply fresh on every load.
pub fn ensure_session_id(store: &dyn KvStore) -> String {
    if let Some(existing) = storage::get_silent(store, SESSION_KEY) {
        if !existing.is_empty() {
            return existing;
        }
    }
    let id = generate_session_id();
    storage::set_silent(store, SESSION_KEY, &id);
    id
}

/// Eight random base-36 characters followed by the current epoch millis in
/// base 36.
pub fn generate_session_id() -> String {
    let mut rng = rand::thread_rng();
    let mut id: String = (0..8)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    id.push_str(&to_base36(Utc::now().timestamp_millis().max(0) as u64));
    id
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_session_id_shape() {
        let id = generate_session_id();
        assert!(id.len() > 8);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_session_id_persisted_and_reused() {
        let store = MemoryStore::new();
        let first = ensure_session_id(&store);
        let second = ensure_session_id(&store);
        assert_eq!(first, second);
        assert_eq!(storage::get_silent(&store, SESSION_KEY), Some(first));
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
