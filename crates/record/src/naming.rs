use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Collision-resistant filename: 8 random alphanumerics plus a
/// timestamp/sequence token. Practically unique within a process across
/// concurrent calls, not cryptographically guaranteed.
pub fn generate_unique_name() -> String {
    let prefix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();

    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros())
        .unwrap_or_default();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);

    format!("{prefix}{micros:x}{seq:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_names_are_distinct() {
        let mut names: Vec<String> = (0..1000).map(|_| generate_unique_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 1000);
    }

    #[test]
    fn test_generated_name_shape() {
        let name = generate_unique_name();
        assert!(name.len() > 8);
        assert!(name.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(!name.contains('.'));
    }
}
