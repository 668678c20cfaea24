use std::sync::atomic::{AtomicU64, Ordering};

/// The prefix used when none is given.
pub const DEFAULT_ID_PREFIX: &str = "i";

/// Generates element identifiers of the form `<prefix><n>`.
///
/// `n` starts at 1 and increases with every call, across threads.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: AtomicU64,
}

impl IdGenerator {
    /// Create a generator whose first identifier ends in `1`.
    pub const fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Return the next identifier.
    pub fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        #[cfg(feature = "tracing")]
        tracing::trace!(prefix, n, "generated element id");
        format!("{prefix}{n}")
    }

    /// Restart the sequence at 1.
    pub fn reset(&self) {
        self.counter.store(0, Ordering::Relaxed);
    }
}

static GLOBAL_IDS: IdGenerator = IdGenerator::new();

/// The process-wide generator behind [`generate_id`].
pub fn global_ids() -> &'static IdGenerator {
    &GLOBAL_IDS
}

/// Return the next identifier from the process-wide generator.
pub fn generate_id(prefix: &str) -> String {
    GLOBAL_IDS.next_id(prefix)
}

/// Restart the process-wide sequence. Meant for tests that assert on exact ids.
pub fn reset_ids() {
    GLOBAL_IDS.reset();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(id: &str, prefix: &str) -> u64 {
        id.strip_prefix(prefix).unwrap().parse().unwrap()
    }

    #[test]
    fn test_sequence_and_reset() {
        let ids = IdGenerator::new();
        assert_eq!(ids.next_id(DEFAULT_ID_PREFIX), "i1");
        assert_eq!(ids.next_id("w"), "w2");
        ids.reset();
        assert_eq!(ids.next_id("w"), "w1");
    }

    #[test]
    fn test_global_ids_increase() {
        let first = number(&generate_id("g"), "g");
        let second = number(&generate_id("g"), "g");
        assert!(second > first);
    }

    #[test]
    fn test_unique_across_threads() {
        let ids = IdGenerator::new();
        let mut all: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| (0..100).map(|_| ids.next_id("t")).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap())
                .collect()
        });
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 400);
    }
}
