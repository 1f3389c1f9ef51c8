//! Block id generation
//!
//! Ids only need to be unique within one pipeline run:
//! `{prefix}_{run}_{index}_{suffix}` where `run` is the run's start time in
//! milliseconds and `suffix` is a short random base-36 string.

use chrono::Utc;
use rand::Rng;

use crate::constants::ids::SUFFIX_LEN;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Per-run id generator
#[derive(Debug, Clone)]
pub struct BlockIdGenerator {
    prefix: &'static str,
    run: i64,
}

impl BlockIdGenerator {
    pub fn new(prefix: &'static str) -> Self {
        Self::with_run(prefix, Utc::now().timestamp_millis())
    }

    /// Generator bound to an explicit run identifier
    pub fn with_run(prefix: &'static str, run: i64) -> Self {
        Self { prefix, run }
    }

    /// Id for the block at sequence position `index`
    pub fn id_for(&self, index: usize) -> String {
        format!("{}_{}_{}_{}", self.prefix, self.run, index, random_suffix())
    }
}

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_format() {
        let id_gen = BlockIdGenerator::with_run("code", 1700000000000);
        let id = id_gen.id_for(3);

        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "code");
        assert_eq!(parts[1], "1700000000000");
        assert_eq!(parts[2], "3");
        assert_eq!(parts[3].len(), SUFFIX_LEN);
        assert!(parts[3].bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_ids_unique_within_run() {
        let id_gen = BlockIdGenerator::new("code");
        let ids: HashSet<String> = (0..500).map(|i| id_gen.id_for(i)).collect();
        assert_eq!(ids.len(), 500);
    }
}
