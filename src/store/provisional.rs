//! 临时商品编号

use std::sync::atomic::{AtomicU64, Ordering};

/// 基于毫秒时间戳的临时编号生成器
///
/// 同一毫秒内多次调用时在上一次的基础上加一，保证单调递增。
#[derive(Debug, Default)]
pub struct ProvisionalIds {
    last: AtomicU64,
}

impl ProvisionalIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u64 {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let previous = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_ids_are_timestamp_derived() {
        let before = chrono::Utc::now().timestamp_millis() as u64;
        let id = ProvisionalIds::new().next();
        assert!(id >= before);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let ids = ProvisionalIds::new();
        let mut last = 0;
        for _ in 0..1000 {
            let id = ids.next();
            assert!(id > last);
            last = id;
        }
    }

    #[test]
    fn test_ids_unique_across_threads() {
        let ids = Arc::new(ProvisionalIds::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..500).map(|_| ids.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 2000);
    }
}
