use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Time-derived question ids, strictly increasing for the life of the process.
///
/// An id is the current Unix time in milliseconds unless that would repeat or
/// go backwards, in which case it is the previous id plus one.
#[derive(Debug, Default)]
pub struct QuestionIds {
    last: AtomicI64,
}

impl QuestionIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> i64 {
        let now = now_millis();
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(prev + 1)
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
