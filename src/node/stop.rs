use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Why a mining search was told to give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Cancelled,
    DeadlineReached,
}

/// Cooperative stop signal polled by the proof-of-work search.
///
/// Clones share the same flag, so any clone can stop a search running on
/// another thread. An optional deadline bounds the search on its own.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl StopSignal {
    /// A signal that only fires when `stop` is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// A signal that also fires once `timeout` has elapsed from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().deadline_after(timeout)
    }

    pub fn deadline_after(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    pub fn stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        if self.flag.load(Ordering::Acquire) {
            return Some(StopReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(StopReason::DeadlineReached),
            _ => None,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stop_reason().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_signal_is_running() {
        assert_eq!(StopSignal::new().stop_reason(), None);
    }

    #[test]
    fn stop_is_visible_through_clones() {
        let signal = StopSignal::new();
        let remote = signal.clone();
        remote.stop();
        assert_eq!(signal.stop_reason(), Some(StopReason::Cancelled));
    }

    #[test]
    fn elapsed_deadline_fires() {
        let signal = StopSignal::with_timeout(Duration::ZERO);
        assert_eq!(signal.stop_reason(), Some(StopReason::DeadlineReached));
        assert!(!StopSignal::with_timeout(Duration::from_secs(3600)).is_stopped());
    }

    #[test]
    fn explicit_stop_wins_over_deadline() {
        let signal = StopSignal::with_timeout(Duration::ZERO);
        signal.stop();
        assert_eq!(signal.stop_reason(), Some(StopReason::Cancelled));
    }
}
