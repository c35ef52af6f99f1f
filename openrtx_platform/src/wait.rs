//! Host-testable stand-in for the half-transfer/transfer-complete interrupt.
//!
//! A real MCU signals a DMA boundary to whatever is waiting via an ISR that
//! posts to an unowned back-pointer the waiting task left behind (spec §9's
//! "unowned back-pointers to waiting tasks" pattern). On the host there is
//! no ISR, so [`WakeHandle`] realizes the same shape with a condvar: the
//! consumer blocks in [`WakeHandle::wait`], and whoever calls
//! [`crate::stream::StreamPool::on_transfer_complete`] calls
//! [`WakeHandle::notify`] right after, standing in for the interrupt.

use std::sync::{Condvar, Mutex};
use std::time::Duration;

pub struct WakeHandle {
    ready: Mutex<bool>,
    condvar: Condvar,
}

impl WakeHandle {
    pub fn new() -> Self {
        WakeHandle { ready: Mutex::new(false), condvar: Condvar::new() }
    }

    /// Posts one transfer-boundary event, waking a blocked `wait`/`wait_timeout`.
    pub fn notify(&self) {
        let mut ready = self.ready.lock().unwrap();
        *ready = true;
        self.condvar.notify_one();
    }

    /// Blocks until the next `notify`, then clears the flag so each
    /// boundary is consumed exactly once.
    pub fn wait(&self) {
        let mut ready = self.ready.lock().unwrap();
        while !*ready {
            ready = self.condvar.wait(ready).unwrap();
        }
        *ready = false;
    }

    /// As `wait`, but gives up after `timeout`, returning whether a
    /// notification actually arrived.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let ready = self.ready.lock().unwrap();
        let (mut ready, _) = self.condvar.wait_timeout_while(ready, timeout, |r| !*r).unwrap();
        let was_ready = *ready;
        *ready = false;
        was_ready
    }
}

impl Default for WakeHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn wait_blocks_until_notified() {
        let handle = Arc::new(WakeHandle::new());
        let waiter = handle.clone();
        let joined = thread::spawn(move || {
            waiter.wait();
        });

        thread::sleep(Duration::from_millis(20));
        handle.notify();
        joined.join().unwrap();
    }

    #[test]
    fn wait_timeout_reports_no_notification() {
        let handle = WakeHandle::new();
        assert!(!handle.wait_timeout(Duration::from_millis(10)));
    }

    #[test]
    fn wait_timeout_reports_notification() {
        let handle = Arc::new(WakeHandle::new());
        let notifier = handle.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            notifier.notify();
        });
        assert!(handle.wait_timeout(Duration::from_secs(1)));
    }
}
