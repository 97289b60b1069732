use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Countdown synchronization: starts at `count`, each [`signal`] takes one
/// off, [`wait`] blocks until it reaches zero.
///
/// [`signal`]: CountdownLatch::signal
/// [`wait`]: CountdownLatch::wait
#[derive(Debug)]
pub struct CountdownLatch {
    remaining: Mutex<usize>,
    zero: Condvar,
}

impl CountdownLatch {
    pub const fn new(count: usize) -> Self {
        Self {
            remaining: Mutex::new(count),
            zero: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        // The counter is a plain integer; a panic elsewhere can't leave it
        // half-updated.
        self.remaining.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn remaining(&self) -> usize {
        *self.lock()
    }

    /// Take one off the count. Signalling an already-open latch is ignored
    /// and logged.
    pub fn signal(&self) {
        let mut remaining = self.lock();
        match *remaining {
            0 => tracing::warn!("countdown latch signalled after reaching zero"),
            1 => {
                *remaining = 0;
                self.zero.notify_all();
            }
            _ => *remaining -= 1,
        }
    }

    pub fn wait(&self) {
        let remaining = self.lock();
        let _open = self
            .zero
            .wait_while(remaining, |n| *n > 0)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Returns a guard that signals the latch when dropped, including when
    /// the holder unwinds.
    pub const fn signal_on_drop(&self) -> SignalGuard<'_> {
        SignalGuard(self)
    }
}

pub struct SignalGuard<'a>(&'a CountdownLatch);

impl Drop for SignalGuard<'_> {
    fn drop(&mut self) {
        self.0.signal();
    }
}
