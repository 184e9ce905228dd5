// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Debounced device writes.
//!
//! Dragging a color wheel produces a burst of hue and saturation writes.
//! [`WriteCoalescer`] turns such a burst into a single device write: every
//! [`schedule`](WriteCoalescer::schedule) call replaces the pending payload
//! and restarts the quiet-period timer, and only when the timer elapses is
//! the latest payload handed to the [`FlushWrite`] sink.
//!
//! The timer runs on the tokio clock, so tests drive it with
//! `tokio::time::pause` instead of real time.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::error::Result;

/// Destination of coalesced payloads.
pub trait FlushWrite<T>: Send + Sync + 'static {
    /// Performs the device write for `payload`.
    ///
    /// # Errors
    ///
    /// Returns error if the write failed. The coalescer logs it; nobody
    /// retries.
    fn flush(&self, payload: T) -> impl Future<Output = Result<()>> + Send;
}

/// The write waiting for its quiet period to end.
///
/// A new schedule replaces the payload; nothing is queued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PendingWrite<T> {
    /// Nothing is waiting.
    #[default]
    Idle,
    /// A payload waits for the timer started by schedule `generation`.
    Scheduled {
        /// Identifies the schedule call that owns the payload.
        generation: u64,
        /// The most recent payload.
        payload: T,
    },
}

impl<T> PendingWrite<T> {
    /// Returns `true` if a payload is waiting.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Self::Scheduled { .. })
    }

    /// Stores `payload` for `generation` and returns whether an older
    /// payload was superseded.
    pub fn replace(&mut self, generation: u64, payload: T) -> bool {
        let previous = std::mem::replace(
            self,
            Self::Scheduled {
                generation,
                payload,
            },
        );
        previous.is_scheduled()
    }

    /// Takes the payload if it still belongs to `generation`.
    ///
    /// A timer whose schedule was superseded gets `None` and leaves the
    /// newer payload in place.
    pub fn take(&mut self, generation: u64) -> Option<T> {
        match std::mem::take(self) {
            Self::Scheduled {
                generation: current,
                payload,
            } if current == generation => Some(payload),
            other => {
                *self = other;
                None
            }
        }
    }
}

#[derive(Debug)]
struct Slot<T> {
    pending: PendingWrite<T>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
    // Payloads taken from `pending` whose flush has not returned yet
    in_flight: usize,
}

// Counts one payload as in flight until dropped.
struct InFlight<T> {
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T> Drop for InFlight<T> {
    fn drop(&mut self) {
        let mut slot = self.slot.lock();
        slot.in_flight = slot.in_flight.saturating_sub(1);
    }
}

/// Collapses bursts of writes into one write per quiet period.
///
/// Must be used from within a tokio runtime.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use rubetek_light::coalescer::{FlushWrite, WriteCoalescer};
///
/// struct Print;
///
/// impl FlushWrite<u32> for Print {
///     async fn flush(&self, payload: u32) -> rubetek_light::Result<()> {
///         println!("writing {payload}");
///         Ok(())
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let coalescer = WriteCoalescer::new(Arc::new(Print), Duration::from_millis(10));
/// coalescer.schedule(1);
/// coalescer.schedule(2); // only 2 is written
/// tokio::time::sleep(Duration::from_millis(50)).await;
/// # }
/// ```
#[derive(Debug)]
pub struct WriteCoalescer<T, S> {
    delay: Duration,
    slot: Arc<Mutex<Slot<T>>>,
    sink: Arc<S>,
    flushing: Arc<tokio::sync::Mutex<()>>,
}

impl<T, S> WriteCoalescer<T, S>
where
    T: Send + 'static,
    S: FlushWrite<T>,
{
    /// Creates a coalescer flushing to `sink` after `delay` of quiet.
    #[must_use]
    pub fn new(sink: Arc<S>, delay: Duration) -> Self {
        Self {
            delay,
            slot: Arc::new(Mutex::new(Slot {
                pending: PendingWrite::Idle,
                generation: 0,
                timer: None,
                in_flight: 0,
            })),
            sink,
            flushing: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Returns the quiet period.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns `true` if a payload waits for its timer.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot.lock().pending.is_scheduled()
    }

    /// Returns `true` while a payload waits for its timer or is being
    /// flushed.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        let slot = self.slot.lock();
        slot.pending.is_scheduled() || slot.in_flight > 0
    }

    /// Schedules `payload`, superseding any payload still waiting.
    ///
    /// The quiet period restarts with every call. A flush that is already
    /// running is not affected.
    pub fn schedule(&self, payload: T) {
        let mut slot = self.slot.lock();

        slot.generation = slot.generation.wrapping_add(1);
        let generation = slot.generation;

        if slot.pending.replace(generation, payload) {
            tracing::debug!(generation, "Superseding pending write");
        }
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }

        slot.timer = Some(tokio::spawn(fire(
            self.delay,
            generation,
            Arc::clone(&self.slot),
            Arc::clone(&self.sink),
            Arc::clone(&self.flushing),
        )));
    }
}

impl<T, S> Drop for WriteCoalescer<T, S> {
    fn drop(&mut self) {
        if let Some(timer) = self.slot.lock().timer.take() {
            timer.abort();
        }
    }
}

async fn fire<T, S>(
    delay: Duration,
    generation: u64,
    slot: Arc<Mutex<Slot<T>>>,
    sink: Arc<S>,
    flushing: Arc<tokio::sync::Mutex<()>>,
) where
    T: Send + 'static,
    S: FlushWrite<T>,
{
    tokio::time::sleep(delay).await;

    let payload = {
        let mut guard = slot.lock();
        let payload = guard.pending.take(generation);
        if payload.is_some() {
            // From here on the flush must not be aborted by a reschedule
            guard.timer = None;
            guard.in_flight += 1;
        }
        payload
    };
    let Some(payload) = payload else {
        return;
    };
    let _in_flight = InFlight { slot };

    let _flushing = flushing.lock().await;
    tracing::debug!(generation, "Flushing coalesced write");
    if let Err(e) = sink.flush(payload).await {
        tracing::warn!(error = %e, generation, "Coalesced write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::error::{Error, ProtocolError};

    const DELAY: Duration = Duration::from_millis(300);

    #[derive(Default)]
    struct Recorder {
        writes: Mutex<Vec<u32>>,
    }

    impl FlushWrite<u32> for Recorder {
        async fn flush(&self, payload: u32) -> Result<()> {
            self.writes.lock().push(payload);
            Ok(())
        }
    }

    struct Failing {
        attempts: AtomicUsize,
    }

    impl FlushWrite<u32> for Failing {
        async fn flush(&self, _payload: u32) -> Result<()> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(Error::Protocol(ProtocolError::AuthenticationFailed))
        }
    }

    #[derive(Default)]
    struct Slow {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        writes: Mutex<Vec<u32>>,
    }

    impl FlushWrite<u32> for Slow {
        async fn flush(&self, payload: u32) -> Result<()> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_secs(1)).await;
            self.writes.lock().push(payload);
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn pending_write_replace_and_take() {
        let mut pending = PendingWrite::Idle;
        assert!(!pending.replace(1, "a"));
        assert!(pending.replace(2, "b"));

        // Stale generation leaves the newer payload alone
        assert_eq!(pending.take(1), None);
        assert!(pending.is_scheduled());

        assert_eq!(pending.take(2), Some("b"));
        assert_eq!(pending, PendingWrite::Idle);
        assert_eq!(pending.take(2), None);
    }

    #[tokio::test(start_paused = true)]
    async fn burst_flushes_last_payload_once() {
        let sink = Arc::new(Recorder::default());
        let coalescer = WriteCoalescer::new(Arc::clone(&sink), DELAY);

        coalescer.schedule(1);
        tokio::time::sleep(Duration::from_millis(100)).await;
        coalescer.schedule(2);
        tokio::time::sleep(Duration::from_millis(100)).await;
        coalescer.schedule(3);

        tokio::time::sleep(DELAY + Duration::from_millis(10)).await;

        assert_eq!(*sink.writes.lock(), vec![3]);
        assert!(!coalescer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn single_write_waits_for_quiet_period() {
        let sink = Arc::new(Recorder::default());
        let coalescer = WriteCoalescer::new(Arc::clone(&sink), DELAY);

        coalescer.schedule(7);
        tokio::time::sleep(DELAY - Duration::from_millis(1)).await;
        assert!(sink.writes.lock().is_empty());
        assert!(coalescer.is_pending());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*sink.writes.lock(), vec![7]);

        tokio::time::sleep(DELAY * 3).await;
        assert_eq!(*sink.writes.lock(), vec![7]);
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_flush_separately() {
        let sink = Arc::new(Recorder::default());
        let coalescer = WriteCoalescer::new(Arc::clone(&sink), DELAY);

        coalescer.schedule(1);
        tokio::time::sleep(DELAY * 2).await;
        coalescer.schedule(2);
        tokio::time::sleep(DELAY * 2).await;

        assert_eq!(*sink.writes.lock(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_flush_is_not_retried() {
        let sink = Arc::new(Failing {
            attempts: AtomicUsize::new(0),
        });
        let coalescer = WriteCoalescer::new(Arc::clone(&sink), DELAY);

        coalescer.schedule(1);
        tokio::time::sleep(DELAY * 4).await;

        assert_eq!(sink.attempts.load(Ordering::SeqCst), 1);
        assert!(!coalescer.is_pending());

        coalescer.schedule(2);
        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(sink.attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn running_flush_is_not_cancelled_and_flushes_do_not_overlap() {
        let sink = Arc::new(Slow::default());
        let coalescer = WriteCoalescer::new(Arc::clone(&sink), DELAY);

        coalescer.schedule(1);
        // First flush is now sleeping inside the sink
        tokio::time::sleep(DELAY + Duration::from_millis(10)).await;
        coalescer.schedule(2);

        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(*sink.writes.lock(), vec![1, 2]);
        assert_eq!(sink.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn busy_until_flush_returns() {
        let sink = Arc::new(Slow::default());
        let coalescer = WriteCoalescer::new(Arc::clone(&sink), DELAY);
        assert!(!coalescer.is_busy());

        coalescer.schedule(1);
        assert!(coalescer.is_busy());

        // Timer fired, sink still sleeping
        tokio::time::sleep(DELAY + Duration::from_millis(10)).await;
        assert!(!coalescer.is_pending());
        assert!(coalescer.is_busy());
        assert!(sink.writes.lock().is_empty());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(*sink.writes.lock(), vec![1]);
        assert!(!coalescer.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_flush_is_no_longer_busy() {
        let sink = Arc::new(Failing {
            attempts: AtomicUsize::new(0),
        });
        let coalescer = WriteCoalescer::new(Arc::clone(&sink), DELAY);

        coalescer.schedule(1);
        tokio::time::sleep(DELAY * 2).await;

        assert_eq!(sink.attempts.load(Ordering::SeqCst), 1);
        assert!(!coalescer.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_abandons_pending_write() {
        let sink = Arc::new(Recorder::default());
        let coalescer = WriteCoalescer::new(Arc::clone(&sink), DELAY);

        coalescer.schedule(1);
        drop(coalescer);
        tokio::time::sleep(DELAY * 2).await;

        assert!(sink.writes.lock().is_empty());
    }
}
