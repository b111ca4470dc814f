// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Background application of display brightness

use crate::device::Hardware;
use crate::error::Error;
use log::{debug, trace};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

/// A worker thread applying brightness values one at a time
///
/// At most one value is in flight. Values submitted while the previous one is still
/// being applied are rejected, never queued.
pub struct BrightnessWorker {
    sender: Option<mpsc::Sender<i32>>,
    busy: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl BrightnessWorker {
    /// Spawn the worker thread
    pub fn new(hardware: Arc<dyn Hardware>) -> Result<Self, Error> {
        let (sender, receiver) = mpsc::channel::<i32>();
        let busy = Arc::new(AtomicBool::new(false));

        let worker_busy = busy.clone();
        let thread = thread::Builder::new()
            .name("hud-brightness".to_owned())
            .spawn(move || {
                // Ends when the sender is dropped
                for brightness in receiver {
                    debug!("Setting brightness to {brightness}");
                    hardware.set_brightness(brightness);
                    worker_busy.store(false, Ordering::Release);
                }
            })
            .map_err(|e| Error::Io((e, "failed to spawn brightness worker")))?;

        Ok(Self {
            sender: Some(sender),
            busy,
            thread: Some(thread),
        })
    }

    /// Whether a value is being applied
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Hand `brightness` to the worker
    ///
    /// Returns false if the previous value is still in flight or the worker is gone.
    pub fn submit(&self, brightness: i32) -> bool {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            trace!("Brightness {brightness} dropped, previous value in flight");
            return false;
        }
        let sent = self
            .sender
            .as_ref()
            .is_some_and(|sender| sender.send(brightness).is_ok());
        if !sent {
            self.busy.store(false, Ordering::Release);
        }
        sent
    }
}

impl Drop for BrightnessWorker {
    fn drop(&mut self) {
        drop(self.sender.take());
        if let Some(thread) = self.thread.take() {
            // In-flight calls run to completion
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::BrightnessWorker;
    use crate::device::test::MockHardware;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    pub(crate) fn wait_idle(worker: &BrightnessWorker) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while worker.is_busy() {
            assert!(Instant::now() < deadline, "brightness worker stuck");
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn busy_worker_drops_values() {
        let hardware = Arc::new(MockHardware::default());
        hardware.hold_brightness(true);
        let worker = BrightnessWorker::new(hardware.clone()).unwrap();

        assert!(worker.submit(40));
        assert!(worker.is_busy());
        assert!(!worker.submit(41));

        hardware.hold_brightness(false);
        wait_idle(&worker);
        assert!(worker.submit(42));
        wait_idle(&worker);

        assert_eq!(hardware.brightness_calls(), [40, 42]);
    }

    #[test]
    fn drop_finishes_in_flight_call() {
        let hardware = Arc::new(MockHardware::default());
        let worker = BrightnessWorker::new(hardware.clone()).unwrap();
        assert!(worker.submit(10));
        drop(worker);
        assert_eq!(hardware.brightness_calls(), [10]);
    }
}
