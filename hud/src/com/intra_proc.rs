// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use super::Event;
use crate::error::Error;
use crate::error::Error::Channel;
use std::sync::{mpsc, Arc, Mutex};

type Senders = Arc<Mutex<Vec<mpsc::Sender<Event>>>>;

/// Create a bus with one publisher and one subscription
pub fn channel() -> (Publisher, Subscription) {
    let bus = Bus::default();
    let subscription = bus.subscribe();
    (bus.publisher(), subscription)
}

/// In-process fan-out bus
///
/// Every subscription gets a copy of every published event.
#[derive(Debug, Default, Clone)]
pub struct Bus {
    senders: Senders,
}

impl Bus {
    pub fn new() -> Bus {
        Bus::default()
    }

    /// Add a new subscription. It only receives events published after this call.
    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::channel();
        match self.senders.lock() {
            Ok(mut senders) => senders.push(sender),
            // A poisoned list still holds valid senders
            Err(poisoned) => poisoned.into_inner().push(sender),
        }
        Subscription { receiver }
    }

    pub fn publisher(&self) -> Publisher {
        Publisher {
            senders: self.senders.clone(),
        }
    }
}

/// Publishing end of a [Bus]
#[derive(Debug, Clone)]
pub struct Publisher {
    senders: Senders,
}

impl Publisher {
    /// Send `event` to every live subscription. Dropped subscriptions are forgotten.
    pub fn send(&self, event: Event) -> Result<(), Error> {
        let mut senders = self
            .senders
            .lock()
            .map_err(|_| Channel("bus lock poisoned"))?;
        senders.retain(|sender| sender.send(event.clone()).is_ok());
        Ok(())
    }

    /// Number of live subscriptions seen by the last send
    pub fn subscribers(&self) -> usize {
        self.senders.lock().map_or(0, |senders| senders.len())
    }
}

/// Receiving end of a [Bus]
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::Receiver<Event>,
}

impl Subscription {
    /// Read the next pending event without blocking
    pub fn read(&mut self) -> Result<Option<Event>, Error> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => Err(Channel("all publishers dropped")),
        }
    }
}
