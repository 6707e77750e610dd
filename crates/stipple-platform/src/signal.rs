//! Externally owned boolean signals with an explicit subscribe/notify
//! contract.
//!
//! The original cursor suppression flag travelled as a DOM class that the
//! trail polled with a mutation observer. Here the owner holds a
//! [`SignalSource`], flips it with [`set`](SignalSource::set), and every
//! subscriber drains its own channel on its next tick. Readers never write.

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::trace;

/// Owner side of a shared boolean (cursor suppression, reduced motion).
pub struct SignalSource {
    value: bool,
    subscribers: Vec<Sender<bool>>,
}

impl SignalSource {
    pub fn new(initial: bool) -> Self {
        Self {
            value: initial,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> bool {
        self.value
    }

    /// Update and notify. Redundant sets (same value) deliver nothing, so
    /// subscribers never see duplicate edges.
    pub fn set(&mut self, value: bool) {
        if value == self.value {
            return;
        }
        self.value = value;
        trace!(value, "signal flipped");
        self.subscribers.retain(|tx| tx.send(value).is_ok());
    }

    /// New reader handle, seeded with the current value.
    pub fn subscribe(&mut self) -> SignalReceiver {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        SignalReceiver {
            current: self.value,
            rx,
        }
    }
}

/// Reader handle. Draining is lazy: the latest value is observed on `get`.
pub struct SignalReceiver {
    current: bool,
    rx: Receiver<bool>,
}

impl SignalReceiver {
    /// A receiver permanently stuck at `value`, for hosts without the
    /// corresponding signal.
    pub fn fixed(value: bool) -> Self {
        let (_tx, rx) = unbounded();
        Self { current: value, rx }
    }

    /// Latest value, after draining pending notifications.
    pub fn get(&mut self) -> bool {
        while let Ok(v) = self.rx.try_recv() {
            self.current = v;
        }
        self.current
    }

    /// Latest value plus whether it changed since the previous read.
    pub fn poll(&mut self) -> (bool, bool) {
        let previous = self.current;
        let value = self.get();
        (value, value != previous)
    }
}

#[cfg(test)]
mod tests {
    use super::{SignalReceiver, SignalSource};

    #[test]
    fn subscriber_sees_latest_value() {
        let mut source = SignalSource::new(false);
        let mut reader = source.subscribe();
        assert!(!reader.get());
        source.set(true);
        source.set(false);
        source.set(true);
        assert!(reader.get());
    }

    #[test]
    fn redundant_sets_deliver_no_edge() {
        let mut source = SignalSource::new(false);
        let mut reader = source.subscribe();
        let _ = reader.get();
        source.set(false);
        let (value, changed) = reader.poll();
        assert!(!value);
        assert!(!changed);
        source.set(true);
        source.set(true);
        let (value, changed) = reader.poll();
        assert!(value);
        assert!(changed);
    }

    #[test]
    fn fixed_receiver_never_changes() {
        let mut reader = SignalReceiver::fixed(true);
        assert!(reader.get());
        let (value, changed) = reader.poll();
        assert!(value);
        assert!(!changed);
    }

    #[test]
    fn subscribing_after_set_starts_current() {
        let mut source = SignalSource::new(false);
        source.set(true);
        let mut late = source.subscribe();
        assert!(late.get());
    }
}
