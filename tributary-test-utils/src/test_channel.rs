// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A test channel that keeps the sender next to the source it feeds.
///
/// The `source` is a plain tokio receiver, which is a `Source` as is.
pub struct TestChannel<T> {
    pub sender: UnboundedSender<T>,
    pub source: UnboundedReceiver<T>,
}

impl<T> TestChannel<T> {
    pub fn new() -> Self {
        let (sender, source) = mpsc::unbounded_channel();
        Self { sender, source }
    }

    /// Send a value through the channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the source has been dropped.
    pub fn send(&self, value: T) -> Result<(), mpsc::error::SendError<T>> {
        self.sender.send(value)
    }

    /// Splits into the sender and the source.
    pub fn split(self) -> (UnboundedSender<T>, UnboundedReceiver<T>) {
        (self.sender, self.source)
    }
}

impl<T> Default for TestChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to create multiple test channels at once.
pub struct TestChannels;

impl TestChannels {
    pub fn two<T>() -> (TestChannel<T>, TestChannel<T>) {
        (TestChannel::new(), TestChannel::new())
    }

    pub fn three<T>() -> (TestChannel<T>, TestChannel<T>, TestChannel<T>) {
        (TestChannel::new(), TestChannel::new(), TestChannel::new())
    }

    /// `count` channels, split into their senders and sources.
    pub fn many<T>(count: usize) -> (Vec<UnboundedSender<T>>, Vec<UnboundedReceiver<T>>) {
        (0..count).map(|_| TestChannel::new().split()).unzip()
    }
}
