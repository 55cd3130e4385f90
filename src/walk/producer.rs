//! Producer - runs an iterator on its own thread behind a rendezvous channel

use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use tracing::debug;

/// Consumer side of a background producer.
///
/// The channel has no buffer: the worker blocks on every item until the
/// consumer asks for it. Dropping the `Producer` cancels the worker, which
/// exits at its next hand-off.
pub struct Producer<T> {
    rx: Option<Receiver<T>>,
    handle: Option<JoinHandle<()>>,
}

/// Run `iter` on a worker thread, handing items over one at a time.
pub fn spawn<I>(iter: I) -> Producer<I::Item>
where
    I: Iterator + Send + 'static,
    I::Item: Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(0);
    let handle = thread::spawn(move || produce(iter, tx));
    Producer {
        rx: Some(rx),
        handle: Some(handle),
    }
}

fn produce<I: Iterator>(iter: I, tx: SyncSender<I::Item>) {
    for item in iter {
        if tx.send(item).is_err() {
            debug!("consumer went away, stopping producer");
            return;
        }
    }
}

impl<T> Producer<T> {
    /// Stop the worker and wait for it to exit.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // closing the receiver fails the worker's pending or next send
        self.rx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl<T> Iterator for Producer<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.rx.as_ref()?.recv().ok();
        if item.is_none() {
            self.shutdown();
        }
        item
    }
}

impl<T> Drop for Producer<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
