//! Bounded request channel for `no_std` environments.
//!
//! Multi-producer channel built on `critical-section` and `heapless::Deque`,
//! safe to share between threads and interrupt handlers. Controllers queue
//! zone requests from wherever they run; the engine drains the queue at the
//! start of each tick.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Error returned when sending to a full channel.
///
/// Carries the rejected value back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull<T>(pub T);

/// A bounded, thread-safe request queue.
///
/// Synchronization happens through critical sections, so the channel works
/// on bare-metal targets without an allocator. Storage is a fixed-size
/// `heapless::Deque`.
pub struct Channel<T, const SIZE: usize> {
    inner: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    /// Create a new empty channel.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for this channel.
    ///
    /// Multiple senders can coexist; they share access to the same queue.
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Get a receiver handle for this channel.
    ///
    /// Typically only one receiver should drain the queue, but multiple
    /// receivers are allowed (they will compete for messages).
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Try to send a value into the channel.
    ///
    /// Returns `Err(QueueFull(value))` if the channel is full.
    pub fn try_send(&self, value: T) -> Result<(), QueueFull<T>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(value).map_err(QueueFull)
        })
    }

    /// Receive the oldest queued value, if any.
    pub fn receive(&self) -> Option<T> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front()
        })
    }

    /// Number of values currently queued.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sender handle for a [`Channel`].
///
/// This is a lightweight reference that can be cloned and passed around.
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    /// Try to send a value into the channel.
    ///
    /// Returns `Err(QueueFull(value))` if the channel is full.
    pub fn try_send(&self, value: T) -> Result<(), QueueFull<T>> {
        self.channel.try_send(value)
    }
}

/// A receiver handle for a [`Channel`].
///
/// This is a lightweight reference that can be cloned and passed around.
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    /// Receive the oldest queued value, if any.
    pub fn receive(&self) -> Option<T> {
        self.channel.receive()
    }
}
