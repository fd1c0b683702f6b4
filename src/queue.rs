//! Fixed-capacity circular command queue.
//!
//! Storage is a plain array plus head and tail indices. One slot is always
//! left unused so that `head == tail` means empty and `tail + 1 == head`
//! (mod N) means full without a separate count, which gives a usable
//! capacity of `N - 1`.

use crate::command::Command;

/// Returned by [`CommandQueue::enqueue`] when no slot is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull;

/// Single-producer, single-consumer ring of [`Command`]s.
#[derive(Debug, Clone)]
pub struct CommandQueue<const N: usize> {
    slots: [Command; N],
    head: usize,
    tail: usize,
}

impl<const N: usize> CommandQueue<N> {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        const { assert!(N >= 2, "queue needs at least two slots") };

        Self {
            slots: [Command::Empty; N],
            head: 0,
            tail: 0,
        }
    }

    /// Stores `cmd` at the tail.
    pub fn enqueue(&mut self, cmd: Command) -> Result<(), QueueFull> {
        let next_tail = (self.tail + 1) % N;
        if next_tail == self.head {
            return Err(QueueFull);
        }

        self.slots[self.tail] = cmd;
        self.tail = next_tail;
        Ok(())
    }

    /// Returns the front command without removing it.
    pub fn peek(&self) -> Option<Command> {
        if self.is_empty() {
            None
        } else {
            Some(self.slots[self.head])
        }
    }

    /// Drops the front command. Does nothing on an empty queue.
    pub fn advance_head(&mut self) {
        if !self.is_empty() {
            self.head = (self.head + 1) % N;
        }
    }

    /// Discards every pending command.
    pub fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
    }

    /// Number of pending commands.
    pub fn count(&self) -> usize {
        (self.tail + N - self.head) % N
    }

    /// Occupancy as a percentage of the slot count `N`.
    ///
    /// Because one slot is sacrificial this never quite reaches 100.
    pub fn percent_full(&self) -> f32 {
        (self.count() as f32 * 100.0) / N as f32
    }

    /// Number of slots, including the sacrificial one.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Returns true if the next enqueue would fail.
    pub fn is_full(&self) -> bool {
        (self.tail + 1) % N == self.head
    }
}

impl<const N: usize> Default for CommandQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
