// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Input and output providers for the [Interpreter]
//!
//! An [Interpreter] pulls from an [InputProvider] when executing an `IN` instruction, and pushes
//! to an [OutputProvider] when executing an `OUT` instruction. An empty input provider is how
//! the interpreter knows to suspend, so providers never block.
//!
//! Two providers are included:
//!
//! * [IoQueue], a plain FIFO queue, which is the default for both sides
//! * [SharedQueue], a handle to a FIFO queue which can be cloned, so that one interpreter's output
//!   can be another's input
//!
//! # Example
//!
//! ```
//! use intcode_vm::prelude::*;
//! use intcode_vm::SharedQueue;
//!
//! // each machine adds 1 to its input, and passes it along
//! const INCREMENT: &str = "3,9,1001,9,1,9,4,9,99,0";
//! let pipe = SharedQueue::new();
//! let mut first = Interpreter::with_io(INCREMENT, IoQueue::from([10]), pipe.clone()).unwrap();
//! let mut second = Interpreter::with_io(INCREMENT, pipe, IoQueue::new()).unwrap();
//!
//! assert_eq!(second.run(), Ok(State::Awaiting));
//! assert_eq!(first.run(), Ok(State::Halted));
//! assert_eq!(second.run(), Ok(State::Halted));
//! assert_eq!(second.output_mut().try_take_next(), Some(12));
//! ```
//!
//! [Interpreter]: crate::Interpreter

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::AsciiError;

/// A source of values for `IN` instructions
pub trait InputProvider {
    /// Take the next value, if one is available. This must never block.
    fn try_get_next(&mut self) -> Option<i64>;

    /// Queue up a value to be read later
    fn add(&mut self, value: i64);

    /// Queue up each of `values` in order
    fn fill(&mut self, values: &[i64]) {
        for &value in values {
            self.add(value);
        }
    }

    /// Queue up each byte of `text` in order
    ///
    /// Fails without queueing anything if `text` contains a non-ASCII character.
    fn add_ascii(&mut self, text: &str) -> Result<(), AsciiError> {
        if let Some(bad_char) = text.chars().find(|c| !c.is_ascii()) {
            return Err(AsciiError::InvalidAsciiChar(bad_char));
        }
        for byte in text.bytes() {
            self.add(i64::from(byte));
        }
        Ok(())
    }
}

/// A destination for values from `OUT` instructions
pub trait OutputProvider {
    /// Record an emitted value
    fn emit(&mut self, value: i64);

    /// Remove and return the oldest emitted value that hasn't been taken yet
    fn try_take_next(&mut self) -> Option<i64>;

    /// Return the oldest emitted value that hasn't been taken yet, without removing it
    fn peek_next(&self) -> Option<i64>;

    /// Number of values waiting to be taken
    fn len(&self) -> usize;

    /// Whether there are no values waiting to be taken
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lazily take values in order until none are left
    fn drain(&mut self) -> Drain<'_, Self>
    where
        Self: Sized,
    {
        Drain(self)
    }

    /// Take leading values that are valid ASCII, decoding them into a [String].
    ///
    /// Stops before the first value outside of `0..=127`, leaving it in place, as programs which
    /// communicate in ASCII often end with a single large non-ASCII number.
    fn take_ascii(&mut self) -> String {
        let mut s = String::with_capacity(self.len());
        while let Some(c) = self.peek_next().and_then(ascii_char) {
            s.push(c);
            self.try_take_next();
        }
        s
    }
}

/// Convert an Intcode value into an ASCII [char], if it's in range
pub fn ascii_char(value: i64) -> Option<char> {
    u8::try_from(value)
        .ok()
        .filter(u8::is_ascii)
        .map(char::from)
}

/// A lazy iterator that takes values from an [OutputProvider]
///
/// See [`OutputProvider::drain`]
#[derive(Debug)]
pub struct Drain<'a, O: OutputProvider>(&'a mut O);

impl<O: OutputProvider> Iterator for Drain<'_, O> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        self.0.try_take_next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.len();
        (len, Some(len))
    }
}

/// An unbounded first-in first-out queue of values
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IoQueue(VecDeque<i64>);

impl IoQueue {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self(VecDeque::new())
    }

    /// Discard all queued values
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterate over the queued values without removing them
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }
}

impl<const N: usize> From<[i64; N]> for IoQueue {
    fn from(values: [i64; N]) -> Self {
        Self(VecDeque::from(values))
    }
}

impl From<Vec<i64>> for IoQueue {
    fn from(values: Vec<i64>) -> Self {
        Self(VecDeque::from(values))
    }
}

impl FromIterator<i64> for IoQueue {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<i64> for IoQueue {
    fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl InputProvider for IoQueue {
    fn try_get_next(&mut self) -> Option<i64> {
        self.0.pop_front()
    }

    fn add(&mut self, value: i64) {
        self.0.push_back(value);
    }

    fn fill(&mut self, values: &[i64]) {
        self.0.extend(values);
    }
}

impl OutputProvider for IoQueue {
    fn emit(&mut self, value: i64) {
        self.0.push_back(value);
    }

    fn try_take_next(&mut self) -> Option<i64> {
        self.0.pop_front()
    }

    fn peek_next(&self) -> Option<i64> {
        self.0.front().copied()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// A clonable handle to an [IoQueue]
///
/// Every clone refers to the same queue, so it can be used as one [Interpreter]'s output and
/// another's input. There's no locking, so it can't be sent across threads.
///
/// [Interpreter]: crate::Interpreter
#[derive(Debug, Default, Clone)]
pub struct SharedQueue(Rc<RefCell<IoQueue>>);

impl SharedQueue {
    /// Create a handle to a new, empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all queued values
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Whether `self` and `other` refer to the same queue
    pub fn same_queue(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Copy out the queued values without removing them
    pub fn snapshot(&self) -> Vec<i64> {
        self.0.borrow().iter().collect()
    }
}

impl From<IoQueue> for SharedQueue {
    fn from(queue: IoQueue) -> Self {
        Self(Rc::new(RefCell::new(queue)))
    }
}

impl InputProvider for SharedQueue {
    fn try_get_next(&mut self) -> Option<i64> {
        self.0.borrow_mut().try_get_next()
    }

    fn add(&mut self, value: i64) {
        self.0.borrow_mut().add(value);
    }

    fn fill(&mut self, values: &[i64]) {
        InputProvider::fill(&mut *self.0.borrow_mut(), values);
    }
}

impl OutputProvider for SharedQueue {
    fn emit(&mut self, value: i64) {
        self.0.borrow_mut().emit(value);
    }

    fn try_take_next(&mut self) -> Option<i64> {
        self.0.borrow_mut().try_take_next()
    }

    fn peek_next(&self) -> Option<i64> {
        self.0.borrow().peek_next()
    }

    fn len(&self) -> usize {
        self.0.borrow().len()
    }
}
