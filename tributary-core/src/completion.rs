// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Per-source terminal flags for one combinator invocation.
///
/// A flag means "filled" for collect-all and "closed" for the other policies.
/// Flags are monotonic: once set they stay set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    flags: Vec<bool>,
    marked: usize,
}

impl Completion {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            flags: vec![false; len],
            marked: 0,
        }
    }

    /// Number of tracked sources
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Out-of-range positions are reported as marked so they are never polled.
    #[must_use]
    pub fn is_marked(&self, position: usize) -> bool {
        self.flags.get(position).copied().unwrap_or(true)
    }

    /// Marks `position` terminal. Returns `true` only the first time.
    pub fn mark(&mut self, position: usize) -> bool {
        match self.flags.get_mut(position) {
            Some(flag) if !*flag => {
                *flag = true;
                self.marked += 1;
                true
            }
            _ => false,
        }
    }

    /// Number of sources not yet marked
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.flags.len() - self.marked
    }

    /// `true` once every source is marked (immediately for zero sources)
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.marked == self.flags.len()
    }
}
