// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use tributary_error::{Result, TributaryError};

/// Output buffer size used when none is configured.
pub const DEFAULT_CAPACITY: usize = 1;

/// Settings applied to every combinator launched by a [`Spawner`](crate::Spawner).
///
/// ```
/// use tributary_exec::ExecConfig;
///
/// let config = ExecConfig::default().with_capacity(16);
/// assert_eq!(config.capacity(), 16);
/// assert!(config.validate().is_ok());
///
/// assert!(ExecConfig::default().with_capacity(0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecConfig {
    capacity: usize,
}

impl ExecConfig {
    /// Number of emissions the output channel buffers before the worker waits
    /// for the consumer.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// # Errors
    ///
    /// Returns [`TributaryError::InvalidConfig`] for a zero capacity.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(TributaryError::invalid_config(
                "output capacity must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}
