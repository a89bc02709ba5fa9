// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::{self, Display};

/// Routing and termination rule applied by the [`Multiplexer`](crate::Multiplexer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Store one value per source; emit them all, in source order, once every source is filled.
    CollectAll,
    /// Emit the first value received from any source, then stop.
    FirstWins,
    /// Forward every value until all sources are closed.
    ForwardAll,
    /// Forward every value until all sources are closed or the cancellation signal fires.
    ForwardUntil,
}

impl Policy {
    /// Name of the combinator that uses this policy
    #[must_use]
    pub const fn combinator(&self) -> &'static str {
        match self {
            Self::CollectAll => "all",
            Self::FirstWins => "race",
            Self::ForwardAll => "select",
            Self::ForwardUntil => "select_until",
        }
    }

    /// Whether values are forwarded as soon as they are received
    #[must_use]
    pub const fn is_forwarding(&self) -> bool {
        matches!(self, Self::ForwardAll | Self::ForwardUntil)
    }

    /// Whether an external signal may end the run early
    #[must_use]
    pub const fn is_cancellable(&self) -> bool {
        matches!(self, Self::ForwardUntil)
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.combinator())
    }
}

/// Why a multiplexer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// Every source delivered a value or closed (collect-all).
    AllFilled,
    /// A value won the race.
    FirstValue,
    /// Every source closed.
    AllClosed,
    /// The cancellation signal fired.
    Cancelled,
}

impl Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::AllFilled => "all sources filled",
            Self::FirstValue => "first value received",
            Self::AllClosed => "all sources closed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(reason)
    }
}
