// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the tributary workspace.
//!
//! Development and testing only:
//!
//! - [`TestChannel`]: a tokio unbounded channel with the sender and source side by side
//! - [`producer`]: producers that send on a schedule from their own task, then close
//! - [`helpers`]: assertions over streams, bounded by timeouts
//! - [`fixtures`]: small value types of unrelated shapes for heterogeneous sources
//!
//! ```rust
//! use tributary_test_utils::fixtures::{person_alice, Person};
//!
//! let alice = person_alice();
//! assert_eq!(alice, Person::new("Alice", 25));
//! ```

pub mod fixtures;
pub mod helpers;
pub mod producer;
pub mod test_channel;

pub use test_channel::{TestChannel, TestChannels};
