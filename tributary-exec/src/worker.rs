// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_channel::Sender;
use core::pin::pin;
use futures::future::{select, Either};
use futures::stream::{Stream, StreamExt};
use tributary_core::{CancellationToken, Policy};
use tributary_error::TributaryError;

/// Drives `emissions` into `sender` until the stream ends, the consumer
/// goes away or `cancel` fires. Closes the output exactly once on the way out.
pub(crate) async fn run<S>(
    policy: Policy,
    mut emissions: S,
    sender: Sender<S::Item>,
    cancel: CancellationToken,
) where
    S: Stream + Unpin,
{
    debug!("{}: worker started", policy);
    let mut forwarded: u64 = 0;

    loop {
        let next = match select(pin!(cancel.cancelled()), emissions.next()).await {
            Either::Left(((), _)) => {
                debug!("{}: worker cancelled", policy);
                break;
            }
            Either::Right((next, _)) => next,
        };

        let Some(value) = next else {
            break;
        };

        if !forward(policy, &sender, &cancel, value).await {
            break;
        }
        forwarded += 1;
    }

    drop(emissions);
    sender.close();
    debug!("{}: output closed after {} emissions", policy, forwarded);
}

async fn forward<T>(
    policy: Policy,
    sender: &Sender<T>,
    cancel: &CancellationToken,
    value: T,
) -> bool {
    match select(pin!(cancel.cancelled()), pin!(sender.send(value))).await {
        Either::Left(((), _)) => {
            debug!("{}: worker cancelled while the output was full", policy);
            false
        }
        Either::Right((Ok(()), _)) => true,
        Either::Right((Err(_), _)) => {
            debug!("{}: {}, stopping", policy, TributaryError::ChannelSendError);
            false
        }
    }
}
