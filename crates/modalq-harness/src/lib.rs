#![forbid(unsafe_code)]

//! Simulated rendering host and transcript checks for modalq.
//!
//! [`SimulatedHost`] stands in for a real modal component: it receives
//! presentations, runs entrance and exit "animations" on a tick clock, and
//! reports `ModalShow` / `ModalHide` back to the provider when they finish.
//! Every frame it draws is recorded in a [`Transcript`] that tests can
//! inspect or export as JSON lines.
//!
//! One tick is one millisecond of animation time, so a modal configured
//! with `animation_out_ms = 300` reports hide-completion 300 ticks after
//! it is told to hide.

mod host;
mod transcript;

pub use host::{AnimationState, SimulatedHost};
pub use transcript::{FrameRecord, Transcript, TranscriptViolation};

use modalq::{HostEvent, ModalQueueProvider};

/// Drive `provider` for `ticks` ticks, delivering every host notification.
///
/// Returns the notifications in delivery order.
pub fn run_ticks<C: Clone + Into<String> + 'static>(
    provider: &ModalQueueProvider<C>,
    host: &mut SimulatedHost,
    ticks: u32,
) -> Vec<HostEvent> {
    let mut delivered = Vec::new();
    provider.render(host);
    for _ in 0..ticks {
        for event in host.tick() {
            provider.dispatch(event);
            delivered.push(event);
        }
        provider.render(host);
    }
    delivered
}

/// Tick until the host is idle with nothing presented, or `max_ticks`
/// elapse. Returns the number of ticks used.
pub fn run_until_idle<C: Clone + Into<String> + 'static>(
    provider: &ModalQueueProvider<C>,
    host: &mut SimulatedHost,
    max_ticks: u32,
) -> u32 {
    provider.render(host);
    for used in 0..max_ticks {
        if host.is_idle() && provider.snapshot().current.is_none() {
            return used;
        }
        for event in host.tick() {
            provider.dispatch(event);
        }
        provider.render(host);
    }
    max_ticks
}
