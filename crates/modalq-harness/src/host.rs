#![forbid(unsafe_code)]

//! Tick-driven stand-in for a modal rendering component.

use modalq::{HostEvent, ModalHost, ModalId, Presentation};

use crate::transcript::{FrameRecord, Transcript};

/// Where the simulated host is in its animation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    /// Nothing on screen.
    Idle,
    /// Entrance animation running.
    Entering { id: ModalId, remaining: u32 },
    /// Fully on screen.
    Shown { id: ModalId },
    /// Exit animation running; `ModalHide` fires when it ends.
    Exiting { id: ModalId, remaining: u32 },
}

impl AnimationState {
    fn id(self) -> Option<ModalId> {
        match self {
            Self::Idle => None,
            Self::Entering { id, .. } | Self::Shown { id } | Self::Exiting { id, .. } => Some(id),
        }
    }
}

/// Simulated rendering host.
///
/// Gestures injected with [`press_backdrop`](Self::press_backdrop) and
/// friends are delivered on the next [`tick`](Self::tick), ahead of any
/// animation notifications for that tick.
#[derive(Debug)]
pub struct SimulatedHost {
    state: AnimationState,
    now: u64,
    injected: Vec<HostEvent>,
    transcript: Transcript,
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self {
            state: AnimationState::Idle,
            now: 0,
            injected: Vec::new(),
            transcript: Transcript::default(),
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Current tick.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// No animation is running and nothing is waiting to be delivered.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, AnimationState::Idle) && self.injected.is_empty()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn into_transcript(self) -> Transcript {
        self.transcript
    }

    pub fn press_backdrop(&mut self) {
        self.injected.push(HostEvent::BackdropPress);
    }

    pub fn press_back_button(&mut self) {
        self.injected.push(HostEvent::BackButtonPress);
    }

    pub fn complete_swipe(&mut self) {
        self.injected.push(HostEvent::SwipeComplete);
    }

    /// Advance one tick and return the notifications due.
    pub fn tick(&mut self) -> Vec<HostEvent> {
        self.now += 1;
        let mut events = std::mem::take(&mut self.injected);

        self.state = match self.state {
            AnimationState::Entering { id, remaining } => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    events.push(HostEvent::ModalShow);
                    AnimationState::Shown { id }
                } else {
                    AnimationState::Entering { id, remaining }
                }
            }
            AnimationState::Exiting { id, remaining } => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    events.push(HostEvent::ModalHide);
                    AnimationState::Idle
                } else {
                    AnimationState::Exiting { id, remaining }
                }
            }
            other => other,
        };

        for event in &events {
            tracing::trace!(tick = self.now, event = event.as_str(), "host notification");
        }
        events
    }

    fn on_present(&mut self, id: Option<ModalId>, label: Option<String>, visible: bool, timings: (u32, u32)) {
        let (in_ms, out_ms) = timings;
        let next = match (self.state, id) {
            (AnimationState::Exiting { id: outgoing, .. }, Some(incoming)) if outgoing != incoming => {
                self.transcript.record_overlap(self.now, outgoing, incoming);
                if visible {
                    AnimationState::Entering { id: incoming, remaining: in_ms }
                } else {
                    AnimationState::Exiting { id: incoming, remaining: out_ms }
                }
            }
            (state, Some(id)) if visible => match state {
                AnimationState::Entering { id: cur, .. } | AnimationState::Shown { id: cur }
                    if cur == id =>
                {
                    state
                }
                _ => AnimationState::Entering { id, remaining: in_ms },
            },
            (state, Some(id)) => match state {
                AnimationState::Exiting { id: cur, .. } if cur == id => state,
                _ => AnimationState::Exiting { id, remaining: out_ms },
            },
            (AnimationState::Exiting { .. }, None) => self.state,
            (_, None) => AnimationState::Idle,
        };

        if next != self.state {
            tracing::trace!(tick = self.now, from = ?self.state, to = ?next, "host animation");
        }
        self.state = next;

        self.transcript.push(FrameRecord {
            tick: self.now,
            modal: id.or(self.state.id()),
            label,
            visible,
        });
    }
}

impl<C: Clone + Into<String>> ModalHost<C> for SimulatedHost {
    fn present(&mut self, presentation: Option<Presentation<'_, C>>) {
        match presentation {
            Some(p) => self.on_present(
                Some(p.id),
                Some(p.content.clone().into()),
                p.visible,
                (p.config.animation_in_ms, p.config.animation_out_ms),
            ),
            None => self.on_present(None, None, false, (0, 0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modalq::{ModalConfig, ModalQueueProvider, ModalRequest};

    #[test]
    fn entrance_then_show_notification() {
        let provider = ModalQueueProvider::new();
        provider
            .handle()
            .add_modal(ModalRequest::new("A").config(ModalConfig::new().animation_in_ms(2)));
        let mut host = SimulatedHost::new();

        provider.render(&mut host);
        assert!(matches!(host.state(), AnimationState::Entering { remaining: 2, .. }));
        assert!(host.tick().is_empty());
        assert_eq!(host.tick(), vec![HostEvent::ModalShow]);
        assert!(matches!(host.state(), AnimationState::Shown { .. }));
    }

    #[test]
    fn exit_reports_hide_after_configured_ticks() {
        let provider = ModalQueueProvider::new();
        let modals = provider.handle();
        modals.add_modal(ModalRequest::new("A").config(ModalConfig::new().animation_out_ms(3)));
        let mut host = SimulatedHost::new();
        provider.render(&mut host);

        modals.close_modal();
        provider.render(&mut host);
        assert!(matches!(host.state(), AnimationState::Exiting { remaining: 3, .. }));
        assert!(host.tick().is_empty());
        assert!(host.tick().is_empty());
        assert_eq!(host.tick(), vec![HostEvent::ModalHide]);
        assert_eq!(host.state(), AnimationState::Idle);
    }

    #[test]
    fn injected_gestures_are_delivered_first() {
        let mut host = SimulatedHost::new();
        host.press_back_button();
        host.press_backdrop();
        assert!(!host.is_idle());
        assert_eq!(
            host.tick(),
            vec![HostEvent::BackButtonPress, HostEvent::BackdropPress]
        );
        assert!(host.is_idle());
    }

    #[test]
    fn zero_length_animation_fires_next_tick() {
        let provider = ModalQueueProvider::new();
        provider.handle().add_modal(
            ModalRequest::new("A").config(ModalConfig::new().animation_in_ms(0)),
        );
        let mut host = SimulatedHost::new();
        provider.render(&mut host);
        assert_eq!(host.tick(), vec![HostEvent::ModalShow]);
    }
}
