#![forbid(unsafe_code)]

//! Frame transcript recorded by the simulated host.
//!
//! # Invariants checked
//!
//! - No overlap: a different modal is never presented while the previous
//!   one is still running its exit animation.
//! - FIFO: modals become visible in increasing id order, each at most once.

use std::fmt;

use modalq::ModalId;
use serde::Serialize;

/// One `present` call as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameRecord {
    pub tick: u64,
    pub modal: Option<ModalId>,
    pub label: Option<String>,
    pub visible: bool,
}

/// A broken sequencing guarantee found in a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptViolation {
    /// `incoming` was presented while `outgoing` was still animating out.
    Overlap {
        tick: u64,
        outgoing: ModalId,
        incoming: ModalId,
    },
    /// `modal` became visible after a later-enqueued modal, or twice.
    OutOfOrder {
        tick: u64,
        previous: ModalId,
        modal: ModalId,
    },
}

impl fmt::Display for TranscriptViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overlap {
                tick,
                outgoing,
                incoming,
            } => write!(
                f,
                "tick {tick}: {incoming} presented while {outgoing} was still hiding"
            ),
            Self::OutOfOrder {
                tick,
                previous,
                modal,
            } => write!(f, "tick {tick}: {modal} shown after {previous}"),
        }
    }
}

impl std::error::Error for TranscriptViolation {}

/// Deduplicated sequence of frames plus any overlaps the host observed.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    frames: Vec<FrameRecord>,
    overlaps: Vec<TranscriptViolation>,
}

impl Transcript {
    /// Record a frame unless it repeats the previous one.
    pub(crate) fn push(&mut self, frame: FrameRecord) {
        let same = self.frames.last().is_some_and(|last| {
            last.modal == frame.modal && last.visible == frame.visible && last.label == frame.label
        });
        if !same {
            self.frames.push(frame);
        }
    }

    pub(crate) fn record_overlap(&mut self, tick: u64, outgoing: ModalId, incoming: ModalId) {
        tracing::warn!(
            tick,
            outgoing = outgoing.id(),
            incoming = incoming.id(),
            "modal presented during exit animation"
        );
        self.overlaps.push(TranscriptViolation::Overlap {
            tick,
            outgoing,
            incoming,
        });
    }

    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    /// Ids in the order they first became visible.
    pub fn presentation_order(&self) -> Vec<ModalId> {
        let mut order: Vec<ModalId> = Vec::new();
        for frame in &self.frames {
            if let (Some(id), true) = (frame.modal, frame.visible)
                && order.last() != Some(&id)
            {
                order.push(id);
            }
        }
        order
    }

    /// Labels in the order their modals first became visible.
    pub fn presented_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        let mut last = None;
        for frame in &self.frames {
            if frame.visible && frame.modal != last {
                last = frame.modal;
                if let Some(label) = &frame.label {
                    labels.push(label.clone());
                }
            }
        }
        labels
    }

    /// Check the no-overlap and FIFO guarantees.
    pub fn check(&self) -> Result<(), TranscriptViolation> {
        if let Some(overlap) = self.overlaps.first() {
            return Err(overlap.clone());
        }

        let mut previous: Option<ModalId> = None;
        for frame in &self.frames {
            let (Some(id), true) = (frame.modal, frame.visible) else {
                continue;
            };
            match previous {
                Some(prev) if prev == id => {}
                Some(prev) if id < prev => {
                    return Err(TranscriptViolation::OutOfOrder {
                        tick: frame.tick,
                        previous: prev,
                        modal: id,
                    });
                }
                _ => previous = Some(id),
            }
        }

        Ok(())
    }

    /// Export frames as JSON lines.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for frame in &self.frames {
            out.push_str(&serde_json::to_string(frame)?);
            out.push('\n');
        }
        Ok(out)
    }
}
