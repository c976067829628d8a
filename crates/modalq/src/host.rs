#![forbid(unsafe_code)]

//! Contract with the rendering host.
//!
//! The host owns drawing, animation timing and gesture detection. The
//! sequencer hands it at most one [`Presentation`] per pass and expects the
//! host to report back with [`HostEvent`]s.
//!
//! # Invariants
//!
//! - The host receives `Some(presentation)` for exactly one modal or `None`.
//! - After `visible` goes false the host must eventually deliver
//!   [`HostEvent::ModalHide`]; until it does, the next modal is not presented.
//!
//! # Failure Modes
//!
//! - A host that never reports `ModalHide` stalls the queue on that modal.
//! - `ModalHide` without a preceding close is accepted (the host dismissed
//!   the modal on its own) and logged at `warn`.

use crate::config::ModalConfig;
use crate::request::ModalId;

/// Notifications the host sends back to the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HostEvent {
    /// The user tapped outside the modal content.
    BackdropPress,
    /// The platform back button was pressed.
    BackButtonPress,
    /// A configured swipe gesture crossed its threshold.
    SwipeComplete,
    /// The entrance animation finished.
    ModalShow,
    /// The exit animation finished and the modal is fully hidden.
    ModalHide,
}

impl HostEvent {
    /// Short name used in log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BackdropPress => "backdrop_press",
            Self::BackButtonPress => "back_button_press",
            Self::SwipeComplete => "swipe_complete",
            Self::ModalShow => "modal_show",
            Self::ModalHide => "modal_hide",
        }
    }
}

/// Everything the host needs to draw the current modal.
#[derive(Debug)]
pub struct Presentation<'a, C> {
    pub id: ModalId,
    pub config: &'a ModalConfig,
    pub content: &'a C,
    /// Whether the modal should be on screen. When this flips to false the
    /// host runs the exit animation and then reports `ModalHide`.
    pub visible: bool,
}

impl<C> Clone for Presentation<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Presentation<'_, C> {}

/// A rendering layer driven by the sequencer.
pub trait ModalHost<C> {
    /// Receive the current presentation, or `None` when nothing is current.
    fn present(&mut self, presentation: Option<Presentation<'_, C>>);
}

impl<C, F> ModalHost<C> for F
where
    F: FnMut(Option<Presentation<'_, C>>),
{
    fn present(&mut self, presentation: Option<Presentation<'_, C>>) {
        self(presentation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_are_stable() {
        assert_eq!(HostEvent::BackdropPress.as_str(), "backdrop_press");
        assert_eq!(HostEvent::ModalHide.as_str(), "modal_hide");
    }

    #[test]
    fn closures_are_hosts() {
        let config = ModalConfig::default();
        let content = String::from("hello");
        let mut seen: Vec<Option<(ModalId, String, bool)>> = Vec::new();
        let mut host = |p: Option<Presentation<'_, String>>| {
            seen.push(p.map(|p| (p.id, p.content.clone(), p.visible)));
        };

        host.present(Some(Presentation {
            id: ModalId(1),
            config: &config,
            content: &content,
            visible: true,
        }));
        host.present(None);

        assert_eq!(seen, vec![Some((ModalId(1), "hello".to_string(), true)), None]);
    }
}
