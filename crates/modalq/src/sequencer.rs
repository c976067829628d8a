#![forbid(unsafe_code)]

//! FIFO modal sequencer with hide-animation handoff.
//!
//! The `ModalSequencer` drains a queue of [`ModalRequest`]s one at a time.
//! The head of the queue is the current modal; closing it only hides it,
//! and the head is removed once the host confirms the exit animation is
//! done. Only then is the next request presented.
//!
//! # Invariants
//!
//! - At most one request is visible at any time, and it is the queue head.
//! - Display order equals enqueue order.
//! - The head is removed only by [`ModalSequencer::hide_completed`].
//! - While a dismissal is in flight (`transitioning`), the current/visible
//!   pair is frozen: enqueues wait, and the outgoing modal keeps its
//!   content so the exit animation can finish.
//!
//! # Failure Modes
//!
//! - `request_close()` with nothing current is ignored.
//! - `hide_completed()` on an empty queue returns `None`.
//! - If the host never reports hide-completion the queue stalls on the
//!   dismissing modal. There is no timeout.
//!
//! # Example
//!
//! ```
//! use modalq::{ModalRequest, ModalSequencer};
//!
//! let mut modals = ModalSequencer::new();
//! let a = modals.enqueue(ModalRequest::new("A"));
//! let b = modals.enqueue(ModalRequest::new("B"));
//! assert_eq!(modals.current_id(), Some(a));
//!
//! modals.request_close();
//! assert!(!modals.is_visible());
//! assert_eq!(modals.current_id(), Some(a));
//!
//! // The host reports the exit animation finished.
//! modals.hide_completed();
//! assert_eq!(modals.current_id(), Some(b));
//! assert!(modals.is_visible());
//! ```

use std::collections::VecDeque;

use crate::host::{HostEvent, ModalHost, Presentation};
use crate::request::{Hook, HookKind, ModalId, ModalRequest};

/// Lifecycle of a request that is still in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModalPhase {
    /// Waiting behind earlier requests.
    Queued,
    /// Current and visible.
    Presenting,
    /// Current, told to hide, waiting for the host's hide-completion.
    Dismissing,
}

/// Observable sequencer state at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequencerSnapshot {
    pub queue_len: usize,
    pub current: Option<ModalId>,
    pub visible: bool,
    pub transitioning: bool,
}

/// The current/visible pair derived from the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Derived {
    pub(crate) current: Option<ModalId>,
    pub(crate) visible: bool,
}

/// Re-derive current/visible from the queue head.
///
/// Frozen while `transitioning`; otherwise the head (if any) is current and
/// visible. Running it twice gives the same result as running it once.
pub(crate) fn synchronize(head: Option<ModalId>, transitioning: bool, prior: Derived) -> Derived {
    if transitioning {
        return prior;
    }
    match head {
        Some(id) => Derived {
            current: Some(id),
            visible: true,
        },
        None => Derived::default(),
    }
}

#[derive(Debug)]
struct QueuedModal<C> {
    id: ModalId,
    request: ModalRequest<C>,
}

/// FIFO queue of modal requests presenting one at a time.
///
/// # Invariants
///
/// - `derived.current`, when set, is the id of `queue[0]`.
/// - `derived.visible` implies `!transitioning`.
/// - `next_id` is greater than every id ever issued.
#[derive(Debug)]
pub struct ModalSequencer<C> {
    queue: VecDeque<QueuedModal<C>>,
    derived: Derived,
    transitioning: bool,
    next_id: u64,
}

impl<C> Default for ModalSequencer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ModalSequencer<C> {
    /// Create an empty sequencer.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            derived: Derived::default(),
            transitioning: false,
            next_id: 1,
        }
    }

    // --- Queue Operations ---

    /// Append a request to the tail of the queue.
    ///
    /// If nothing is current and no dismissal is in flight, the request is
    /// presented immediately.
    pub fn enqueue(&mut self, request: ModalRequest<C>) -> ModalId {
        let id = ModalId(self.next_id);
        self.next_id += 1;
        self.queue.push_back(QueuedModal { id, request });
        tracing::debug!(
            modal_id = id.id(),
            queue_len = self.queue.len(),
            transitioning = self.transitioning,
            "modal enqueued"
        );
        self.sync();
        id
    }

    /// Start dismissing the current modal.
    ///
    /// Hides the modal and freezes synchronization until the host reports
    /// hide-completion. The request stays at the head of the queue. Calling
    /// this again before completion changes nothing.
    pub fn request_close(&mut self) {
        let Some(current) = self.derived.current else {
            tracing::debug!("close requested with no current modal; ignoring");
            return;
        };
        if self.transitioning {
            tracing::trace!(modal_id = current.id(), "close already in flight");
        } else {
            tracing::debug!(modal_id = current.id(), "modal dismissing");
        }
        self.transitioning = true;
        self.derived.visible = false;
        self.sync();
    }

    /// Hide-completion from the host: remove the head and advance.
    ///
    /// Fires the removed request's `on_hide` hook after the next request (if
    /// any) has been presented, then returns the removed request.
    pub fn hide_completed(&mut self) -> Option<ModalRequest<C>> {
        let mut request = self.complete_hide()?;
        request.hooks.fire(HookKind::Hide);
        Some(request)
    }

    /// Backdrop tap: run the caller's hook, then start closing.
    pub fn backdrop_pressed(&mut self) {
        self.gesture(HookKind::BackdropPress);
    }

    /// Back button: run the caller's hook, then start closing.
    pub fn back_button_pressed(&mut self) {
        self.gesture(HookKind::BackButtonPress);
    }

    /// Swipe-to-dismiss: run the caller's hook, then start closing.
    pub fn swipe_completed(&mut self) {
        self.gesture(HookKind::SwipeComplete);
    }

    /// Entrance animation finished: run the caller's `on_show` hook.
    pub fn shown(&mut self) {
        if let Some(head) = self.current_entry_mut() {
            tracing::debug!(modal_id = head.id.id(), "modal shown");
            head.request.hooks.fire(HookKind::Show);
        }
    }

    /// Route a host notification.
    ///
    /// Returns the removed request for [`HostEvent::ModalHide`].
    pub fn handle_host_event(&mut self, event: HostEvent) -> Option<ModalRequest<C>> {
        match event {
            HostEvent::BackdropPress => self.backdrop_pressed(),
            HostEvent::BackButtonPress => self.back_button_pressed(),
            HostEvent::SwipeComplete => self.swipe_completed(),
            HostEvent::ModalShow => self.shown(),
            HostEvent::ModalHide => return self.hide_completed(),
        }
        None
    }

    // --- Rendering ---

    /// What the host should draw right now.
    pub fn presentation(&self) -> Option<Presentation<'_, C>> {
        let current = self.derived.current?;
        let head = self.queue.front().filter(|head| head.id == current)?;
        Some(Presentation {
            id: head.id,
            config: head.request.presentation_config(),
            content: head.request.content(),
            visible: self.derived.visible,
        })
    }

    /// Hand the current presentation to the host.
    pub fn render<H: ModalHost<C> + ?Sized>(&self, host: &mut H) {
        host.present(self.presentation());
    }

    // --- State Queries ---

    /// The current request, including while it is dismissing.
    pub fn current(&self) -> Option<&ModalRequest<C>> {
        self.presentation_head().map(|head| &head.request)
    }

    #[inline]
    pub fn current_id(&self) -> Option<ModalId> {
        self.derived.current
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.derived.visible
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Number of requests in the queue, current one included.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Ids waiting behind the head, in display order.
    pub fn pending(&self) -> impl Iterator<Item = ModalId> + '_ {
        self.queue.iter().skip(1).map(|entry| entry.id)
    }

    pub fn contains(&self, id: ModalId) -> bool {
        self.queue.iter().any(|entry| entry.id == id)
    }

    /// Lifecycle phase of a queued request; `None` once it has completed.
    pub fn phase(&self, id: ModalId) -> Option<ModalPhase> {
        let position = self.queue.iter().position(|entry| entry.id == id)?;
        if position == 0 && self.derived.current == Some(id) {
            if self.transitioning {
                Some(ModalPhase::Dismissing)
            } else {
                Some(ModalPhase::Presenting)
            }
        } else {
            Some(ModalPhase::Queued)
        }
    }

    pub fn snapshot(&self) -> SequencerSnapshot {
        SequencerSnapshot {
            queue_len: self.queue.len(),
            current: self.derived.current,
            visible: self.derived.visible,
            transitioning: self.transitioning,
        }
    }

    // --- Internals shared with the provider ---

    /// Remove the head without running its `on_hide` hook.
    pub(crate) fn complete_hide(&mut self) -> Option<ModalRequest<C>> {
        let Some(head) = self.queue.pop_front() else {
            tracing::debug!("hide-completion with empty queue; ignoring");
            return None;
        };
        if !self.transitioning {
            tracing::warn!(
                modal_id = head.id.id(),
                "hide-completion without a pending close; host dismissed the modal itself"
            );
        }
        self.transitioning = false;
        self.sync();
        tracing::debug!(
            modal_id = head.id.id(),
            queue_len = self.queue.len(),
            next = self.derived.current.map(ModalId::id),
            "modal completed"
        );
        Some(head.request)
    }

    /// Take a hook out of the current request so it can run unborrowed.
    pub(crate) fn lend_hook(&mut self, kind: HookKind) -> Option<(ModalId, Hook)> {
        let head = self.current_entry_mut()?;
        let hook = head.request.hooks.take(kind)?;
        Some((head.id, hook))
    }

    /// Return a lent hook, if its request is still queued.
    pub(crate) fn return_hook(&mut self, id: ModalId, kind: HookKind, hook: Hook) {
        if let Some(entry) = self.queue.iter_mut().find(|entry| entry.id == id) {
            entry.request.hooks.restore(kind, hook);
        }
    }

    fn gesture(&mut self, kind: HookKind) {
        let Some(head) = self.current_entry_mut() else {
            tracing::debug!(?kind, "gesture with no current modal; ignoring");
            return;
        };
        let id = head.id;
        let fired = head.request.hooks.fire(kind);
        tracing::debug!(modal_id = id.id(), ?kind, hook = fired, "modal gesture");
        self.request_close();
    }

    fn presentation_head(&self) -> Option<&QueuedModal<C>> {
        let current = self.derived.current?;
        self.queue.front().filter(|head| head.id == current)
    }

    fn current_entry_mut(&mut self) -> Option<&mut QueuedModal<C>> {
        let current = self.derived.current?;
        self.queue.front_mut().filter(|head| head.id == current)
    }

    fn sync(&mut self) {
        let head = self.queue.front().map(|entry| entry.id);
        let next = synchronize(head, self.transitioning, self.derived);
        if next != self.derived {
            tracing::trace!(
                current = next.current.map(ModalId::id),
                visible = next.visible,
                "sequencer synchronized"
            );
        }
        self.derived = next;
        debug_assert!(
            self.derived.current.is_none() || self.derived.current == head,
            "current modal must be the queue head"
        );
        debug_assert!(
            !(self.derived.visible && self.transitioning),
            "a dismissing modal cannot be visible"
        );
    }
}
