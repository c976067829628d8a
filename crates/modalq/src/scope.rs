#![forbid(unsafe_code)]

//! Provider scope and consumer accessor.
//!
//! A [`ModalQueueProvider`] owns one [`ModalSequencer`] for the lifetime of
//! the UI subtree that constructs it. View code below it reaches the queue
//! through a [`ModalQueueHandle`], which exposes only `add_modal` and
//! `close_modal`.
//!
//! Handles come from either:
//!
//! - [`ModalQueueProvider::handle`], when the caller can see the provider, or
//! - [`use_modal_queue`], which looks up the innermost provider entered on
//!   the current thread via [`ModalQueueProvider::enter`].
//!
//! # Architecture
//!
//! The sequencer lives in `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Entered providers are kept on a thread-local stack; the
//! [`ProviderScope`] guard pops its entry on drop, so nested scopes resolve
//! innermost first. Providers for different content types do not see each
//! other.
//!
//! # Invariants
//!
//! 1. Independent providers never share queue state.
//! 2. Caller hooks run with the sequencer unborrowed, so a hook may call
//!    back into a handle.
//! 3. A handle keeps its sequencer alive after the provider is dropped.
//!
//! # Failure Modes
//!
//! - `use_modal_queue` with no entered provider: `Err(ScopeError)`.
//! - A host that calls a handle from inside `present` panics on the
//!   re-entrant borrow. Hosts report back through `dispatch` instead.

use std::any::{Any, type_name};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::ScopeError;
use crate::host::{HostEvent, ModalHost};
use crate::request::{HookKind, ModalId, ModalRequest};
use crate::sequencer::{ModalSequencer, SequencerSnapshot};

type Shared<C> = Rc<RefCell<ModalSequencer<C>>>;

thread_local! {
    static ACTIVE_PROVIDERS: RefCell<Vec<Rc<dyn Any>>> = const { RefCell::new(Vec::new()) };
}

/// Owner of one modal queue, scoped to a UI subtree.
pub struct ModalQueueProvider<C: 'static> {
    shared: Shared<C>,
}

impl<C: 'static> Default for ModalQueueProvider<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> ModalQueueProvider<C> {
    /// Mount a provider with an empty queue.
    pub fn new() -> Self {
        Self {
            shared: Rc::new(RefCell::new(ModalSequencer::new())),
        }
    }

    /// Register this provider as the innermost one on this thread until the
    /// returned guard is dropped.
    pub fn enter(&self) -> ProviderScope {
        let entry: Rc<dyn Any> = Rc::clone(&self.shared) as Rc<dyn Any>;
        ACTIVE_PROVIDERS.with(|stack| stack.borrow_mut().push(Rc::clone(&entry)));
        tracing::trace!(content = type_name::<C>(), "modal provider entered");
        ProviderScope { entry }
    }

    /// Handle to this provider's queue.
    pub fn handle(&self) -> ModalQueueHandle<C> {
        ModalQueueHandle {
            shared: Rc::clone(&self.shared),
        }
    }

    /// Draw the current modal through `host`.
    ///
    /// The sequencer is borrowed for the duration of `present`.
    pub fn render<H: ModalHost<C> + ?Sized>(&self, host: &mut H) {
        self.shared.borrow().render(host);
    }

    /// Deliver a host notification.
    ///
    /// Same routing as [`ModalSequencer::handle_host_event`], except that
    /// caller hooks run after the sequencer borrow is released.
    pub fn dispatch(&self, event: HostEvent) -> Option<ModalRequest<C>> {
        let _span = tracing::debug_span!("modal_dispatch", event = event.as_str()).entered();
        match event {
            HostEvent::BackdropPress => self.gesture(HookKind::BackdropPress),
            HostEvent::BackButtonPress => self.gesture(HookKind::BackButtonPress),
            HostEvent::SwipeComplete => self.gesture(HookKind::SwipeComplete),
            HostEvent::ModalShow => {
                self.run_hook(HookKind::Show);
            }
            HostEvent::ModalHide => {
                let mut request = self.shared.borrow_mut().complete_hide()?;
                request.hooks.fire(HookKind::Hide);
                return Some(request);
            }
        }
        None
    }

    pub fn snapshot(&self) -> SequencerSnapshot {
        self.shared.borrow().snapshot()
    }

    /// Read access to the sequencer.
    pub fn with<R>(&self, f: impl FnOnce(&ModalSequencer<C>) -> R) -> R {
        f(&self.shared.borrow())
    }

    fn gesture(&self, kind: HookKind) {
        if self.shared.borrow().current_id().is_none() {
            tracing::debug!(?kind, "gesture with no current modal; ignoring");
            return;
        }
        let fired = self.run_hook(kind);
        tracing::debug!(?kind, hook = fired, "modal gesture");
        self.shared.borrow_mut().request_close();
    }

    fn run_hook(&self, kind: HookKind) -> bool {
        let lent = self.shared.borrow_mut().lend_hook(kind);
        let Some((id, mut hook)) = lent else {
            return false;
        };
        hook();
        self.shared.borrow_mut().return_hook(id, kind, hook);
        true
    }
}

impl<C: 'static> fmt::Debug for ModalQueueProvider<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalQueueProvider")
            .field("content", &type_name::<C>())
            .field("state", &self.shared.try_borrow().map(|s| s.snapshot()).ok())
            .finish()
    }
}

/// RAII guard returned by [`ModalQueueProvider::enter`].
#[must_use = "the provider is only in scope while this guard is alive"]
pub struct ProviderScope {
    entry: Rc<dyn Any>,
}

impl Drop for ProviderScope {
    fn drop(&mut self) {
        // The thread-local may already be gone during thread teardown.
        let _ = ACTIVE_PROVIDERS.try_with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().rposition(|e| Rc::ptr_eq(e, &self.entry)) {
                stack.remove(pos);
            }
        });
    }
}

impl fmt::Debug for ProviderScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderScope").finish_non_exhaustive()
    }
}

/// Consumer-facing capabilities of a modal queue.
pub struct ModalQueueHandle<C> {
    shared: Shared<C>,
}

impl<C> Clone for ModalQueueHandle<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<C> ModalQueueHandle<C> {
    /// Queue a modal; it is shown once everything before it has closed.
    pub fn add_modal(&self, request: ModalRequest<C>) -> ModalId {
        self.shared.borrow_mut().enqueue(request)
    }

    /// Start closing the current modal.
    pub fn close_modal(&self) {
        self.shared.borrow_mut().request_close();
    }
}

impl<C> fmt::Debug for ModalQueueHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalQueueHandle")
            .field("content", &type_name::<C>())
            .finish_non_exhaustive()
    }
}

/// Look up the innermost entered provider for content type `C`.
///
/// # Example
///
/// ```
/// use modalq::{ModalQueueProvider, ModalRequest, use_modal_queue};
///
/// assert!(use_modal_queue::<&str>().is_err());
///
/// let provider = ModalQueueProvider::<&str>::new();
/// let _scope = provider.enter();
/// let modals = use_modal_queue::<&str>().unwrap();
/// modals.add_modal(ModalRequest::new("hello"));
/// assert!(provider.snapshot().visible);
/// ```
pub fn use_modal_queue<C: 'static>() -> Result<ModalQueueHandle<C>, ScopeError> {
    let found = ACTIVE_PROVIDERS.with(|stack| {
        stack
            .borrow()
            .iter()
            .rev()
            .find_map(|entry| Rc::clone(entry).downcast::<RefCell<ModalSequencer<C>>>().ok())
    });
    match found {
        Some(shared) => Ok(ModalQueueHandle { shared }),
        None => {
            let content = type_name::<C>();
            tracing::debug!(content, "modal queue accessed outside a provider");
            Err(ScopeError::OutsideProvider { content })
        }
    }
}
