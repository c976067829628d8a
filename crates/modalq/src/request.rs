#![forbid(unsafe_code)]

//! Modal requests: content payload, presentation config and caller hooks.

use std::fmt;

use crate::config::ModalConfig;

/// Identifier assigned to a request when it is enqueued.
///
/// Ids are unique within one sequencer and strictly increasing in enqueue
/// order, so comparing two ids from the same sequencer compares their
/// queue positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ModalId(pub(crate) u64);

impl ModalId {
    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "modal#{}", self.0)
    }
}

/// Caller callback attached to a request.
pub type Hook = Box<dyn FnMut()>;

/// Which caller hook a host notification maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HookKind {
    BackdropPress,
    BackButtonPress,
    SwipeComplete,
    Show,
    Hide,
}

/// Optional callbacks fired around host notifications.
///
/// Gesture hooks (`backdrop_press`, `back_button_press`, `swipe_complete`)
/// run before the sequencer starts closing, so they still see the modal as
/// current. `show` runs when the host reports the entrance animation done.
/// `hide` runs after the modal has left the queue.
#[derive(Default)]
pub struct ModalHooks {
    pub(crate) backdrop_press: Option<Hook>,
    pub(crate) back_button_press: Option<Hook>,
    pub(crate) swipe_complete: Option<Hook>,
    pub(crate) show: Option<Hook>,
    pub(crate) hide: Option<Hook>,
}

impl ModalHooks {
    fn slot(&mut self, kind: HookKind) -> &mut Option<Hook> {
        match kind {
            HookKind::BackdropPress => &mut self.backdrop_press,
            HookKind::BackButtonPress => &mut self.back_button_press,
            HookKind::SwipeComplete => &mut self.swipe_complete,
            HookKind::Show => &mut self.show,
            HookKind::Hide => &mut self.hide,
        }
    }

    pub(crate) fn take(&mut self, kind: HookKind) -> Option<Hook> {
        self.slot(kind).take()
    }

    /// Put a lent hook back unless the slot was refilled meanwhile.
    pub(crate) fn restore(&mut self, kind: HookKind, hook: Hook) {
        let slot = self.slot(kind);
        if slot.is_none() {
            *slot = Some(hook);
        }
    }

    pub(crate) fn fire(&mut self, kind: HookKind) -> bool {
        match self.slot(kind).as_mut() {
            Some(hook) => {
                hook();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for ModalHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalHooks")
            .field("backdrop_press", &self.backdrop_press.is_some())
            .field("back_button_press", &self.back_button_press.is_some())
            .field("swipe_complete", &self.swipe_complete.is_some())
            .field("show", &self.show.is_some())
            .field("hide", &self.hide.is_some())
            .finish()
    }
}

/// A request to show one modal.
///
/// # Example
///
/// ```
/// use modalq::{ModalConfig, ModalRequest};
///
/// let request = ModalRequest::new("Saved!")
///     .config(ModalConfig::fade())
///     .on_backdrop_press(|| println!("backdrop"));
/// assert_eq!(*request.content(), "Saved!");
/// ```
#[derive(Debug)]
pub struct ModalRequest<C> {
    content: C,
    config: ModalConfig,
    pub(crate) hooks: ModalHooks,
}

impl<C> ModalRequest<C> {
    /// Create a request with default presentation options and no hooks.
    pub fn new(content: C) -> Self {
        Self {
            content,
            config: ModalConfig::default(),
            hooks: ModalHooks::default(),
        }
    }

    /// Set presentation options.
    pub fn config(mut self, config: ModalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn on_backdrop_press(mut self, hook: impl FnMut() + 'static) -> Self {
        self.hooks.backdrop_press = Some(Box::new(hook));
        self
    }

    pub fn on_back_button_press(mut self, hook: impl FnMut() + 'static) -> Self {
        self.hooks.back_button_press = Some(Box::new(hook));
        self
    }

    pub fn on_swipe_complete(mut self, hook: impl FnMut() + 'static) -> Self {
        self.hooks.swipe_complete = Some(Box::new(hook));
        self
    }

    pub fn on_show(mut self, hook: impl FnMut() + 'static) -> Self {
        self.hooks.show = Some(Box::new(hook));
        self
    }

    pub fn on_hide(mut self, hook: impl FnMut() + 'static) -> Self {
        self.hooks.hide = Some(Box::new(hook));
        self
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn presentation_config(&self) -> &ModalConfig {
        &self.config
    }

    pub fn hooks(&self) -> &ModalHooks {
        &self.hooks
    }

    /// Consume the request, returning its content.
    pub fn into_content(self) -> C {
        self.content
    }
}
