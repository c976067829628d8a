#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors from the modal queue accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// [`use_modal_queue`](crate::use_modal_queue) was called with no
    /// provider for that content type entered on this thread.
    #[error("use_modal_queue must be called inside an entered ModalQueueProvider<{content}>")]
    OutsideProvider { content: &'static str },
}
