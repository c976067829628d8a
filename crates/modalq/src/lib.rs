#![forbid(unsafe_code)]

//! One-at-a-time modal presentation for UI hosts.
//!
//! Requests go into a FIFO queue. The head is shown; closing it hides it,
//! and it leaves the queue only once the rendering host reports the exit
//! animation finished. Then the next request is shown.
//!
//! - [`ModalSequencer`]: the state machine. Usable on its own by code that
//!   owns it directly.
//! - [`ModalQueueProvider`] / [`ModalQueueHandle`] / [`use_modal_queue`]:
//!   scoped ownership for a UI subtree and the `add_modal`/`close_modal`
//!   accessor handed to view code.
//! - [`ModalHost`] / [`HostEvent`] / [`Presentation`]: the contract with the
//!   rendering layer.
//! - [`ModalConfig`]: presentation options carried with each request.
//!
//! Everything here is single-threaded; the provider and hooks are `!Send`.
//!
//! # Example
//!
//! ```
//! use modalq::{HostEvent, ModalConfig, ModalQueueProvider, ModalRequest};
//!
//! let provider = ModalQueueProvider::new();
//! let modals = provider.handle();
//!
//! modals.add_modal(ModalRequest::new("Update available").config(ModalConfig::fade()));
//! modals.add_modal(ModalRequest::new("Rate this app"));
//!
//! // The user taps outside the first modal.
//! provider.dispatch(HostEvent::BackdropPress);
//! assert!(!provider.snapshot().visible);
//!
//! // The host finishes the fade-out.
//! let done = provider.dispatch(HostEvent::ModalHide).unwrap();
//! assert_eq!(*done.content(), "Update available");
//! assert!(provider.snapshot().visible);
//! ```

pub mod config;
mod error;
pub mod host;
mod request;
mod scope;
mod sequencer;

pub use config::{BackdropConfig, ModalAnimation, ModalConfig, ModalPosition, Rgba, SwipeDirection};
pub use error::ScopeError;
pub use host::{HostEvent, ModalHost, Presentation};
pub use request::{Hook, ModalHooks, ModalId, ModalRequest};
pub use scope::{ModalQueueHandle, ModalQueueProvider, ProviderScope, use_modal_queue};
pub use sequencer::{ModalPhase, ModalSequencer, SequencerSnapshot};
