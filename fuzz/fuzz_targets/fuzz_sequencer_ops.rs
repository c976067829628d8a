#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use modalq::{HostEvent, ModalConfig, ModalId, ModalRequest, ModalSequencer};

#[derive(Debug, Arbitrary)]
enum Op {
    Enqueue { out_ms: u16 },
    Close,
    Host(Event),
}

#[derive(Debug, Arbitrary)]
enum Event {
    BackdropPress,
    BackButtonPress,
    SwipeComplete,
    ModalShow,
    ModalHide,
}

impl From<Event> for HostEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::BackdropPress => Self::BackdropPress,
            Event::BackButtonPress => Self::BackButtonPress,
            Event::SwipeComplete => Self::SwipeComplete,
            Event::ModalShow => Self::ModalShow,
            Event::ModalHide => Self::ModalHide,
        }
    }
}

fuzz_target!(|ops: Vec<Op>| {
    let mut modals = ModalSequencer::new();
    let mut expected: Vec<ModalId> = Vec::new();

    for op in ops.into_iter().take(512) {
        match op {
            Op::Enqueue { out_ms } => {
                let config = ModalConfig::new().animation_out_ms(u32::from(out_ms));
                expected.push(modals.enqueue(ModalRequest::new(out_ms).config(config)));
            }
            Op::Close => modals.request_close(),
            Op::Host(event) => {
                let head = modals.current_id();
                if modals.handle_host_event(event.into()).is_some() {
                    assert_eq!(Some(expected.remove(0)), head);
                }
            }
        }

        assert_eq!(modals.len(), expected.len());
        assert_eq!(modals.current_id(), expected.first().copied());
        assert!(!(modals.is_visible() && modals.is_transitioning()));
        assert!(!modals.is_visible() || modals.current_id().is_some());
        assert!(modals.pending().eq(expected.iter().skip(1).copied()));
    }
});
