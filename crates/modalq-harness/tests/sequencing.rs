#![forbid(unsafe_code)]

//! Integration tests: modal sequencing through the simulated host.
//!
//! Set `RUST_LOG=modalq=trace` to see the sequencer's lifecycle events.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use modalq::{
    HostEvent, ModalConfig, ModalPhase, ModalQueueProvider, ModalRequest, use_modal_queue,
};
use modalq_harness::{AnimationState, SimulatedHost, run_ticks, run_until_idle};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn quick(label: &'static str) -> ModalRequest<&'static str> {
    ModalRequest::new(label).config(ModalConfig::new().animation_in_ms(2).animation_out_ms(3))
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn two_modals_close_in_sequence() {
    init_tracing();
    let provider = ModalQueueProvider::new();
    let modals = provider.handle();
    let mut host = SimulatedHost::new();

    let a = modals.add_modal(quick("A"));
    let b = modals.add_modal(quick("B"));
    run_ticks(&provider, &mut host, 2);
    assert_eq!(host.state(), AnimationState::Shown { id: a });

    modals.close_modal();
    provider.render(&mut host);
    let snap = provider.snapshot();
    assert!(!snap.visible);
    assert!(snap.transitioning);
    assert_eq!(snap.queue_len, 2);
    assert!(matches!(host.state(), AnimationState::Exiting { id, .. } if id == a));

    // B must not appear while A is still hiding.
    let events = run_ticks(&provider, &mut host, 2);
    assert!(events.is_empty());
    assert_eq!(provider.snapshot().current, Some(a));

    let events = run_ticks(&provider, &mut host, 1);
    assert_eq!(events, vec![HostEvent::ModalHide]);
    let snap = provider.snapshot();
    assert_eq!(snap.queue_len, 1);
    assert!(!snap.transitioning);
    assert_eq!(snap.current, Some(b));
    assert!(snap.visible);

    modals.close_modal();
    run_until_idle(&provider, &mut host, 50);
    let snap = provider.snapshot();
    assert_eq!(snap.queue_len, 0);
    assert_eq!(snap.current, None);
    assert!(!snap.visible);

    let transcript = host.into_transcript();
    assert_eq!(transcript.check(), Ok(()));
    assert_eq!(transcript.presented_labels(), vec!["A", "B"]);
}

#[test]
fn backdrop_hook_fires_once_before_close() {
    let provider = ModalQueueProvider::new();
    let mut host = SimulatedHost::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let l = Rc::clone(&log);
    let a = provider
        .handle()
        .add_modal(quick("A").on_backdrop_press(move || l.borrow_mut().push("backdrop")));
    let l = Rc::clone(&log);
    provider
        .handle()
        .add_modal(quick("B").on_backdrop_press(move || l.borrow_mut().push("wrong modal")));
    run_ticks(&provider, &mut host, 2);

    host.press_backdrop();
    run_ticks(&provider, &mut host, 1);
    assert_eq!(*log.borrow(), vec!["backdrop"]);
    provider.with(|s| assert_eq!(s.phase(a), Some(ModalPhase::Dismissing)));

    // The host is exiting, so nothing else closes A a second time.
    run_until_idle(&provider, &mut host, 10);
    assert_eq!(*log.borrow(), vec!["backdrop"]);
}

#[test]
fn back_button_and_swipe_dismiss() {
    let provider = ModalQueueProvider::new();
    let mut host = SimulatedHost::new();
    let swiped = Rc::new(Cell::new(false));
    let s = Rc::clone(&swiped);

    let modals = provider.handle();
    modals.add_modal(quick("dialog"));
    modals.add_modal(
        ModalRequest::new("sheet")
            .config(ModalConfig::bottom_sheet().animation_in_ms(1).animation_out_ms(1))
            .on_swipe_complete(move || s.set(true)),
    );
    run_ticks(&provider, &mut host, 2);

    host.press_back_button();
    run_ticks(&provider, &mut host, 4);
    assert_eq!(
        provider.with(|s| s.current().map(|r| *r.content())),
        Some("sheet")
    );

    host.complete_swipe();
    run_until_idle(&provider, &mut host, 10);
    assert!(swiped.get());
    assert_eq!(provider.snapshot().queue_len, 0);
    assert_eq!(
        host.transcript().presented_labels(),
        vec!["dialog", "sheet"]
    );
}

#[test]
fn enqueue_during_exit_waits_its_turn() {
    let provider = ModalQueueProvider::new();
    let modals = provider.handle();
    let mut host = SimulatedHost::new();

    modals.add_modal(quick("A"));
    modals.add_modal(quick("B"));
    run_ticks(&provider, &mut host, 2);
    modals.close_modal();
    run_ticks(&provider, &mut host, 1);

    let c = modals.add_modal(quick("C"));
    provider.with(|s| assert_eq!(s.phase(c), Some(ModalPhase::Queued)));

    for _ in 0..3 {
        run_until_idle(&provider, &mut host, 3);
        modals.close_modal();
    }
    run_until_idle(&provider, &mut host, 50);

    let transcript = host.into_transcript();
    assert_eq!(transcript.check(), Ok(()));
    assert_eq!(transcript.presented_labels(), vec!["A", "B", "C"]);
}

#[test]
fn show_and_hide_hooks_follow_animations() {
    let provider = ModalQueueProvider::new();
    let mut host = SimulatedHost::new();
    let events = Rc::new(RefCell::new(Vec::new()));

    let (shown, hidden) = (Rc::clone(&events), Rc::clone(&events));
    provider.handle().add_modal(
        quick("A")
            .on_show(move || shown.borrow_mut().push("shown"))
            .on_hide(move || hidden.borrow_mut().push("hidden")),
    );

    run_ticks(&provider, &mut host, 1);
    assert!(events.borrow().is_empty());
    run_ticks(&provider, &mut host, 1);
    assert_eq!(*events.borrow(), vec!["shown"]);

    provider.handle().close_modal();
    run_until_idle(&provider, &mut host, 10);
    assert_eq!(*events.borrow(), vec!["shown", "hidden"]);
}

#[test]
fn nested_provider_scopes_keep_separate_queues() {
    let app = ModalQueueProvider::<&'static str>::new();
    let settings = ModalQueueProvider::<&'static str>::new();
    let mut app_host = SimulatedHost::new();
    let mut settings_host = SimulatedHost::new();

    let _app_scope = app.enter();
    use_modal_queue::<&'static str>()
        .expect("app provider entered")
        .add_modal(quick("welcome"));
    {
        let _settings_scope = settings.enter();
        use_modal_queue::<&'static str>()
            .expect("settings provider entered")
            .add_modal(quick("confirm reset"));
    }

    run_ticks(&app, &mut app_host, 2);
    run_ticks(&settings, &mut settings_host, 2);
    assert_eq!(app_host.transcript().presented_labels(), vec!["welcome"]);
    assert_eq!(
        settings_host.transcript().presented_labels(),
        vec!["confirm reset"]
    );
}

#[test]
fn stalled_host_blocks_the_queue() {
    let provider = ModalQueueProvider::new();
    let modals = provider.handle();
    let a = modals.add_modal(quick("A"));
    modals.add_modal(quick("B"));

    modals.close_modal();
    // No host ever reports hide-completion.
    for _ in 0..100 {
        modals.close_modal();
    }
    let snap = provider.snapshot();
    assert_eq!(snap.current, Some(a));
    assert!(!snap.visible);
    assert_eq!(snap.queue_len, 2);
}

#[test]
fn transcript_exports_json_lines() {
    let provider = ModalQueueProvider::new();
    let mut host = SimulatedHost::new();
    provider.handle().add_modal(quick("A"));
    run_ticks(&provider, &mut host, 2);
    provider.handle().close_modal();
    run_until_idle(&provider, &mut host, 10);

    let jsonl = host.transcript().to_jsonl().expect("frames serialize");
    let lines: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid json"))
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["label"], "A");
    assert_eq!(lines[0]["visible"], true);
    assert_eq!(lines[1]["visible"], false);
    assert_eq!(lines[2]["modal"], serde_json::Value::Null);
}
