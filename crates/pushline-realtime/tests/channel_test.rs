//! Integration tests for channel dispatch and transport bookkeeping.

mod helpers;

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use serde_json::json;

use pushline_core::events::{ChannelEvent, NotificationKind};
use pushline_core::traits::Transport;
use pushline_realtime::{
    Channel, ClientMetrics, EventCallback, MockTransport, NotificationHub, TransportCall,
};

use helpers::{CallLog, TestRegistry};

#[test]
fn test_bound_callback_receives_payload_once() {
    let ctx = TestRegistry::new();
    let channel = ctx.subscribed("room-1");
    let log = CallLog::new();
    channel.bind("message", log.callback("f"));

    ctx.deliver("room-1", "message", json!({"text": "hello"}));

    assert_eq!(
        log.entries(),
        vec![("f".to_string(), json!({"text": "hello"}))]
    );
}

#[test]
fn test_other_channel_events_ignored() {
    let ctx = TestRegistry::new();
    let channel = ctx.subscribed("room-1");
    let log = CallLog::new();
    channel.bind("message", log.callback("f"));

    ctx.deliver("room-2", "message", json!(1));

    let direct = ChannelEvent::new("room-2", "message", json!(2));
    assert_eq!(channel.handle_event(&direct), 0);
    assert_eq!(log.len(), 0);
}

#[test]
fn test_unsubscribed_channel_never_dispatches() {
    let ctx = TestRegistry::new();
    let channel = ctx.registry.add("room-1");
    let log = CallLog::new();
    channel.bind("message", log.callback("f"));

    ctx.deliver("room-1", "message", json!(1));
    let direct = ChannelEvent::new("room-1", "message", json!(1));
    assert_eq!(channel.handle_event(&direct), 0);
    assert_eq!(log.len(), 0);
}

#[test]
fn test_duplicate_binding_invoked_twice_in_order() {
    let ctx = TestRegistry::new();
    let channel = ctx.subscribed("room-1");
    let log = CallLog::new();
    let f = log.callback("f");
    let g = log.callback("g");
    channel.bind("message", f.clone());
    channel.bind("message", g);
    channel.bind("message", f);

    ctx.deliver("room-1", "message", json!(null));

    assert_eq!(log.tags(), vec!["f", "g", "f"]);
    assert_eq!(ctx.transport.bind_count("room-1", "message"), 1);
}

#[test]
fn test_unknown_event_name_is_noop() {
    let ctx = TestRegistry::new();
    let channel = ctx.subscribed("room-1");
    let log = CallLog::new();
    channel.bind("message", log.callback("f"));

    let event = ChannelEvent::new("room-1", "typing", json!(true));
    assert_eq!(channel.handle_event(&event), 0);
    assert_eq!(log.len(), 0);
}

#[test]
fn test_unbind_only_callback_removes_entry() {
    let ctx = TestRegistry::new();
    let channel = ctx.subscribed("room-1");
    let log = CallLog::new();
    let f = log.callback("f");
    channel.bind("x", f.clone());

    assert!(channel.unbind("x", &f));
    assert!(channel.bound_events().is_empty());

    ctx.deliver("room-1", "x", json!(1));
    assert_eq!(log.len(), 0);
    assert_eq!(ctx.transport.unbind_count("room-1", "x"), 1);
}

#[test]
fn test_unbind_tells_transport_even_with_remaining_callbacks() {
    let ctx = TestRegistry::new();
    let channel = ctx.subscribed("room-1");
    let log = CallLog::new();
    let f = log.callback("f");
    let g = log.callback("g");
    channel.bind("x", f.clone());
    channel.bind("x", g);

    assert!(channel.unbind("x", &f));
    assert_eq!(channel.callback_count("x"), 1);
    assert_eq!(ctx.transport.unbind_count("room-1", "x"), 1);

    ctx.deliver("room-1", "x", json!(1));
    assert_eq!(log.tags(), vec!["g"]);
}

#[test]
fn test_unbind_unknown_event_is_noop() {
    let ctx = TestRegistry::new();
    let channel = ctx.subscribed("room-1");
    ctx.transport.clear();

    assert!(!channel.unbind("x", &EventCallback::new(|_| {})));
    assert!(ctx.transport.calls().is_empty());
}

#[test]
fn test_rebinding_after_entry_removed_binds_again() {
    let ctx = TestRegistry::new();
    let channel = ctx.subscribed("room-1");
    let f = EventCallback::new(|_| {});
    channel.bind("x", f.clone());
    channel.unbind("x", &f);
    channel.bind("x", f);

    assert_eq!(ctx.transport.bind_count("room-1", "x"), 2);
}

#[test]
fn test_subscribe_twice_sends_one_request() {
    let ctx = TestRegistry::new();
    let channel = ctx.registry.add("room-1");

    assert!(channel.subscribe());
    assert!(!channel.subscribe());
    assert!(channel.is_subscribed());
    assert_eq!(ctx.transport.subscribe_count("room-1"), 1);
}

#[test]
fn test_unsubscribe_never_subscribed_is_noop() {
    let ctx = TestRegistry::new();
    let channel = ctx.registry.add("room-1");

    assert!(!channel.unsubscribe());
    assert!(ctx.transport.calls().is_empty());
    assert!(channel.has_listener());
    assert_eq!(ctx.hub.listener_count(NotificationKind::ChannelEvent), 1);
}

#[test]
fn test_unsubscribe_releases_listener_once() {
    let ctx = TestRegistry::new();
    let channel = ctx.subscribed("room-1");

    assert!(channel.unsubscribe());
    assert!(!channel.unsubscribe());
    assert!(!channel.has_listener());
    assert_eq!(ctx.hub.listener_count(NotificationKind::ChannelEvent), 0);
    assert_eq!(
        ctx.transport.calls(),
        vec![
            TransportCall::Subscribe("room-1".to_string()),
            TransportCall::Unsubscribe("room-1".to_string()),
        ]
    );
}

#[test]
fn test_resubscribe_restores_delivery() {
    let ctx = TestRegistry::new();
    let channel = ctx.subscribed("room-1");
    let log = CallLog::new();
    channel.bind("message", log.callback("f"));

    channel.unsubscribe();
    ctx.deliver("room-1", "message", json!(1));
    assert_eq!(log.len(), 0);

    channel.subscribe();
    ctx.deliver("room-1", "message", json!(2));
    assert_eq!(log.entries(), vec![("f".to_string(), json!(2))]);
    assert_eq!(ctx.hub.listener_count(NotificationKind::ChannelEvent), 1);
}

#[test]
fn test_each_channel_filters_by_name() {
    let ctx = TestRegistry::new();
    let first = ctx.subscribed("room-1");
    let second = ctx.subscribed("room-2");
    let log = CallLog::new();
    first.bind("message", log.callback("one"));
    second.bind("message", log.callback("two"));

    ctx.deliver("room-2", "message", json!(null));
    ctx.deliver("room-1", "message", json!(null));

    assert_eq!(log.tags(), vec!["two", "one"]);
}

#[test]
fn test_callback_may_unbind_itself_during_dispatch() {
    let ctx = TestRegistry::new();
    let channel = ctx.subscribed("room-1");
    let log = CallLog::new();

    let slot: Arc<std::sync::Mutex<Option<EventCallback>>> = Arc::default();
    let weak_channel = Arc::downgrade(&channel);
    let inner_slot = slot.clone();
    let once = EventCallback::new(move |_| {
        let callback = inner_slot.lock().unwrap().clone();
        if let (Some(channel), Some(callback)) = (weak_channel.upgrade(), callback) {
            channel.unbind("message", &callback);
        }
    });
    *slot.lock().unwrap() = Some(once.clone());

    channel.bind("message", once);
    channel.bind("message", log.callback("after"));

    ctx.deliver("room-1", "message", json!(1));
    ctx.deliver("room-1", "message", json!(2));

    assert_eq!(log.tags(), vec!["after", "after"]);
    assert_eq!(channel.callback_count("message"), 1);
}

#[test]
fn test_channel_kind_from_name() {
    let ctx = TestRegistry::new();
    assert_eq!(
        ctx.registry.add("presence-lobby").kind(),
        pushline_realtime::ChannelKind::Presence
    );
}

#[test]
fn test_on_returns_handle_for_unbind() {
    let ctx = TestRegistry::new();
    let channel = ctx.subscribed("room-1");
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = seen.clone();

    let handle = channel.on("message", move |data| sink.lock().unwrap().push(data.clone()));
    ctx.deliver("room-1", "message", json!("first"));
    assert!(channel.unbind("message", &handle));
    ctx.deliver("room-1", "message", json!("second"));

    assert_eq!(*seen.lock().unwrap(), vec![json!("first")]);
    assert_eq!(ctx.transport.bind_count("room-1", "message"), 1);
}

/// Records like [`MockTransport`] but stalls every call.
#[derive(Debug, Default)]
struct SlowTransport {
    inner: MockTransport,
}

impl SlowTransport {
    fn pause() {
        thread::sleep(Duration::from_millis(20));
    }
}

impl Transport for SlowTransport {
    fn connect(&self, credential: &str) {
        Self::pause();
        self.inner.connect(credential);
    }

    fn subscribe(&self, channel: &str) {
        Self::pause();
        self.inner.subscribe(channel);
    }

    fn unsubscribe(&self, channel: &str) {
        Self::pause();
        self.inner.unsubscribe(channel);
    }

    fn bind(&self, channel: &str, event: &str) {
        Self::pause();
        self.inner.bind(channel, event);
    }

    fn unbind(&self, channel: &str, event: &str) {
        Self::pause();
        self.inner.unbind(channel, event);
    }
}

const THREADS: usize = 8;

fn slow_channel(name: &str) -> (Arc<Channel>, Arc<SlowTransport>) {
    let transport = Arc::new(SlowTransport::default());
    let channel = Channel::new(
        name,
        transport.clone(),
        Arc::new(NotificationHub::new()),
        Arc::new(ClientMetrics::new()),
    );
    (channel, transport)
}

/// Runs `op` on `THREADS` threads released together; returns how many
/// reported `true`.
fn race<F>(op: F) -> usize
where
    F: Fn() -> bool + Sync,
{
    let barrier = Barrier::new(THREADS);
    let (barrier, op) = (&barrier, &op);
    thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(move || {
                    barrier.wait();
                    op()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|won| *won)
            .count()
    })
}

#[test]
fn test_concurrent_subscribe_sends_one_request() {
    let (channel, transport) = slow_channel("room-1");

    let winners = race(|| channel.subscribe());

    assert_eq!(winners, 1);
    assert!(channel.is_subscribed());
    assert!(channel.has_listener());
    assert_eq!(transport.inner.subscribe_count("room-1"), 1);
}

#[test]
fn test_concurrent_unsubscribe_sends_one_request() {
    let (channel, transport) = slow_channel("room-1");
    channel.subscribe();

    let winners = race(|| channel.unsubscribe());

    assert_eq!(winners, 1);
    assert!(!channel.is_subscribed());
    assert!(!channel.has_listener());
    assert_eq!(transport.inner.unsubscribe_count("room-1"), 1);
}

#[test]
fn test_concurrent_first_bind_sends_one_request() {
    let (channel, transport) = slow_channel("room-1");
    let callback = EventCallback::new(|_| {});

    race(|| {
        channel.bind("x", callback.clone());
        true
    });

    assert_eq!(transport.inner.bind_count("room-1", "x"), 1);
    assert_eq!(channel.callback_count("x"), THREADS);
}
