//! Event listeners keyed by event name
//!
//! Listeners run synchronously, in registration order, inside the log call
//! that emits. A panicking listener is caught and counted; the remaining
//! listeners still run and the panic never reaches the caller.

use super::log_record::LogRecord;
use parking_lot::Mutex;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Callback invoked with the unrendered record.
pub type Listener = Arc<dyn Fn(&LogRecord) + Send + Sync>;

/// Handle returned on registration, used to remove a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Result of one emission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitOutcome {
    /// Listeners that ran to completion
    pub delivered: usize,
    /// Listeners that panicked
    pub failed: usize,
}

impl EmitOutcome {
    pub fn invoked(&self) -> usize {
        self.delivered + self.failed
    }
}

struct Registration {
    id: ListenerId,
    event: String,
    once: bool,
    callback: Listener,
}

pub struct EventListeners {
    registrations: Mutex<Vec<Registration>>,
    next_id: AtomicU64,
}

impl EventListeners {
    pub fn new() -> Self {
        Self {
            registrations: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a listener for every emission of `event`
    pub fn on<F>(&self, event: impl Into<String>, callback: F) -> ListenerId
    where
        F: Fn(&LogRecord) + Send + Sync + 'static,
    {
        self.register(event.into(), false, Arc::new(callback))
    }

    /// Register a listener removed after its first invocation
    pub fn once<F>(&self, event: impl Into<String>, callback: F) -> ListenerId
    where
        F: Fn(&LogRecord) + Send + Sync + 'static,
    {
        self.register(event.into(), true, Arc::new(callback))
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn off(&self, id: ListenerId) -> bool {
        let mut registrations = self.registrations.lock();
        let before = registrations.len();
        registrations.retain(|r| r.id != id);
        registrations.len() != before
    }

    /// Remove every listener for `event`
    pub fn remove_all(&self, event: &str) {
        self.registrations.lock().retain(|r| r.event != event);
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.registrations
            .lock()
            .iter()
            .filter(|r| r.event == event)
            .count()
    }

    /// Invoke every listener for `event` with `record`.
    ///
    /// The listener list is snapshotted first, so listeners may register or
    /// remove listeners without deadlocking.
    pub fn emit(&self, event: &str, record: &LogRecord) -> EmitOutcome {
        let snapshot: Vec<Listener> = {
            let mut registrations = self.registrations.lock();
            let matching = registrations
                .iter()
                .filter(|r| r.event == event)
                .map(|r| Arc::clone(&r.callback))
                .collect();
            registrations.retain(|r| !(r.once && r.event == event));
            matching
        };

        let mut outcome = EmitOutcome::default();
        for callback in snapshot {
            match catch_unwind(AssertUnwindSafe(|| callback(record))) {
                Ok(()) => outcome.delivered += 1,
                Err(_) => outcome.failed += 1,
            }
        }
        outcome
    }

    fn register(&self, event: String, once: bool, callback: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.registrations.lock().push(Registration {
            id,
            event,
            once,
            callback,
        });
        id
    }
}

impl Default for EventListeners {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registrations = self.registrations.lock();
        f.debug_struct("EventListeners")
            .field("registered", &registrations.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex as PlMutex;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&LogRecord) + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let clone = Arc::clone(&count);
        (count, move |_: &LogRecord| {
            clone.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_emit_only_matching_event() {
        let listeners = EventListeners::new();
        let (info_count, on_info) = counter();
        let (warn_count, on_warn) = counter();
        listeners.on("info", on_info);
        listeners.on("warn", on_warn);

        let outcome = listeners.emit("info", &LogRecord::default());

        assert_eq!(outcome, EmitOutcome { delivered: 1, failed: 0 });
        assert_eq!(info_count.load(Ordering::SeqCst), 1);
        assert_eq!(warn_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_registration_order() {
        let listeners = EventListeners::new();
        let order = Arc::new(PlMutex::new(Vec::new()));
        for n in 0..3 {
            let order = Arc::clone(&order);
            listeners.on("debug", move |_| order.lock().push(n));
        }

        listeners.emit("debug", &LogRecord::default());
        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_once_runs_once() {
        let listeners = EventListeners::new();
        let (count, on_debug) = counter();
        listeners.once("debug", on_debug);

        listeners.emit("debug", &LogRecord::default());
        listeners.emit("debug", &LogRecord::default());

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(listeners.listener_count("debug"), 0);
    }

    #[test]
    fn test_off() {
        let listeners = EventListeners::new();
        let (count, on_info) = counter();
        let id = listeners.on("info", on_info);

        assert!(listeners.off(id));
        assert!(!listeners.off(id));
        listeners.emit("info", &LogRecord::default());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_panicking_listener_is_isolated() {
        let listeners = EventListeners::new();
        let (count, after) = counter();
        listeners.on("error", |_| panic!("listener failure"));
        listeners.on("error", after);

        let outcome = listeners.emit("error", &LogRecord::default());

        assert_eq!(outcome, EmitOutcome { delivered: 1, failed: 1 });
        assert_eq!(outcome.invoked(), 2);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_emit_without_listeners() {
        let listeners = EventListeners::new();
        assert_eq!(listeners.emit("error", &LogRecord::default()).invoked(), 0);
    }

    #[test]
    fn test_listener_may_register_during_emit() {
        let listeners = Arc::new(EventListeners::new());
        let inner = Arc::clone(&listeners);
        listeners.once("info", move |_| {
            inner.on("info", |_| {});
        });

        listeners.emit("info", &LogRecord::default());
        assert_eq!(listeners.listener_count("info"), 1);
    }

    #[test]
    fn test_remove_all() {
        let listeners = EventListeners::new();
        listeners.on("info", |_| {});
        listeners.on("info", |_| {});
        listeners.on("warn", |_| {});

        listeners.remove_all("info");
        assert_eq!(listeners.listener_count("info"), 0);
        assert_eq!(listeners.listener_count("warn"), 1);
    }
}
