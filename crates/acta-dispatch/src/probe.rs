//! Reducer probes
//!
//! Provides [`ReducerProbe`], which wraps one state slice's reduction so
//! every invocation emits exactly one diagnostic probe, classified
//! dynamically: `INSPECT` when the state actually changed, `DEBUG` when a
//! handler matched and supplied a note, `TRACE` otherwise.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use acta_log::{Log, Severity};
use acta_namespace::Action;
use acta_path::ActionKey;

/// Lazily rendered handler note
///
/// Runs at most once, and only when gating permits emission.
pub type NoteProducer = Box<dyn FnOnce() -> String>;

/// Registered handler for one action type
pub type Handler<S> = Box<dyn Fn(&Arc<S>, &Action) -> HandlerOutcome<S> + Send + Sync>;

/// What a matched handler returns
///
/// A handled case may legitimately return the previous state untouched;
/// "handled" is decided by registration membership, never by this shape.
pub struct HandlerOutcome<S> {
    /// Next state for the slice
    pub next: Arc<S>,
    /// Optional lazy diagnostic note
    pub note: Option<NoteProducer>,
}

impl<S> HandlerOutcome<S> {
    /// Outcome without a note
    #[must_use]
    pub fn next(next: Arc<S>) -> Self {
        Self { next, note: None }
    }

    /// Outcome with a lazy note
    #[must_use]
    pub fn with_note(next: Arc<S>, note: impl FnOnce() -> String + 'static) -> Self {
        Self {
            next,
            note: Some(Box::new(note)),
        }
    }
}

/// Probe-wrapped reduction for one state slice
///
/// State identity follows the pointer: a pass-through or a handler that
/// returns the previous `Arc` counts as "unchanged". Registration in the
/// handler map is what distinguishes "no handler matched" from "handler
/// matched, no note".
pub struct ReducerProbe<S> {
    log: Log,
    handlers: HashMap<String, Handler<S>>,
}

impl<S> ReducerProbe<S> {
    /// Probe bound to the slice's Log (the Log's filter name is the slice
    /// name)
    #[must_use]
    pub fn new(log: Log) -> Self {
        Self {
            log,
            handlers: HashMap::new(),
        }
    }

    /// Slice name this probe reports under
    #[inline]
    #[must_use]
    pub fn slice(&self) -> &str {
        self.log.name()
    }

    /// Register a handler for one action type
    #[must_use]
    pub fn handle(
        mut self,
        kind: impl ActionKey,
        handler: impl Fn(&Arc<S>, &Action) -> HandlerOutcome<S> + Send + Sync + 'static,
    ) -> Self {
        self.handlers
            .insert(kind.canonical_key().into_owned(), Box::new(handler));
        self
    }

    /// Whether an action type has a registered handler
    #[must_use]
    pub fn handles(&self, kind: impl ActionKey) -> bool {
        self.handlers.contains_key(kind.canonical_key().as_ref())
    }

    /// Run one reduction and emit exactly one probe
    ///
    /// Returns the next state unconditionally; diagnostic emission never
    /// alters the returned value, and any failure inside formatting or the
    /// sink is caught and discarded at this boundary.
    pub fn reduce(&self, prev: &Arc<S>, action: &Action) -> Arc<S> {
        let (next, note, handled) = match self.handlers.get(action.kind()) {
            Some(handler) => {
                let HandlerOutcome { next, note } = handler(prev, action);
                (next, note, true)
            }
            None => (Arc::clone(prev), None, false),
        };

        let changed = !Arc::ptr_eq(prev, &next);
        let severity = if changed {
            Severity::Inspect
        } else if note.is_some() {
            Severity::Debug
        } else {
            Severity::Trace
        };

        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.log.emit(severity, || {
                let state = if changed { "state changed" } else { "state unchanged" };
                let mut line =
                    format!("{state}; slice {}; action {}", self.log.name(), action.kind());
                if !handled {
                    line.push_str(" (unhandled)");
                }
                if let Some(produce) = note {
                    line.push_str("; ");
                    line.push_str(&produce());
                }
                line
            });
        }));

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acta_log::{FilterDirective, LogRegistry};
    use acta_namespace::ActionValue;
    use acta_path::ActionPath;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn action(kind: &str) -> Action {
        let path: ActionPath = kind.parse().unwrap();
        let mut fields = indexmap::IndexMap::new();
        fields.insert("msg".to_string(), ActionValue::text("x"));
        Action::new(&path, fields)
    }

    #[derive(Debug, PartialEq)]
    struct Counter {
        value: u64,
    }

    fn capturing_registry() -> (LogRegistry, Arc<Mutex<Vec<String>>>) {
        let registry = LogRegistry::new();
        registry.configure([("counter", FilterDirective::Level(Severity::Trace))]);
        let lines = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&lines);
        registry.set_sink(move |line| captured.lock().push(line.to_string()));
        (registry, lines)
    }

    fn probe(registry: &LogRegistry) -> ReducerProbe<Counter> {
        ReducerProbe::new(registry.log("counter").unwrap())
            .handle("counter.increment", |prev: &Arc<Counter>, _| {
                HandlerOutcome::next(Arc::new(Counter {
                    value: prev.value + 1,
                }))
            })
            .handle("counter.noop", |prev: &Arc<Counter>, _| {
                HandlerOutcome::with_note(Arc::clone(prev), || "already at target".to_string())
            })
            .handle("counter.silent_noop", |prev: &Arc<Counter>, _| {
                HandlerOutcome::next(Arc::clone(prev))
            })
    }

    #[test]
    fn changed_state_probes_at_inspect() {
        let (registry, lines) = capturing_registry();
        let probe = probe(&registry);
        let prev = Arc::new(Counter { value: 0 });

        let next = probe.reduce(&prev, &action("counter.increment"));

        assert_eq!(next.value, 1);
        let lines = lines.lock();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[INSPECT]"), "{}", lines[0]);
        assert!(lines[0].contains("state changed"), "{}", lines[0]);
        assert!(lines[0].contains("counter.increment"), "{}", lines[0]);
    }

    #[test]
    fn unchanged_with_note_probes_at_debug() {
        let (registry, lines) = capturing_registry();
        let probe = probe(&registry);
        let prev = Arc::new(Counter { value: 3 });

        let next = probe.reduce(&prev, &action("counter.noop"));

        assert!(Arc::ptr_eq(&prev, &next));
        let lines = lines.lock();
        assert!(lines[0].starts_with("[DEBUG]"), "{}", lines[0]);
        assert!(lines[0].contains("state unchanged"), "{}", lines[0]);
        assert!(lines[0].contains("already at target"), "{}", lines[0]);
    }

    #[test]
    fn unhandled_action_probes_at_trace_and_passes_through() {
        let (registry, lines) = capturing_registry();
        let probe = probe(&registry);
        let prev = Arc::new(Counter { value: 3 });

        let next = probe.reduce(&prev, &action("calendar.select"));

        assert!(Arc::ptr_eq(&prev, &next));
        let lines = lines.lock();
        assert!(lines[0].starts_with("[TRACE]"), "{}", lines[0]);
        assert!(lines[0].contains("(unhandled)"), "{}", lines[0]);
        assert!(lines[0].contains("calendar.select"), "{}", lines[0]);
    }

    #[test]
    fn handled_silent_noop_probes_at_trace_without_unhandled_marker() {
        let (registry, lines) = capturing_registry();
        let probe = probe(&registry);
        let prev = Arc::new(Counter { value: 3 });

        probe.reduce(&prev, &action("counter.silent_noop"));

        let lines = lines.lock();
        assert!(lines[0].starts_with("[TRACE]"), "{}", lines[0]);
        assert!(!lines[0].contains("(unhandled)"), "{}", lines[0]);
    }

    #[test]
    fn exactly_one_probe_per_reduction() {
        let (registry, lines) = capturing_registry();
        let probe = probe(&registry);
        let prev = Arc::new(Counter { value: 0 });

        let a = probe.reduce(&prev, &action("counter.increment"));
        let b = probe.reduce(&a, &action("counter.noop"));
        probe.reduce(&b, &action("unknown.op"));

        assert_eq!(lines.lock().len(), 3);
    }

    #[test]
    fn suppressed_probe_never_runs_the_note() {
        let registry = LogRegistry::new(); // baseline INFO, DEBUG suppressed
        let note_runs = Arc::new(AtomicUsize::new(0));
        let runs = Arc::clone(&note_runs);
        let probe = ReducerProbe::new(registry.log("counter").unwrap()).handle(
            "counter.noop",
            move |prev: &Arc<Counter>, _| {
                let runs = Arc::clone(&runs);
                HandlerOutcome::with_note(Arc::clone(prev), move || {
                    runs.fetch_add(1, Ordering::SeqCst);
                    "never rendered".to_string()
                })
            },
        );

        let prev = Arc::new(Counter { value: 0 });
        let next = probe.reduce(&prev, &action("counter.noop"));

        assert!(Arc::ptr_eq(&prev, &next));
        assert_eq!(note_runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn broken_sink_never_breaks_reduction() {
        let registry = LogRegistry::new();
        registry.configure([("counter", FilterDirective::Level(Severity::Trace))]);
        registry.set_sink(|_| panic!("sink broke"));
        let probe = probe(&registry);
        let prev = Arc::new(Counter { value: 0 });

        let next = probe.reduce(&prev, &action("counter.increment"));
        assert_eq!(next.value, 1);
    }

    #[test]
    fn probe_never_alters_data_flow() {
        let (registry, _lines) = capturing_registry();
        let probe = probe(&registry);

        // The same reduction applied bare, for comparison.
        let bare = |prev: &Arc<Counter>, action: &Action| -> Arc<Counter> {
            match action.kind() {
                "counter.increment" => Arc::new(Counter {
                    value: prev.value + 1,
                }),
                _ => Arc::clone(prev),
            }
        };

        let mut wrapped = Arc::new(Counter { value: 0 });
        let mut unwrapped = Arc::new(Counter { value: 0 });
        for kind in ["counter.increment", "counter.noop", "unknown.op", "counter.increment"] {
            wrapped = probe.reduce(&wrapped, &action(kind));
            unwrapped = bare(&unwrapped, &action(kind));
        }

        assert_eq!(*wrapped, *unwrapped);
    }

    #[test]
    fn membership_decides_handled_not_return_shape() {
        let (registry, _) = capturing_registry();
        let probe = probe(&registry);

        assert!(probe.handles("counter.silent_noop"));
        assert!(!probe.handles("counter.unregistered"));
    }
}
