//! Process-scoped engine handle
//!
//! The game has exactly one engine. `get_or_init` builds it on first use and hands
//! back the same handle afterwards; the init closure is not called again. `reset`
//! drops it (tests, teardown) so the next `get_or_init` builds a fresh one.
//!
//! UI handlers may call back into the handle (a pause handler that pauses, a game-over
//! handler that restarts). Events raised while handlers run are queued and delivered
//! after the current one, in order.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::input::RawInput;
use crate::runtime::Runtime;
use crate::settings::Settings;
use crate::sim::{Engine, GameEvent};
use crate::ui::{self, GameHandlers};

thread_local! {
    static INSTANCE: RefCell<Option<EngineHandle>> = const { RefCell::new(None) };
}

struct Shared {
    runtime: RefCell<Runtime>,
    handlers: RefCell<Box<dyn GameHandlers>>,
    queue: RefCell<VecDeque<GameEvent>>,
    dispatching: Cell<bool>,
}

/// Cheap, clonable reference to the engine
#[derive(Clone)]
pub struct EngineHandle {
    shared: Rc<Shared>,
}

impl EngineHandle {
    /// Wrap a runtime without registering it as the process instance
    pub fn new(runtime: Runtime, handlers: Box<dyn GameHandlers>) -> Self {
        Self {
            shared: Rc::new(Shared {
                runtime: RefCell::new(runtime),
                handlers: RefCell::new(handlers),
                queue: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
            }),
        }
    }

    /// Bind input and begin the first level
    pub fn start(&self) {
        let events = self.shared.runtime.borrow_mut().start();
        self.deliver(events);
    }

    /// Unbind input, leave the game as it is
    pub fn stop(&self) {
        let events = self.shared.runtime.borrow_mut().stop();
        self.deliver(events);
    }

    pub fn pause(&self, paused: bool) {
        let events = self.shared.runtime.borrow_mut().pause(paused);
        self.deliver(events);
    }

    pub fn input(&self, raw: &RawInput) {
        let events = self.shared.runtime.borrow_mut().input(raw);
        self.deliver(events);
    }

    /// Drive the engine up to the host clock
    pub fn advance(&self, now_ms: u64) {
        let events = self.shared.runtime.borrow_mut().advance(now_ms);
        self.deliver(events);
    }

    /// Sanitize, persist and apply new preferences
    pub fn apply_settings(&self, settings: Settings) {
        let settings = settings.sanitized();
        settings.save();
        self.shared.runtime.borrow_mut().apply_settings(settings);
    }

    pub fn settings(&self) -> Settings {
        self.shared.runtime.borrow().settings().clone()
    }

    /// Read-only look at the engine
    pub fn with_engine<R>(&self, f: impl FnOnce(&Engine) -> R) -> R {
        f(self.shared.runtime.borrow().engine())
    }

    pub fn input_bound(&self) -> bool {
        self.shared.runtime.borrow().input_bound()
    }

    /// Whether two handles refer to the same engine
    pub fn same_as(&self, other: &EngineHandle) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    fn deliver(&self, events: Vec<GameEvent>) {
        self.shared.queue.borrow_mut().extend(events);
        if self.shared.dispatching.replace(true) {
            // The outer call drains the queue
            return;
        }
        loop {
            let next = self.shared.queue.borrow_mut().pop_front();
            let Some(event) = next else { break };
            ui::dispatch(&event, self.shared.handlers.borrow_mut().as_mut());
        }
        self.shared.dispatching.set(false);
    }
}

/// The process instance, built by `init` on first call
pub fn get_or_init<E>(
    init: impl FnOnce() -> Result<EngineHandle, E>,
) -> Result<EngineHandle, E> {
    if let Some(handle) = get() {
        return Ok(handle);
    }
    let handle = init()?;
    INSTANCE.with(|slot| *slot.borrow_mut() = Some(handle.clone()));
    log::info!("Engine created");
    Ok(handle)
}

/// The process instance, if one was built
pub fn get() -> Option<EngineHandle> {
    INSTANCE.with(|slot| slot.borrow().clone())
}

/// Tear down the process instance, unbinding its input first
pub fn reset() {
    let handle = INSTANCE.with(|slot| slot.borrow_mut().take());
    if let Some(handle) = handle {
        handle.stop();
        log::info!("Engine reset");
    }
}
