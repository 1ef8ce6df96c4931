//! Virtual timer slots
//!
//! The engine never touches a real clock. Each phase owns one slot; scheduling a phase
//! replaces whatever was pending for it, so two callbacks for the same phase can never
//! be outstanding at once. The host calls `pop_due` with its clock to fire them.

/// Callback kinds the engine schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerPhase {
    /// Next animation tick
    Frame,
    /// Settle delay between a charge request and the charge itself
    ChargeDelay,
    /// Victim waited too long
    Timeout,
}

/// Opaque handle to a scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy)]
struct Slot {
    handle: TimerHandle,
    due_at: u64,
}

/// One slot per phase on a millisecond clock
#[derive(Debug, Clone, Default)]
pub struct Timers {
    now: u64,
    next_handle: u64,
    frame: Option<Slot>,
    charge_delay: Option<Slot>,
    timeout: Option<Slot>,
}

impl Timers {
    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Move the clock forward (never backwards)
    pub fn settle(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    fn slot_mut(&mut self, phase: TimerPhase) -> &mut Option<Slot> {
        match phase {
            TimerPhase::Frame => &mut self.frame,
            TimerPhase::ChargeDelay => &mut self.charge_delay,
            TimerPhase::Timeout => &mut self.timeout,
        }
    }

    fn slot(&self, phase: TimerPhase) -> Option<Slot> {
        match phase {
            TimerPhase::Frame => self.frame,
            TimerPhase::ChargeDelay => self.charge_delay,
            TimerPhase::Timeout => self.timeout,
        }
    }

    /// Schedule `phase` after `delay_ms`, superseding any pending callback for it
    pub fn schedule(&mut self, phase: TimerPhase, delay_ms: u32) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        let due_at = self.now + u64::from(delay_ms);
        *self.slot_mut(phase) = Some(Slot { handle, due_at });
        handle
    }

    /// Drop the pending callback for `phase`, if any
    pub fn cancel(&mut self, phase: TimerPhase) -> Option<TimerHandle> {
        self.slot_mut(phase).take().map(|slot| slot.handle)
    }

    pub fn cancel_all(&mut self) {
        self.frame = None;
        self.charge_delay = None;
        self.timeout = None;
    }

    pub fn is_pending(&self, phase: TimerPhase) -> bool {
        self.slot(phase).is_some()
    }

    pub fn due_at(&self, phase: TimerPhase) -> Option<u64> {
        self.slot(phase).map(|slot| slot.due_at)
    }

    /// Take the earliest callback due at or before `until`.
    ///
    /// The clock jumps to that callback's due time so anything it schedules is
    /// relative to when it fired. Ties go to whichever was scheduled first.
    pub fn pop_due(&mut self, until: u64) -> Option<TimerPhase> {
        let phase = [TimerPhase::Frame, TimerPhase::ChargeDelay, TimerPhase::Timeout]
            .into_iter()
            .filter_map(|phase| self.slot(phase).map(|slot| (phase, slot)))
            .filter(|(_, slot)| slot.due_at <= until)
            .min_by_key(|(_, slot)| (slot.due_at, slot.handle.0))
            .map(|(phase, _)| phase)?;

        if let Some(slot) = self.slot_mut(phase).take() {
            self.settle(slot.due_at);
        }
        Some(phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduling_supersedes_pending_slot() {
        let mut timers = Timers::default();
        let first = timers.schedule(TimerPhase::Timeout, 100);
        let second = timers.schedule(TimerPhase::Timeout, 300);
        assert_ne!(first, second);
        assert_eq!(timers.due_at(TimerPhase::Timeout), Some(300));
        assert_eq!(timers.pop_due(200), None);
        assert_eq!(timers.pop_due(300), Some(TimerPhase::Timeout));
        assert_eq!(timers.pop_due(10_000), None);
    }

    #[test]
    fn pops_in_due_order_and_advances_clock() {
        let mut timers = Timers::default();
        timers.schedule(TimerPhase::Timeout, 50);
        timers.schedule(TimerPhase::Frame, 20);
        assert_eq!(timers.pop_due(100), Some(TimerPhase::Frame));
        assert_eq!(timers.now(), 20);
        assert_eq!(timers.pop_due(100), Some(TimerPhase::Timeout));
        assert_eq!(timers.now(), 50);
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut timers = Timers::default();
        timers.schedule(TimerPhase::Timeout, 10);
        timers.schedule(TimerPhase::Frame, 10);
        assert_eq!(timers.pop_due(10), Some(TimerPhase::Timeout));
        assert_eq!(timers.pop_due(10), Some(TimerPhase::Frame));
    }

    #[test]
    fn cancel_returns_handle_once() {
        let mut timers = Timers::default();
        let handle = timers.schedule(TimerPhase::ChargeDelay, 34);
        assert_eq!(timers.cancel(TimerPhase::ChargeDelay), Some(handle));
        assert_eq!(timers.cancel(TimerPhase::ChargeDelay), None);
        assert!(!timers.is_pending(TimerPhase::ChargeDelay));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut timers = Timers::default();
        timers.settle(500);
        timers.settle(100);
        assert_eq!(timers.now(), 500);
        timers.schedule(TimerPhase::Frame, 0);
        assert_eq!(timers.due_at(TimerPhase::Frame), Some(500));
    }
}
