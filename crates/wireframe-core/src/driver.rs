//! Animation clock and its timers.
//!
//! A [`Driver`] owns a repeating tick timer and an optional one-shot entry
//! timer on some [`TimerHost`]. Everything is single-threaded: callbacks run
//! one after another on the host's event loop and share state through `Rc`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::animator::Tick;
use crate::config::DriverConfig;
use crate::error::Result;

/// Something that can schedule callbacks, like a browser window.
pub trait TimerHost {
    type Handle;

    /// Call `callback` every `period_ms` until cancelled.
    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> Self::Handle;

    /// Call `callback` once after `delay_ms` unless cancelled first.
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;

    /// Cancel a timer. Cancelling a timer that already fired is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// Fixed-step animation clock driven by host timers.
pub struct Driver<H: TimerHost> {
    host: H,
    clock: Rc<Cell<u64>>,
    entering: Rc<Cell<bool>>,
    interval: Option<H::Handle>,
    entry: Option<H::Handle>,
}

impl<H: TimerHost> Driver<H> {
    /// Start ticking. `on_tick` runs after every clock increment.
    pub fn mount<F>(host: H, config: DriverConfig, mut on_tick: F) -> Result<Self>
    where
        F: FnMut(Tick) + 'static,
    {
        config.validate()?;
        let clock = Rc::new(Cell::new(0u64));
        let entering = Rc::new(Cell::new(config.entry_duration_ms.is_some()));

        let interval = {
            let clock = Rc::clone(&clock);
            let entering = Rc::clone(&entering);
            let step = config.tick_step;
            host.set_interval(
                config.tick_interval_ms,
                Box::new(move || {
                    let now = clock.get() + step;
                    clock.set(now);
                    on_tick(Tick {
                        clock: now,
                        entering: entering.get(),
                    });
                }),
            )
        };

        let entry = config.entry_duration_ms.map(|delay| {
            let entering = Rc::clone(&entering);
            host.set_timeout(delay, Box::new(move || entering.set(false)))
        });

        log::info!(
            "driver mounted: step {} every {}ms, entry {:?}",
            config.tick_step,
            config.tick_interval_ms,
            config.entry_duration_ms
        );
        Ok(Self {
            host,
            clock,
            entering,
            interval: Some(interval),
            entry,
        })
    }

    pub fn clock(&self) -> u64 {
        self.clock.get()
    }

    pub fn is_entering(&self) -> bool {
        self.entering.get()
    }

    pub fn tick(&self) -> Tick {
        Tick {
            clock: self.clock(),
            entering: self.is_entering(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.interval.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Cancel both timers. No tick runs after this returns.
    pub fn teardown(&mut self) {
        let had_interval = self.interval.is_some();
        if let Some(h) = self.interval.take() {
            self.host.cancel(h);
        }
        if let Some(h) = self.entry.take() {
            self.host.cancel(h);
        }
        if had_interval {
            log::info!("driver torn down at clock {}", self.clock.get());
        }
    }
}

impl<H: TimerHost> Drop for Driver<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Opaque id handed out by [`ManualTimers`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

enum Callback {
    Repeat(Box<dyn FnMut()>),
    Once(Box<dyn FnOnce()>),
}

struct Entry {
    id: u64,
    due: u64,
    period: u32,
    callback: Callback,
}

#[derive(Default)]
struct ManualInner {
    now: u64,
    next_id: u64,
    entries: Vec<Entry>,
    /// Id of the callback currently running, and whether it cancelled itself.
    running: Option<(u64, bool)>,
}

/// Virtual-time timer host.
///
/// Time only moves when [`ManualTimers::advance`] is called; due timers then
/// fire in deadline order (ties by creation order). Clones share one queue.
#[derive(Clone, Default)]
pub struct ManualTimers {
    inner: Rc<RefCell<ManualInner>>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.inner.borrow().now
    }

    /// Number of live timers.
    pub fn pending(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Move time forward by `ms`, firing everything that comes due.
    pub fn advance(&self, ms: u64) {
        let target = self.inner.borrow().now + ms;
        loop {
            let entry = {
                let mut inner = self.inner.borrow_mut();
                let next = inner
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.due <= target)
                    .min_by_key(|(_, e)| (e.due, e.id))
                    .map(|(i, _)| i);
                match next {
                    Some(i) => {
                        let entry = inner.entries.swap_remove(i);
                        inner.now = entry.due;
                        inner.running = Some((entry.id, false));
                        entry
                    }
                    None => break,
                }
            };

            // Run outside the borrow so callbacks may schedule or cancel.
            let Entry {
                id,
                due,
                period,
                callback,
            } = entry;
            match callback {
                Callback::Repeat(mut f) => {
                    f();
                    let mut inner = self.inner.borrow_mut();
                    let cancelled = matches!(inner.running.take(), Some((_, true)));
                    if !cancelled {
                        inner.entries.push(Entry {
                            id,
                            due: due + period.max(1) as u64,
                            period,
                            callback: Callback::Repeat(f),
                        });
                    }
                }
                Callback::Once(f) => {
                    f();
                    self.inner.borrow_mut().running = None;
                }
            }
        }
        self.inner.borrow_mut().now = target;
    }

    fn schedule(&self, delay: u32, period: u32, callback: Callback) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let due = inner.now + delay as u64;
        inner.entries.push(Entry {
            id,
            due,
            period,
            callback,
        });
        TimerId(id)
    }
}

impl TimerHost for ManualTimers {
    type Handle = TimerId;

    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> TimerId {
        self.schedule(period_ms.max(1), period_ms, Callback::Repeat(callback))
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        self.schedule(delay_ms, 0, Callback::Once(callback))
    }

    fn cancel(&self, handle: TimerId) {
        let mut inner = self.inner.borrow_mut();
        inner.entries.retain(|e| e.id != handle.0);
        if let Some((id, cancelled)) = inner.running.as_mut() {
            if *id == handle.0 {
                *cancelled = true;
            }
        }
        log::debug!("timer {} cancelled", handle.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_fires_on_period() {
        let timers = ManualTimers::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        timers.set_interval(16, Box::new(move || h.set(h.get() + 1)));
        timers.advance(15);
        assert_eq!(hits.get(), 0);
        timers.advance(1);
        assert_eq!(hits.get(), 1);
        timers.advance(32);
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn test_timeout_fires_once() {
        let timers = ManualTimers::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        timers.set_timeout(100, Box::new(move || h.set(h.get() + 1)));
        timers.advance(1000);
        assert_eq!(hits.get(), 1);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_callback_can_cancel_itself() {
        let timers = ManualTimers::new();
        let hits = Rc::new(Cell::new(0));
        let slot: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));
        let (h, s, t) = (Rc::clone(&hits), Rc::clone(&slot), timers.clone());
        let id = timers.set_interval(
            10,
            Box::new(move || {
                h.set(h.get() + 1);
                if h.get() == 2 {
                    if let Some(id) = s.get() {
                        t.cancel(id);
                    }
                }
            }),
        );
        slot.set(Some(id));
        timers.advance(100);
        assert_eq!(hits.get(), 2);
        assert_eq!(timers.pending(), 0);
    }
}
