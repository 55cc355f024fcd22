//! Cooperative scheduler for the periodic tasks
//!
//! Three timers (tick, obstacle spawn, autofire) run on a virtual
//! millisecond clock. Each firing runs to completion before the next one
//! starts, in due-time order, so no two tasks ever see each other half done.
//! Timers only run while the session is running.

use std::time::Duration;

use super::state::{FireSource, GameState};
use super::tick::tick;
use crate::consts::*;

/// A periodic task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Tick,
    ObstacleSpawn,
    Autofire,
}

impl Task {
    /// Tie-break order for timers due at the same instant
    pub const ALL: [Task; 3] = [Task::Tick, Task::ObstacleSpawn, Task::Autofire];

    pub fn period(self) -> Duration {
        match self {
            Task::Tick => TICK_PERIOD,
            Task::ObstacleSpawn => OBSTACLE_SPAWN_PERIOD,
            Task::Autofire => AUTOFIRE_PERIOD,
        }
    }

    fn run(self, state: &mut GameState) {
        match self {
            Task::Tick => tick(state),
            Task::ObstacleSpawn => {
                state.spawn_obstacle();
            }
            Task::Autofire => {
                state.fire_projectile(FireSource::Autofire);
            }
        }
    }
}

/// A fixed-period timer; `None` when disarmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTimer {
    pub task: Task,
    next_due: Option<Duration>,
}

impl PeriodicTimer {
    pub fn new(task: Task) -> Self {
        Self {
            task,
            next_due: None,
        }
    }

    /// First firing one period after `now`
    pub fn arm(&mut self, now: Duration) {
        self.next_due = Some(now + self.task.period());
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.next_due
    }

    fn reschedule(&mut self) {
        if let Some(due) = self.next_due.as_mut() {
            *due += self.task.period();
        }
    }
}

/// Firings performed by one `advance`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    pub ticks: u32,
    pub obstacle_spawns: u32,
    pub autofires: u32,
    /// Ticks skipped by the per-advance tick budget
    pub dropped_ticks: u32,
}

/// Deterministic replacement for wall-clock timers
#[derive(Debug, Clone)]
pub struct Scheduler {
    now: Duration,
    timers: [PeriodicTimer; 3],
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            timers: Task::ALL.map(PeriodicTimer::new),
        }
    }

    /// Virtual time elapsed so far
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_armed(&self) -> bool {
        self.timers.iter().any(PeriodicTimer::is_armed)
    }

    pub fn timers(&self) -> &[PeriodicTimer; 3] {
        &self.timers
    }

    fn disarm_all(&mut self) {
        for timer in &mut self.timers {
            timer.disarm();
        }
    }

    /// Earliest timer due at or before `target`; ties go to the earlier task
    fn next_due_timer(&self, target: Duration) -> Option<usize> {
        let mut best: Option<(usize, Duration)> = None;
        for (i, timer) in self.timers.iter().enumerate() {
            let Some(due) = timer.next_due else { continue };
            if due > target {
                continue;
            }
            if best.is_none_or(|(_, best_due)| due < best_due) {
                best = Some((i, due));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Move the clock forward by `elapsed`, firing every timer that falls due
    pub fn advance(&mut self, state: &mut GameState, elapsed: Duration) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        let target = self.now + elapsed;

        if !state.is_running() {
            self.disarm_all();
            self.now = target;
            return report;
        }
        if !self.is_armed() {
            let now = self.now;
            for timer in &mut self.timers {
                timer.arm(now);
            }
        }

        while let Some(i) = self.next_due_timer(target) {
            let timer = &mut self.timers[i];
            let Some(due) = timer.next_due else { break };
            self.now = due;

            if timer.task == Task::Tick && report.ticks >= MAX_TICKS_PER_ADVANCE {
                // Over budget: skip the backlog instead of replaying it
                while timer.next_due.is_some_and(|d| d <= target) {
                    timer.reschedule();
                    report.dropped_ticks += 1;
                }
                continue;
            }

            let task = timer.task;
            timer.reschedule();
            task.run(state);
            match task {
                Task::Tick => report.ticks += 1,
                Task::ObstacleSpawn => report.obstacle_spawns += 1,
                Task::Autofire => report.autofires += 1,
            }

            if !state.is_running() {
                // Future firings are suppressed; the task that ended the run completed
                self.disarm_all();
                break;
            }
        }

        if report.dropped_ticks > 0 {
            log::debug!("Dropped {} ticks to keep up", report.dropped_ticks);
        }
        self.now = target;
        report
    }
}
