use smallvec::SmallVec;

#[derive(Clone, Debug)]
struct Task<K> {
    key: K,
    interval_ms: f64,
    accum_ms: f64,
}

/// Fixed-interval task list driven by the frame loop.
///
/// Tasks are registered once; `start`/`stop` only flip the running flag, so
/// starting twice never duplicates a timer.
#[derive(Clone, Debug)]
pub struct Scheduler<K: Copy> {
    tasks: Vec<Task<K>>,
    running: bool,
}

impl<K: Copy> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            running: false,
        }
    }
}

impl<K: Copy> Scheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key` to fire every `interval_ms`. Non-positive intervals are ignored.
    pub fn every(&mut self, interval_ms: f64, key: K) -> &mut Self {
        if interval_ms > 0.0 && interval_ms.is_finite() {
            self.tasks.push(Task {
                key,
                interval_ms,
                accum_ms: 0.0,
            });
        }
        self
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop and reset every task's phase.
    pub fn stop(&mut self) {
        self.running = false;
        for t in &mut self.tasks {
            t.accum_ms = 0.0;
        }
    }

    /// Advance by `dt_ms` and collect the keys that fire, in registration
    /// order. A task fires at most once per call; intervals missed during a
    /// long frame (a hidden tab pauses the frame loop) are dropped, keeping
    /// only the phase.
    pub fn advance(&mut self, dt_ms: f64) -> SmallVec<[K; 4]> {
        let mut fired = SmallVec::new();
        if !self.running || !(dt_ms > 0.0) {
            return fired;
        }
        for t in &mut self.tasks {
            t.accum_ms += dt_ms;
            if t.accum_ms >= t.interval_ms {
                t.accum_ms %= t.interval_ms;
                fired.push(t.key);
            }
        }
        fired
    }
}
