// Delayed invocations: payloads that become due after a number of seconds

/// A payload waiting for its delay to run out
#[derive(Debug, Clone)]
struct Scheduled<T> {
    remaining: f32,
    payload: T,
}

/// Queue of delayed payloads, advanced by the fixed update
#[derive(Debug)]
pub struct Timers<T> {
    pending: Vec<Scheduled<T>>,
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Deliver `payload` once `delay` seconds have elapsed
    pub fn schedule(&mut self, delay: f32, payload: T) {
        self.pending.push(Scheduled {
            remaining: delay.max(0.0),
            payload,
        });
    }

    /// Drop every pending payload matching the predicate
    pub fn cancel(&mut self, mut predicate: impl FnMut(&T) -> bool) {
        self.pending.retain(|scheduled| !predicate(&scheduled.payload));
    }

    /// Advance time and return the payloads that became due, in scheduling order
    pub fn update(&mut self, dt: f32) -> Vec<T> {
        let mut due = Vec::new();
        let mut still_pending = Vec::with_capacity(self.pending.len());

        for mut scheduled in self.pending.drain(..) {
            scheduled.remaining -= dt;
            if scheduled.remaining <= 0.0 {
                due.push(scheduled.payload);
            } else {
                still_pending.push(scheduled);
            }
        }

        self.pending = still_pending;
        due
    }

    pub fn is_pending(&self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        self.pending.iter().any(|scheduled| predicate(&scheduled.payload))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_fires_after_delay() {
        let mut timers = Timers::new();
        timers.schedule(1.5, "win");

        assert!(timers.update(1.0).is_empty());
        assert_eq!(timers.update(0.6), vec!["win"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_zero_delay_fires_next_update() {
        let mut timers = Timers::new();
        timers.schedule(0.0, 1);
        assert_eq!(timers.update(0.0), vec![1]);
    }

    #[test]
    fn test_order_is_preserved() {
        let mut timers = Timers::new();
        timers.schedule(0.5, 'a');
        timers.schedule(0.2, 'b');
        timers.schedule(0.3, 'c');
        assert_eq!(timers.update(1.0), vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_cancel() {
        let mut timers = Timers::new();
        timers.schedule(0.5, 1);
        timers.schedule(0.5, 2);
        timers.cancel(|p| *p == 1);

        assert!(!timers.is_pending(|p| *p == 1));
        assert!(timers.is_pending(|p| *p == 2));
        assert_eq!(timers.update(1.0), vec![2]);
    }
}
