use std::time::{Duration, Instant};

/// Holds back a changing value until it has been stable for `delay`.
///
/// The debouncer does not own a timer. Callers push values with the time they
/// arrived and poll with the current time; `deadline()` tells an event loop
/// when the next poll can produce something. Intermediate values are never
/// emitted and there is no maximum wait.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    output: T,
    last_input: T,
    deadline: Option<Instant>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// The initial output equals the first input
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            output: initial.clone(),
            last_input: initial,
            deadline: None,
        }
    }

    /// Record a new input value, restarting the timer when it differs from the previous one
    pub fn push(&mut self, value: T, now: Instant) {
        if value == self.last_input {
            return;
        }
        self.last_input = value;
        self.deadline = Some(now + self.delay);
    }

    /// Emit the pending value once its timer has elapsed.
    ///
    /// Emits even when the value equals the previous output; callers decide
    /// whether an unchanged value needs work.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.output = self.last_input.clone();
                Some(self.output.clone())
            }
            _ => None,
        }
    }

    pub fn output(&self) -> &T {
        &self.output
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_initial_output_is_first_input() {
        let mut debouncer = Debouncer::new("".to_string(), ms(500));
        assert_eq!(debouncer.output(), "");
        assert!(debouncer.deadline().is_none());
        assert_eq!(debouncer.poll(Instant::now()), None);
    }

    #[test]
    fn test_emits_after_quiet_interval() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), ms(500));

        debouncer.push("batman".to_string(), t0);
        assert_eq!(debouncer.poll(t0 + ms(499)), None);
        assert_eq!(debouncer.output(), "");
        assert_eq!(debouncer.poll(t0 + ms(500)), Some("batman".to_string()));
        assert_eq!(debouncer.output(), "batman");
        assert_eq!(debouncer.poll(t0 + ms(900)), None);
    }

    #[test]
    fn test_rapid_changes_emit_only_last_value() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), ms(500));
        let mut emitted = Vec::new();

        for (i, value) in ["b", "ba", "bat", "batm", "batma", "batman"].iter().enumerate() {
            let at = t0 + ms(100 * i as u64);
            debouncer.push(value.to_string(), at);
            emitted.extend(debouncer.poll(at));
        }
        emitted.extend(debouncer.poll(t0 + ms(899)));
        assert!(emitted.is_empty());

        emitted.extend(debouncer.poll(t0 + ms(1000)));
        assert_eq!(emitted, vec!["batman".to_string()]);
    }

    #[test]
    fn test_repeated_value_does_not_restart_timer() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(0u32, ms(100));

        debouncer.push(7, t0);
        debouncer.push(7, t0 + ms(90));
        assert_eq!(debouncer.deadline(), Some(t0 + ms(100)));
        assert_eq!(debouncer.poll(t0 + ms(100)), Some(7));
    }

    #[test]
    fn test_returning_to_output_still_emits() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new("batman".to_string(), ms(500));

        debouncer.push("b".to_string(), t0);
        debouncer.push("batman".to_string(), t0 + ms(100));
        assert_eq!(debouncer.poll(t0 + ms(600)), Some("batman".to_string()));
    }
}
