use std::time::{Duration, Instant};

/// How long a notification stays up unless configured otherwise
pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000);

/// What the banner shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub visible: bool,
    pub text: String,
}

/// Transient message with a single cancelable hide deadline.
///
/// A new message replaces both the text and the deadline; timers never stack.
/// Time is passed in by the caller so the event loop (and tests) own the clock.
#[derive(Debug, Clone)]
pub struct NotificationTimer {
    duration: Duration,
    current: Notification,
    deadline: Option<Instant>,
}

impl Default for NotificationTimer {
    fn default() -> Self {
        NotificationTimer::new(DEFAULT_DURATION)
    }
}

impl NotificationTimer {
    pub fn new(duration: Duration) -> Self {
        NotificationTimer {
            duration,
            current: Notification::default(),
            deadline: None,
        }
    }

    /// Show `text` and restart the hide deadline from `now`.
    pub fn show(&mut self, text: impl Into<String>, now: Instant) {
        self.current = Notification {
            visible: true,
            text: text.into(),
        };
        self.deadline = Some(now + self.duration);
    }

    /// Hide the notification if its deadline has passed.
    /// Returns true when this call hid it.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.current.visible = false;
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Hide immediately and drop the pending deadline.
    pub fn dismiss(&mut self) {
        self.current.visible = false;
        self.deadline = None;
    }

    pub fn current(&self) -> &Notification {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn hides_after_duration() {
        let t0 = Instant::now();
        let mut timer = NotificationTimer::default();
        timer.show("Saved", t0);
        assert!(timer.current().visible);

        assert!(!timer.tick(t0 + ms(4999)));
        assert!(timer.current().visible);

        assert!(timer.tick(t0 + ms(5000)));
        assert!(!timer.current().visible);
        // Text is kept; only visibility flips
        assert_eq!(timer.current().text, "Saved");
    }

    #[test]
    fn second_message_restarts_the_window() {
        let t0 = Instant::now();
        let mut timer = NotificationTimer::default();
        timer.show("A", t0);
        let second = t0 + ms(1000);
        timer.show("B", second);

        timer.tick(t0 + ms(1500));
        assert_eq!(
            timer.current(),
            &Notification {
                visible: true,
                text: "B".into()
            }
        );

        // The first message's deadline has no effect
        timer.tick(t0 + ms(5000));
        assert!(timer.current().visible);
        timer.tick(second + ms(4999));
        assert!(timer.current().visible);

        timer.tick(second + ms(6001));
        assert!(!timer.current().visible);
    }

    #[test]
    fn tick_without_message_is_noop() {
        let mut timer = NotificationTimer::default();
        assert!(!timer.tick(Instant::now()));
        assert_eq!(timer.current(), &Notification::default());
    }

    #[test]
    fn dismiss_cancels_deadline() {
        let t0 = Instant::now();
        let mut timer = NotificationTimer::new(ms(100));
        timer.show("x", t0);
        timer.dismiss();
        assert!(!timer.current().visible);
        assert!(!timer.tick(t0 + ms(200)));
    }
}
