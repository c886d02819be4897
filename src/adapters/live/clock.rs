//! Live clock using the system clock.

use chrono::{DateTime, Utc};

use crate::ports::Clock;

/// Returns the real current time.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_the_system_clock() {
        let before = Utc::now();
        let now = LiveClock.now();
        assert!(now >= before && now <= Utc::now());
    }
}
