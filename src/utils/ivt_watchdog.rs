/**
 * @brief The IVT watchdog is responsible for keeping track of the last
 * current frame received from either IVT over the can bus. The current
 * frames bookend the freshness window: if none arrives inside the timeout
 * the packs are flying blind and the supervisor must treat the readings as
 * stale.
 *
 * Seeded with the boot timestamp so a bus that never says anything goes
 * stale one timeout after power-up.
 */
use chrono::NaiveDateTime;

pub struct IvtWatchdog {
    last_current_frame: NaiveDateTime,
    timeout_ms: i64,
}

impl IvtWatchdog {
    pub fn new(boot: NaiveDateTime, timeout_ms: i64) -> IvtWatchdog {
        IvtWatchdog {
            last_current_frame: boot,
            timeout_ms,
        }
    }

    pub fn feed(&mut self, timestamp: NaiveDateTime) {
        self.last_current_frame = timestamp;
    }

    pub fn is_stale(&self, now: &NaiveDateTime) -> bool {
        now.signed_duration_since(self.last_current_frame)
            .num_milliseconds()
            > self.timeout_ms
    }

    pub fn millis_since_last(&self, now: &NaiveDateTime) -> i64 {
        now.signed_duration_since(self.last_current_frame)
            .num_milliseconds()
    }
}

/********************
 *      TESTS
 ********************/
