pub mod ivt_watchdog;

use chrono::NaiveDateTime;

pub fn get_now() -> NaiveDateTime {
    chrono::Utc::now().naive_local()
}
