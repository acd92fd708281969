use crate::can_extentions::prelude::CanCommand;
use chrono::NaiveDateTime;

/// Everything the supervisor loop wakes up for, on one channel so the loop
/// can block on a single receiver.
pub enum WorkerMessage {
    Frame(CanCommand, NaiveDateTime),
    HeartbeatTick,
}

/// Outbound traffic for the CAN worker.
pub enum BusMessage {
    Heartbeat([u8; 6]),
    ContactorCommand(bool),
    ConfigureIvt,
}
