use super::messages::WorkerMessage;
use std::sync::mpsc::Sender;
use std::time::Duration;

pub struct TickerManager {}

impl TickerManager {
    /**
     * @brief Raise the heartbeat flag once per period. The supervisor loop
     * cannot read the clock for this itself without busy spinning, so the
     * tick arrives on the same channel as decoded frames.
     */
    pub fn run(
        sender: Sender<WorkerMessage>,
        period: Duration,
    ) -> std::thread::JoinHandle<()> {
        std::thread::Builder::new()
            .name("Heartbeat Ticker".to_string())
            .spawn(move || loop {
                std::thread::sleep(period);
                if sender.send(WorkerMessage::HeartbeatTick).is_err() {
                    // Supervisor is gone.
                    return;
                }
            })
            .expect("Should be able to create Thread")
    }
}
