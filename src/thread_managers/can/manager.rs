use super::worker::{CanWorker, CanWorkerInitializer};
use log::error;

pub struct CanManager {}

impl CanManager {
    pub fn run(initializer: CanWorkerInitializer) -> std::thread::JoinHandle<()> {
        std::thread::Builder::new()
            .name("CAN Thread".to_string())
            .spawn(move || {
                // Setup
                let mut can_worker = match CanWorker::new(initializer) {
                    Ok(worker) => worker,
                    Err(err) => {
                        error!("Unable to bring up the CAN socket: {:?}", err);
                        return;
                    }
                };
                loop {
                    can_worker.main_loop();
                }
            })
            .expect("Should be able to create Thread")
    }
}
