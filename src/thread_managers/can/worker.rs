use super::super::messages::{BusMessage, WorkerMessage};
use crate::can_extentions;
use crate::can_extentions::ivt_config;
use crate::can_extentions::prelude::*;
use crate::limits;
use crate::utils::get_now;
use log::{debug, warn};
use socketcan::CANSocket;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

pub struct CanWorkerInitializer {
    pub can_interface: String,
    pub worker_message_sender: Sender<WorkerMessage>,
    pub bus_message_receiver: Receiver<BusMessage>,
    /// How long a read may block before the worker services outbound
    /// traffic; keeps contactor commands from queueing behind a quiet bus.
    pub can_socket_read_timeout: Duration,
}

/**
 * @brief Owns the CAN socket. Inbound frames are decoded and forwarded with
 * their arrival timestamp; outbound requests are drained after every read
 * slot. Transmissions are bounded by the socket write timeout and failures
 * are logged but never retried (best-effort emission).
 */
pub struct CanWorker {
    socket: CANSocket,
    worker_message_sender: Sender<WorkerMessage>,
    bus_message_receiver: Receiver<BusMessage>,
}

impl CanWorker {
    pub fn new(initializer: CanWorkerInitializer) -> Result<CanWorker, CanError> {
        let socket = can_extentions::open_socket(initializer.can_interface.as_str())?;
        socket
            .set_read_timeout(initializer.can_socket_read_timeout)
            .map_err(CanError::UnableToSetTimeout)?;
        socket
            .set_write_timeout(Duration::from_millis(limits::CAN_TIMEOUT_MS))
            .map_err(CanError::UnableToSetTimeout)?;
        Ok(CanWorker {
            socket,
            worker_message_sender: initializer.worker_message_sender,
            bus_message_receiver: initializer.bus_message_receiver,
        })
    }

    pub fn main_loop(&mut self) {
        if let Ok(frame) = self.socket.read_frame() {
            let command = frame.get_command();
            if self
                .worker_message_sender
                .send(WorkerMessage::Frame(command, get_now()))
                .is_err()
            {
                // Supervisor is gone; nothing left to do on this thread.
                panic!("Supervisor hung up the worker channel, exiting");
            }
        }
        while let Ok(message) = self.bus_message_receiver.try_recv() {
            self.handle_bus_message(message);
        }
    }

    fn handle_bus_message(&self, message: BusMessage) {
        let result = match message {
            BusMessage::Heartbeat(status) => self.socket.send_heartbeat(&status),
            BusMessage::ContactorCommand(engaged) => {
                self.socket.send_contactor_command(engaged)
            }
            BusMessage::ConfigureIvt => {
                self.configure_ivt();
                Ok(())
            }
        };
        if let Err(err) = result {
            warn!("CAN send failed: {:?}", err);
        }
    }

    /**
     * @func configure_ivt
     * @brief Put both IVTs back into the known reporting configuration:
     * stop mode, the eight channel setups, start mode, each followed by a
     * short settle.
     */
    fn configure_ivt(&self) {
        debug!("configuring IVTs");
        for payload in ivt_config::config_payloads().iter() {
            if let Err(err) = self.socket.send_ivt_config_frame(payload) {
                warn!("IVT config frame failed: {:?}", err);
            }
            std::thread::sleep(Duration::from_micros(limits::IVT_CONFIG_SETTLE_US));
        }
    }
}
