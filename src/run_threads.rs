use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crate::can_extentions::prelude::CanCommand;
use crate::error::Error;
use crate::hal;
use crate::hal::{ContactorIo, SolarOutput, StatusLeds};
use crate::heartbeat::HeartbeatScheduler;
use crate::ivt::IvtChannel;
use crate::limits;
use crate::sampled_inputs::SampledInputs;
use crate::sequencer::ContactorSequencer;
use crate::supervisor::{check_packs, update_status, SupervisorState};
use crate::thread_managers;
use crate::thread_managers::messages::{BusMessage, WorkerMessage};
use crate::utils::get_now;
use crate::utils::ivt_watchdog::IvtWatchdog;
use log::info;

pub fn run_threads(config: crate::config::Config) -> Result<(), Error> {
    let (worker_message_sender, worker_message_receiver): (
        Sender<WorkerMessage>,
        Receiver<WorkerMessage>,
    ) = channel();
    let (bus_message_sender, bus_message_receiver): (Sender<BusMessage>, Receiver<BusMessage>) =
        channel();

    // Configuration Values
    let can_socket_read_timeout = Duration::from_millis(10);
    let supervisor_pass_timeout = Duration::from_millis(10); // sequencer phases keep advancing on a quiet bus
    // End Configuration Values

    let _can_handle = thread_managers::CanManager::run(thread_managers::CanWorkerInitializer {
        can_interface: config.can_interface,
        worker_message_sender: worker_message_sender.clone(),
        bus_message_receiver,
        can_socket_read_timeout,
    });
    let _ticker_handle = thread_managers::TickerManager::run(
        worker_message_sender.clone(),
        Duration::from_millis(limits::HEARTBEAT_PERIOD_MS),
    );

    info!("BMU supervisor starting");
    let mut io = hal::bench::BenchIo::new();
    supervise(
        worker_message_receiver,
        bus_message_sender,
        supervisor_pass_timeout,
        &mut io,
    )
}

/**
 * @brief The supervisor main loop: drain worker messages, apply them to the
 * sampled state, evaluate safety, advance the contactor sequencer, and emit
 * heartbeats on the tick or on a fault transition.
 */
pub fn supervise<Io>(
    messages: Receiver<WorkerMessage>,
    bus: Sender<BusMessage>,
    pass_timeout: Duration,
    io: &mut Io,
) -> Result<(), Error>
where
    Io: ContactorIo + SolarOutput + StatusLeds,
{
    let mut inputs = SampledInputs::new();
    let mut bmu = SupervisorState::new();
    let mut sequencer = ContactorSequencer::new();
    let mut scheduler = HeartbeatScheduler::new();
    let mut watchdog = IvtWatchdog::new(get_now(), limits::IVT_TIMEOUT_MS);

    loop {
        let mut beat_due = false;

        match messages.recv_timeout(pass_timeout) {
            Ok(message) => {
                handle_message(message, &mut inputs, &mut watchdog, &bus, &mut beat_due)?;
                // Drain whatever else queued up behind the first message.
                while let Ok(message) = messages.try_recv() {
                    handle_message(message, &mut inputs, &mut watchdog, &bus, &mut beat_due)?;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Err(Error::WorkerChannelClosed),
        }

        // One evaluation pass.
        let now_wall = get_now();
        let now = Instant::now();
        check_packs(&mut bmu, &inputs);
        let precharge_timed_out = sequencer.advance(now, io);
        update_status(
            &mut bmu,
            &mut inputs.demands,
            watchdog.is_stale(&now_wall),
            precharge_timed_out,
        );
        bmu.precharge_state = sequencer.precharge_state();
        bmu.discharge_state = sequencer.discharge_state();
        bmu.contactor_state = sequencer.commanded_on();

        let status = bmu.status_frame();
        if beat_due || scheduler.should_emit_now(&status, bmu.error_flag) {
            bmu.log_status();
            bus.send(BusMessage::Heartbeat(status))
                .map_err(|_| Error::BusChannelClosed)?;
            let engaged = sequencer.beat(now, &inputs.demands, bmu.safe_to_drive, io);
            bus.send(BusMessage::ContactorCommand(engaged))
                .map_err(|_| Error::BusChannelClosed)?;
            bmu.contactor_state = sequencer.commanded_on();
        }

        io.set_safe_indicator(bmu.safe_to_drive);
        io.set_contactor_indicator(sequencer.commanded_on());
        io.set_solar_indicator(sequencer.solar_enabled());
        io.set_charge_indicator(bmu.charging_state);

        scheduler.latch(&status);
    }
}

fn handle_message(
    message: WorkerMessage,
    inputs: &mut SampledInputs,
    watchdog: &mut IvtWatchdog,
    bus: &Sender<BusMessage>,
    beat_due: &mut bool,
) -> Result<(), Error> {
    match message {
        WorkerMessage::HeartbeatTick => *beat_due = true,
        WorkerMessage::Frame(command, at) => {
            match command {
                // Current frames bookend the IVT freshness window.
                CanCommand::IvtReading {
                    channel: IvtChannel::Current,
                    ..
                } => watchdog.feed(at),
                CanCommand::IvtUnexpectedChannel(pack) => {
                    info!("IVT {:?} reporting unconfigured channels, reconfiguring", pack);
                    bus.send(BusMessage::ConfigureIvt)
                        .map_err(|_| Error::BusChannelClosed)?;
                }
                _ => {}
            }
            inputs.apply(command, at);
        }
    }
    Ok(())
}
