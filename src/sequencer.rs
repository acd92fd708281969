/**
 * @brief Contactor sequencing.
 *
 * Precharge: with the discharge path held open, close the precharge relay
 * and wait for the DC bus to come up to pack voltage through the precharge
 * resistor, then close the HV box contactor and drop the precharge relay.
 *
 * Discharge: open the HV box contactor, then close the discharge relay to
 * drain the HV capacitor bank.
 *
 * Both sequences are expressed as timestamped phases advanced from the
 * supervisor loop, so a stuck detect line cannot freeze the BMU: the detect
 * wait has a deadline and expiry reports a precharge fault for the cycle.
 */
use crate::hal::{ContactorIo, SolarOutput};
use crate::limits;
use crate::sampled_inputs::DemandInputs;
use log::{info, warn};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrechargePhase {
    /// Precharge relay closed; bus ramping behind the resistor.
    RelayClosed { since: Instant },
    /// Settle elapsed; polling the detect line against a deadline.
    AwaitDetect { deadline: Instant },
    /// Main contactor closed; precharge relay opens after the settle.
    MainClosed { since: Instant },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DischargePhase {
    /// Main contactor opened; discharge relay closes after the settle.
    MainOpened { since: Instant },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContactorState {
    Off,
    Precharging(PrechargePhase),
    Driving,
    Discharging(DischargePhase),
    Discharged,
}

pub struct ContactorSequencer {
    state: ContactorState,
    // precharge_established is only cleared by starting a discharge, so a
    // second engage request cannot re-run the sequence (and vice versa).
    precharge_established: bool,
    discharge_complete: bool,
    commanded_on: bool,
    solar_on: bool,
}

impl ContactorSequencer {
    pub fn new() -> ContactorSequencer {
        ContactorSequencer {
            state: ContactorState::Off,
            precharge_established: false,
            discharge_complete: false,
            commanded_on: false,
            solar_on: false,
        }
    }

    pub fn state(&self) -> ContactorState {
        self.state
    }

    pub fn precharge_state(&self) -> bool {
        self.precharge_established
    }

    pub fn discharge_state(&self) -> bool {
        self.discharge_complete
    }

    pub fn commanded_on(&self) -> bool {
        self.commanded_on
    }

    pub fn solar_enabled(&self) -> bool {
        self.solar_on
    }

    /**
     * @func beat
     * @brief Once per heartbeat: decide engaged/disengaged from the demand
     * edge and the safety verdict, start the matching sequence if one is
     * needed, and return the contactor command to put on the bus.
     */
    pub fn beat<Io>(
        &mut self,
        now: Instant,
        demands: &DemandInputs,
        safe_to_drive: bool,
        io: &mut Io,
    ) -> bool
    where
        Io: ContactorIo + SolarOutput,
    {
        let engage = demands.engage_requested() && safe_to_drive;
        if engage {
            self.commanded_on = true;
            // No solar feed while the contactors are commanded on.
            if self.solar_on {
                self.solar_on = false;
                io.set_solar_enable(false);
            }
            if !self.precharge_established && !self.sequence_in_flight() {
                self.start_precharge(now, io);
            }
        } else {
            self.commanded_on = false;
            if !self.discharge_complete && !self.is_discharging() {
                self.start_discharge(now, io);
            }
            self.solar_on = demands.solar_demand && safe_to_drive;
            io.set_solar_enable(self.solar_on);
        }
        self.commanded_on
    }

    /**
     * @func advance
     * @brief Every supervisor pass: progress an in-flight sequence. Returns
     * true when the precharge detect deadline expired this pass.
     */
    pub fn advance<Io: ContactorIo>(&mut self, now: Instant, io: &mut Io) -> bool {
        match self.state {
            ContactorState::Precharging(PrechargePhase::RelayClosed { since }) => {
                if now.duration_since(since)
                    >= Duration::from_millis(limits::PRECHARGE_SETTLE_MS)
                {
                    self.state = ContactorState::Precharging(PrechargePhase::AwaitDetect {
                        deadline: now
                            + Duration::from_millis(limits::PRECHARGE_DETECT_TIMEOUT_MS),
                    });
                }
                false
            }
            ContactorState::Precharging(PrechargePhase::AwaitDetect { deadline }) => {
                if io.precharge_detect() {
                    io.set_hvdc_enable(true);
                    info!("HVDC relay closed");
                    self.state =
                        ContactorState::Precharging(PrechargePhase::MainClosed { since: now });
                    false
                } else if now >= deadline {
                    warn!("precharge detect timed out, opening relays");
                    io.set_precharge_enable(false);
                    io.set_hvdc_enable(false);
                    self.state = ContactorState::Off;
                    true
                } else {
                    false
                }
            }
            ContactorState::Precharging(PrechargePhase::MainClosed { since }) => {
                if now.duration_since(since)
                    >= Duration::from_millis(limits::CONTACTOR_SETTLE_MS)
                {
                    io.set_precharge_enable(false);
                    info!("precharge relay opened, driving");
                    self.precharge_established = true;
                    self.state = ContactorState::Driving;
                }
                false
            }
            ContactorState::Discharging(DischargePhase::MainOpened { since }) => {
                if now.duration_since(since)
                    >= Duration::from_millis(limits::CONTACTOR_SETTLE_MS)
                {
                    io.set_discharge_disable(false);
                    info!("discharge relay closed");
                    self.discharge_complete = true;
                    self.state = ContactorState::Discharged;
                }
                false
            }
            _ => false,
        }
    }

    fn start_precharge<Io: ContactorIo>(&mut self, now: Instant, io: &mut Io) {
        // Precharging means we are no longer discharged.
        self.discharge_complete = false;
        // The discharge relay should already be open, but make sure.
        io.set_discharge_disable(true);
        io.set_precharge_enable(true);
        info!("precharge relay closed");
        self.state = ContactorState::Precharging(PrechargePhase::RelayClosed { since: now });
    }

    fn start_discharge<Io: ContactorIo>(&mut self, now: Instant, io: &mut Io) {
        self.precharge_established = false;
        // The precharge relay should already be open, but make sure.
        io.set_precharge_enable(false);
        io.set_hvdc_enable(false);
        info!("HVDC relay opened, discharging");
        self.state = ContactorState::Discharging(DischargePhase::MainOpened { since: now });
    }

    fn is_discharging(&self) -> bool {
        matches!(self.state, ContactorState::Discharging(_))
    }

    fn sequence_in_flight(&self) -> bool {
        matches!(
            self.state,
            ContactorState::Precharging(_) | ContactorState::Discharging(_)
        )
    }
}
