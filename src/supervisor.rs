/**
 * @brief Fault detection and the heartbeat payload.
 *
 * check_packs() and update_status() together are the per-pass safety
 * evaluation: the first derives the fault bits from the sampled IVT
 * readings, the second aggregates them (plus the freshness and precharge
 * faults) into error_flag / safe_to_drive and force-clears the ignition
 * demand on a fault.
 */
use crate::limits;
use crate::sampled_inputs::{DemandInputs, SampledInputs};
use log::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SupervisorState {
    pub over_current: bool,
    pub under_voltage: bool,
    pub over_voltage: bool,
    pub under_temperature: bool,
    pub over_temperature: bool,
    pub safe_to_drive: bool,
    pub charging_state: bool,
    pub precharge_state: bool,
    pub discharge_state: bool,
    pub contactor_state: bool,
    // Fan control is not implemented yet; the heartbeat carries placeholders.
    pub fan1_state: u8,
    pub fan2_state: u8,
    pub fan3_state: u8,
    pub fan4_state: u8,
    pub error_flag: bool,
    // Hysteresis memory: the previous pass's verdict per monitored bound.
    over_voltage_latch: bool,
    under_voltage_latch: bool,
    over_temperature_latch: bool,
    under_temperature_latch: bool,
}

impl SupervisorState {
    /// Boot defaults: all faults cleared and safe_to_drive off until the
    /// first evaluation pass has seen live data.
    pub fn new() -> SupervisorState {
        SupervisorState {
            over_current: false,
            under_voltage: false,
            over_voltage: false,
            under_temperature: false,
            over_temperature: false,
            safe_to_drive: false,
            charging_state: false,
            precharge_state: false,
            discharge_state: false,
            contactor_state: false,
            fan1_state: 0,
            fan2_state: 0,
            fan3_state: 0,
            fan4_state: 0,
            error_flag: false,
            over_voltage_latch: false,
            under_voltage_latch: false,
            over_temperature_latch: false,
            under_temperature_latch: false,
        }
    }

    /// The 6-byte heartbeat payload sent to 0x400.
    pub fn status_frame(&self) -> [u8; 6] {
        let mut frame = [0u8; 6];
        if self.over_current {
            frame[0] |= 1 << 0;
        }
        if self.under_voltage {
            frame[0] |= 1 << 1;
        }
        if self.over_voltage {
            frame[0] |= 1 << 2;
        }
        if self.under_temperature {
            frame[0] |= 1 << 3;
        }
        if self.over_temperature {
            frame[0] |= 1 << 4;
        }
        if self.safe_to_drive {
            frame[0] |= 1 << 5;
        }
        if self.charging_state {
            frame[1] |= 1 << 0;
        }
        if self.precharge_state {
            frame[1] |= 1 << 1;
        }
        if self.discharge_state {
            frame[1] |= 1 << 2;
        }
        frame[2] = self.fan1_state;
        frame[3] = self.fan2_state;
        frame[4] = self.fan3_state;
        frame[5] = self.fan4_state;
        frame
    }

    /// Debug dump of the full supervisor state, mirrored on every beat.
    pub fn log_status(&self) {
        debug!(
            "BMU status: over_current={} under_voltage={} over_voltage={} \
             under_temperature={} over_temperature={} safe_to_drive={} \
             charging={} precharge={} discharge={} contactor={}",
            self.over_current,
            self.under_voltage,
            self.over_voltage,
            self.under_temperature,
            self.over_temperature,
            self.safe_to_drive,
            self.charging_state,
            self.precharge_state,
            self.discharge_state,
            self.contactor_state,
        );
    }
}

/**
 * @func check_bounds
 * @brief One hysteresis band. While a fault is latched the trigger
 * threshold moves into the safe region by the hysteresis amount, so the
 * fault only clears once the reading has crossed back through the band.
 */
fn check_bounds<I>(
    readings: I,
    nominal_max: i32,
    nominal_min: i32,
    hysteresis: i32,
    was_over: bool,
    was_under: bool,
) -> (bool, bool)
where
    I: IntoIterator<Item = i32>,
{
    let max_limit = if was_over {
        nominal_max - hysteresis
    } else {
        nominal_max
    };
    let min_limit = if was_under {
        nominal_min + hysteresis
    } else {
        nominal_min
    };
    let mut over = false;
    let mut under = false;
    for reading in readings {
        if reading > max_limit {
            over = true;
        }
        if reading < min_limit {
            under = true;
        }
    }
    (over, under)
}

/**
 * @func check_packs
 * @brief Derive charging, current, voltage and temperature verdicts from
 * the IVT readings. Packs that have never reported are skipped; the
 * freshness watchdog covers the nothing-arriving case separately.
 */
pub fn check_packs(bmu: &mut SupervisorState, inputs: &SampledInputs) {
    // Net current into the packs means we are charging.
    match inputs.max_current_ma() {
        Some(current) if current < 0 => {
            debug!(
                "charging through IVT: front={:?} mA rear={:?} mA",
                inputs.front.current_ma(),
                inputs.rear.current_ma()
            );
            bmu.charging_state = true;
        }
        _ => bmu.charging_state = false,
    }

    // Current limits have no hysteresis: both the discharge and the charge
    // direction are checked across both IVTs.
    let over_discharge = inputs
        .max_current_ma()
        .map_or(false, |current| current >= limits::MAX_DISCHARGE_CURRENT_MA);
    let over_charge = inputs
        .min_current_ma()
        .map_or(false, |current| current < limits::MAX_CHARGE_CURRENT_MA);
    if (over_discharge || over_charge) && !bmu.over_current {
        warn!(
            "over current through IVT: front={:?} mA rear={:?} mA",
            inputs.front.current_ma(),
            inputs.rear.current_ma()
        );
    }
    bmu.over_current = over_discharge || over_charge;

    let (over_v, under_v) = check_bounds(
        inputs.pack_voltages_mv(),
        limits::MAX_BATTERY_PACK_VOLTAGE_MV,
        limits::MIN_BATTERY_PACK_VOLTAGE_MV,
        limits::BATTERY_PACK_VOLTAGE_HYSTERESIS_MV,
        bmu.over_voltage_latch,
        bmu.under_voltage_latch,
    );
    if over_v && !bmu.over_voltage {
        warn!(
            "over voltage: front={:?} mV rear={:?} mV",
            inputs.front.voltage1_mv(),
            inputs.rear.voltage1_mv()
        );
    }
    if under_v && !bmu.under_voltage {
        warn!(
            "under voltage: front={:?} mV rear={:?} mV",
            inputs.front.voltage1_mv(),
            inputs.rear.voltage1_mv()
        );
    }
    bmu.over_voltage_latch = over_v;
    bmu.under_voltage_latch = under_v;
    bmu.over_voltage = over_v;
    bmu.under_voltage = under_v;

    let (over_t, under_t) = check_bounds(
        inputs.ivt_temperatures_deci_c(),
        limits::MAX_IVT_TEMPERATURE_DECI_C,
        limits::MIN_IVT_TEMPERATURE_DECI_C,
        limits::IVT_TEMPERATURE_HYSTERESIS_DECI_C,
        bmu.over_temperature_latch,
        bmu.under_temperature_latch,
    );
    if over_t && !bmu.over_temperature {
        warn!(
            "over temperature: front={:?} rear={:?} (deci-C)",
            inputs.front.temperature_deci_c(),
            inputs.rear.temperature_deci_c()
        );
    }
    if under_t && !bmu.under_temperature {
        warn!(
            "under temperature: front={:?} rear={:?} (deci-C)",
            inputs.front.temperature_deci_c(),
            inputs.rear.temperature_deci_c()
        );
    }
    bmu.over_temperature_latch = over_t;
    bmu.under_temperature_latch = under_t;
    bmu.over_temperature = over_t;
    bmu.under_temperature = under_t;
}

/**
 * @func update_status
 * @brief Aggregate the fault bits plus the cycle faults into error_flag,
 * derive safe_to_drive, and turn off the ignition demand when unsafe. The
 * previous demand is marked set so a fresh operator toggle is still
 * recognised after recovery.
 */
pub fn update_status(
    bmu: &mut SupervisorState,
    demands: &mut DemandInputs,
    ivt_stale: bool,
    precharge_timed_out: bool,
) {
    if ivt_stale {
        warn!("IVT timeout: no current frame inside {} ms", limits::IVT_TIMEOUT_MS);
    }
    bmu.error_flag = ivt_stale
        || precharge_timed_out
        || bmu.over_current
        || bmu.under_voltage
        || bmu.over_voltage
        || bmu.under_temperature
        || bmu.over_temperature;

    if bmu.error_flag {
        bmu.safe_to_drive = false;
        if demands.ignition_demand {
            demands.force_clear_ignition();
        }
    } else {
        bmu.safe_to_drive = true;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::can_extentions::prelude::CanCommand;
    use crate::ivt::{IvtChannel, Pack};
    use chrono::NaiveDate;

    fn at() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd(2022, 4, 1).and_hms(12, 0, 0)
    }

    fn inputs_with(channel: IvtChannel, front: i32, rear: i32) -> SampledInputs {
        let mut inputs = SampledInputs::new();
        inputs.apply(
            CanCommand::IvtReading {
                pack: Pack::Front,
                channel,
                value: front,
            },
            at(),
        );
        inputs.apply(
            CanCommand::IvtReading {
                pack: Pack::Rear,
                channel,
                value: rear,
            },
            at(),
        );
        inputs
    }

    #[test]
    fn no_data_no_value_faults() {
        /* Cold boot: nothing has reported, so nothing value-derived trips */
        let mut dut = SupervisorState::new();
        let inputs = SampledInputs::new();
        check_packs(&mut dut, &inputs);
        assert!(!dut.over_current);
        assert!(!dut.over_voltage);
        assert!(!dut.under_voltage);
        assert!(!dut.over_temperature);
        assert!(!dut.under_temperature);
        assert!(!dut.charging_state);
    }

    #[test]
    fn charging_needs_both_packs_negative() {
        let mut dut = SupervisorState::new();
        // max(-5000, 0) = 0, not charging
        check_packs(&mut dut, &inputs_with(IvtChannel::Current, -5_000, 0));
        assert!(!dut.charging_state);
        // both negative: charging
        check_packs(&mut dut, &inputs_with(IvtChannel::Current, -5_000, -1_000));
        assert!(dut.charging_state);
    }

    #[test]
    fn over_current_in_both_directions() {
        let mut dut = SupervisorState::new();
        check_packs(&mut dut, &inputs_with(IvtChannel::Current, 100_000, 0));
        assert!(dut.over_current);
        check_packs(&mut dut, &inputs_with(IvtChannel::Current, 0, -100_001));
        assert!(dut.over_current);
        check_packs(&mut dut, &inputs_with(IvtChannel::Current, 99_999, -100_000));
        assert!(!dut.over_current);
    }

    #[test]
    fn over_voltage_clears_only_below_the_band() {
        let mut dut = SupervisorState::new();
        check_packs(&mut dut, &inputs_with(IvtChannel::Voltage1, 67_200, 60_000));
        assert!(dut.over_voltage);
        // Back under the nominal limit but still inside the band: latched.
        check_packs(&mut dut, &inputs_with(IvtChannel::Voltage1, 67_039, 60_000));
        assert!(dut.over_voltage);
        // Below nominal - hysteresis: cleared.
        check_packs(&mut dut, &inputs_with(IvtChannel::Voltage1, 66_879, 60_000));
        assert!(!dut.over_voltage);
    }

    #[test]
    fn under_voltage_clears_only_above_the_band() {
        let mut dut = SupervisorState::new();
        check_packs(&mut dut, &inputs_with(IvtChannel::Voltage1, 60_000, 47_999));
        assert!(dut.under_voltage);
        check_packs(&mut dut, &inputs_with(IvtChannel::Voltage1, 60_000, 48_100));
        assert!(dut.under_voltage);
        check_packs(&mut dut, &inputs_with(IvtChannel::Voltage1, 60_000, 48_161));
        assert!(!dut.under_voltage);
    }

    #[test]
    fn temperature_band_in_tenths() {
        let mut dut = SupervisorState::new();
        // 75.1 C trips, 74.9 C holds inside the 1 C band, 73.9 C clears.
        check_packs(&mut dut, &inputs_with(IvtChannel::Temperature, 751, 300));
        assert!(dut.over_temperature);
        check_packs(&mut dut, &inputs_with(IvtChannel::Temperature, 749, 300));
        assert!(dut.over_temperature);
        check_packs(&mut dut, &inputs_with(IvtChannel::Temperature, 739, 300));
        assert!(!dut.over_temperature);
    }

    #[test]
    fn status_frame_bit_layout() {
        let mut dut = SupervisorState::new();
        dut.over_current = true;
        dut.safe_to_drive = true;
        dut.charging_state = true;
        dut.precharge_state = true;
        dut.fan2_state = 0x7F;
        let frame = dut.status_frame();
        assert_eq!(frame[0], 0b0010_0001);
        assert_eq!(frame[1], 0b0000_0011);
        assert_eq!(frame, [0x21, 0x03, 0x00, 0x7F, 0x00, 0x00]);
    }

    #[test]
    fn error_clears_ignition_and_preserves_rearm() {
        let mut dut = SupervisorState::new();
        let mut demands = DemandInputs::new();
        demands.update(true, false);
        dut.over_current = true;
        update_status(&mut dut, &mut demands, false, false);
        assert!(dut.error_flag);
        assert!(!dut.safe_to_drive);
        assert!(!demands.ignition_demand);
        assert!(demands.previous_ignition_demand);
        assert_eq!(dut.status_frame()[0], 0x01);
    }

    #[test]
    fn stale_ivt_is_an_error_without_status_bits() {
        let mut dut = SupervisorState::new();
        let mut demands = DemandInputs::new();
        update_status(&mut dut, &mut demands, true, false);
        assert!(dut.error_flag);
        assert!(!dut.safe_to_drive);
        // Bits 0..=4 are value-derived and stay clear.
        assert_eq!(dut.status_frame()[0], 0x00);
    }

    #[test]
    fn all_clear_is_safe() {
        let mut dut = SupervisorState::new();
        let mut demands = DemandInputs::new();
        update_status(&mut dut, &mut demands, false, false);
        assert!(!dut.error_flag);
        assert!(dut.safe_to_drive);
        assert_eq!(dut.status_frame()[0], 0x20);
    }
}
