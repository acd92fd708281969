use crate::can_extentions::prelude::CanCommand;
use crate::ivt::IvtSample;
use chrono::NaiveDateTime;

pub const CELL_COUNT: usize = 32;
pub const CELL_TEMPERATURE_ROWS: usize = 2;

/// Cell voltages in units of 100 uV, addressed by contiguous cell index.
/// Ingested so the packs are observable over debug, not consulted by the
/// safety policy.
#[derive(Clone, Copy, Debug)]
pub struct CellVoltages {
    cells: [u16; CELL_COUNT],
}

impl CellVoltages {
    pub fn new() -> CellVoltages {
        CellVoltages {
            cells: [0; CELL_COUNT],
        }
    }

    pub fn apply_group(&mut self, first_cell: usize, volts: &[u16; 4]) {
        for (i, v) in volts.iter().enumerate() {
            if let Some(cell) = self.cells.get_mut(first_cell + i) {
                *cell = *v;
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<u16> {
        self.cells.get(index).copied()
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.cells
    }
}

/// Raw cell temperature bytes, one row per PCU reporting frame.
#[derive(Clone, Copy, Debug)]
pub struct CellTemperatures {
    rows: [[u8; 8]; CELL_TEMPERATURE_ROWS],
}

impl CellTemperatures {
    pub fn new() -> CellTemperatures {
        CellTemperatures {
            rows: [[0; 8]; CELL_TEMPERATURE_ROWS],
        }
    }

    pub fn apply_row(&mut self, row: usize, bytes: &[u8; 8]) {
        if let Some(stored) = self.rows.get_mut(row) {
            *stored = *bytes;
        }
    }

    pub fn row(&self, row: usize) -> Option<&[u8; 8]> {
        self.rows.get(row)
    }
}

/// Operator demand bits latched from the driver controls frame.
///
/// previous_ignition_demand holds the prior stable value and is only moved
/// when the decoded bit differs from the current one, so the engage guard
/// (ignition && !previous) keeps holding across repeated frames while
/// driving.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DemandInputs {
    pub ignition_demand: bool,
    pub previous_ignition_demand: bool,
    pub solar_demand: bool,
}

impl DemandInputs {
    pub fn new() -> DemandInputs {
        DemandInputs {
            ignition_demand: false,
            previous_ignition_demand: false,
            solar_demand: false,
        }
    }

    pub fn update(&mut self, ignition: bool, solar: bool) {
        if self.ignition_demand != ignition {
            self.previous_ignition_demand = self.ignition_demand;
            self.ignition_demand = ignition;
        }
        self.solar_demand = solar;
    }

    /// Fault response: drop the ignition demand but mark the previous value
    /// set, so only a fresh off->on toggle from the operator re-arms.
    pub fn force_clear_ignition(&mut self) {
        self.ignition_demand = false;
        self.previous_ignition_demand = true;
    }

    pub fn engage_requested(&self) -> bool {
        self.ignition_demand && !self.previous_ignition_demand
    }
}

/// Everything the bus tells us, in one place. Written only by the
/// supervisor loop applying decoded commands (plus the forced ignition
/// clear); read by the evaluator and the sequencer.
pub struct SampledInputs {
    pub front: IvtSample,
    pub rear: IvtSample,
    pub cell_voltages: CellVoltages,
    pub cell_temperatures: CellTemperatures,
    pub demands: DemandInputs,
}

impl SampledInputs {
    pub fn new() -> SampledInputs {
        SampledInputs {
            front: IvtSample::new(),
            rear: IvtSample::new(),
            cell_voltages: CellVoltages::new(),
            cell_temperatures: CellTemperatures::new(),
            demands: DemandInputs::new(),
        }
    }

    pub fn apply(&mut self, command: CanCommand, at: NaiveDateTime) {
        match command {
            CanCommand::CellVoltageGroup { first_cell, volts } => {
                self.cell_voltages.apply_group(first_cell, &volts);
            }
            CanCommand::DriverControls { ignition, solar } => {
                self.demands.update(ignition, solar);
            }
            CanCommand::IvtReading {
                pack,
                channel,
                value,
            } => {
                self.pack_mut(pack).apply(channel, value, at);
            }
            CanCommand::CellTemperatureRow { row, bytes } => {
                self.cell_temperatures.apply_row(row, &bytes);
            }
            // Reconfiguration is the supervisor loop's concern; unknown IDs
            // are silently discarded.
            CanCommand::IvtUnexpectedChannel(_) | CanCommand::Unknown(_) => {}
        }
    }

    fn pack_mut(&mut self, pack: crate::ivt::Pack) -> &mut IvtSample {
        match pack {
            crate::ivt::Pack::Front => &mut self.front,
            crate::ivt::Pack::Rear => &mut self.rear,
        }
    }

    /// Larger of the two pack currents, over the packs that have reported.
    pub fn max_current_ma(&self) -> Option<i32> {
        max_option(self.front.current_ma(), self.rear.current_ma())
    }

    /// Smaller of the two pack currents, over the packs that have reported.
    pub fn min_current_ma(&self) -> Option<i32> {
        min_option(self.front.current_ma(), self.rear.current_ma())
    }

    pub fn pack_voltages_mv(&self) -> impl Iterator<Item = i32> {
        self.front
            .voltage1_mv()
            .into_iter()
            .chain(self.rear.voltage1_mv())
    }

    pub fn ivt_temperatures_deci_c(&self) -> impl Iterator<Item = i32> {
        self.front
            .temperature_deci_c()
            .into_iter()
            .chain(self.rear.temperature_deci_c())
    }
}

fn max_option(a: Option<i32>, b: Option<i32>) -> Option<i32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

fn min_option(a: Option<i32>, b: Option<i32>) -> Option<i32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ivt::{IvtChannel, Pack};
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd(2022, 4, 1).and_hms(12, 0, 0)
    }

    #[test]
    fn ignition_edge_tracking() {
        let mut dut = DemandInputs::new();
        dut.update(true, false);
        assert!(dut.engage_requested());
        // Repeated frames with the same bit keep the edge visible.
        dut.update(true, false);
        assert!(dut.engage_requested());
        dut.update(false, false);
        assert!(!dut.engage_requested());
        assert!(dut.previous_ignition_demand);
    }

    #[test]
    fn forced_clear_preserves_rearm() {
        let mut dut = DemandInputs::new();
        dut.update(true, false);
        dut.force_clear_ignition();
        assert!(!dut.ignition_demand);
        assert!(dut.previous_ignition_demand);
        assert!(!dut.engage_requested());
        // Operator toggles off then on again.
        dut.update(false, false);
        dut.update(true, false);
        assert!(dut.engage_requested());
    }

    #[test]
    fn current_extremes_ignore_silent_packs() {
        let mut dut = SampledInputs::new();
        assert_eq!(dut.max_current_ma(), None);
        dut.apply(
            CanCommand::IvtReading {
                pack: Pack::Front,
                channel: IvtChannel::Current,
                value: -5_000,
            },
            at(),
        );
        assert_eq!(dut.max_current_ma(), Some(-5_000));
        assert_eq!(dut.min_current_ma(), Some(-5_000));
        dut.apply(
            CanCommand::IvtReading {
                pack: Pack::Rear,
                channel: IvtChannel::Current,
                value: 0,
            },
            at(),
        );
        assert_eq!(dut.max_current_ma(), Some(0));
        assert_eq!(dut.min_current_ma(), Some(-5_000));
    }

    #[test]
    fn cell_voltage_group_out_of_range_is_ignored() {
        let mut dut = CellVoltages::new();
        dut.apply_group(30, &[1, 2, 3, 4]);
        assert_eq!(dut.get(30), Some(1));
        assert_eq!(dut.get(31), Some(2));
        assert_eq!(dut.get(32), None);
    }

    #[test]
    fn cell_monitoring_is_ingested_and_observable() {
        let mut dut = SampledInputs::new();
        dut.apply(
            CanCommand::CellVoltageGroup {
                first_cell: 0,
                volts: [41_900, 41_800, 41_700, 41_600],
            },
            at(),
        );
        dut.apply(
            CanCommand::CellTemperatureRow {
                row: 1,
                bytes: [20, 21, 22, 23, 24, 25, 26, 27],
            },
            at(),
        );
        assert_eq!(dut.cell_voltages.as_slice()[..4], [41_900, 41_800, 41_700, 41_600]);
        assert_eq!(dut.cell_temperatures.row(1), Some(&[20, 21, 22, 23, 24, 25, 26, 27]));
        assert_eq!(dut.cell_temperatures.row(2), None);
    }
}
