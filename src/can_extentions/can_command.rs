use crate::ivt::{IvtChannel, Pack};

// This is the full set of frames the BMU reacts to. The inbound half of the
// CAN protocol is owned by the PCUs, the IVTs and the driver controls board;
// everything else on the bus decodes to Unknown and is dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CanCommand {
    /// Four consecutive cell voltages (units of 100 uV) starting at
    /// `first_cell`.
    CellVoltageGroup { first_cell: usize, volts: [u16; 4] },
    /// Ignition and solar demand bits from the driver controls board.
    DriverControls { ignition: bool, solar: bool },
    /// One configured IVT scalar.
    IvtReading { pack: Pack, channel: IvtChannel, value: i32 },
    /// A voltage-2/3 frame: the IVT rebooted and must be reconfigured.
    IvtUnexpectedChannel(Pack),
    /// Eight raw temperature bytes for one row of the cell matrix.
    CellTemperatureRow { row: usize, bytes: [u8; 8] },
    Unknown(u32), // Arbitration ID kept for debugging purposes
}
