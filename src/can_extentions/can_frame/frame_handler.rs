use super::super::can_command::CanCommand;
use super::super::can_ids;
use crate::ivt::{IvtChannel, Pack};
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/**
 *
 * CAN FRAME HANDLER
 *
 * Functions for decoding a Can Frame. Decoding has no side effects; the
 * supervisor loop owns applying the result to the sampled state.
 */
pub trait FrameHandler {
    fn get_command(&self) -> CanCommand;
}

impl FrameHandler for socketcan::CANFrame {
    fn get_command(&self) -> CanCommand {
        let id = self.id();
        let data = self.data();

        match id {
            can_ids::CELL_VOLTAGES_BASE..=can_ids::CELL_VOLTAGES_LAST => {
                get_cell_voltage_group(id, data)
            }
            can_ids::DRIVER_CONTROLS => get_driver_controls(id, data),
            can_ids::FRONT_IVT_BASE..=can_ids::FRONT_IVT_LAST => {
                get_ivt_reading(Pack::Front, id, id - can_ids::FRONT_IVT_BASE, data)
            }
            can_ids::REAR_IVT_BASE..=can_ids::REAR_IVT_LAST => {
                get_ivt_reading(Pack::Rear, id, id - can_ids::REAR_IVT_BASE, data)
            }
            can_ids::CELL_TEMPERATURES_ROW0 => get_cell_temperature_row(0, id, data),
            can_ids::CELL_TEMPERATURES_ROW1 => get_cell_temperature_row(1, id, data),
            id => CanCommand::Unknown(id),
        }
    }
}

/**
 * @func get_cell_voltage_group
 * @brief A PCU cell voltage frame carries four little-endian u16 readings;
 * the arbitration ID selects which block of four cells they belong to.
 */
fn get_cell_voltage_group(id: u32, data: &[u8]) -> CanCommand {
    if data.len() < 8 {
        return CanCommand::Unknown(id);
    }
    let first_cell = ((id - can_ids::CELL_VOLTAGES_BASE) * 4) as usize;
    let mut volts = [0u16; 4];
    for (i, v) in volts.iter_mut().enumerate() {
        *v = LittleEndian::read_u16(&data[i * 2..i * 2 + 2]);
    }
    CanCommand::CellVoltageGroup { first_cell, volts }
}

/**
 * @func get_driver_controls
 * @brief Only the first byte is checked regardless of how many bytes the
 * driver controls board sends, so the frame can grow fields without
 * breaking the BMU.
 */
fn get_driver_controls(id: u32, data: &[u8]) -> CanCommand {
    if data.is_empty() {
        return CanCommand::Unknown(id);
    }
    CanCommand::DriverControls {
        ignition: data[0] & 0x01 != 0,
        solar: data[0] & 0x08 != 0,
    }
}

/**
 * @func get_ivt_reading
 * @brief IVT result frames put a signed 32-bit value in bytes 2..6 with the
 * MSB first. Offsets 2 and 3 are the U2/U3 channels the BMU configures off;
 * seeing one means the IVT restarted with its defaults.
 */
fn get_ivt_reading(pack: Pack, id: u32, offset: u32, data: &[u8]) -> CanCommand {
    let channel = match offset {
        0 => IvtChannel::Current,
        1 => IvtChannel::Voltage1,
        2 | 3 => return CanCommand::IvtUnexpectedChannel(pack),
        4 => IvtChannel::Temperature,
        5 => IvtChannel::Power,
        6 => IvtChannel::Charge,
        _ => IvtChannel::Energy,
    };
    if data.len() < 6 {
        return CanCommand::Unknown(id);
    }
    CanCommand::IvtReading {
        pack,
        channel,
        value: BigEndian::read_i32(&data[2..6]),
    }
}

fn get_cell_temperature_row(row: usize, id: u32, data: &[u8]) -> CanCommand {
    if data.len() < 8 {
        return CanCommand::Unknown(id);
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[..8]);
    CanCommand::CellTemperatureRow { row, bytes }
}
