mod can_frame;
mod can_socket;
mod can_command;
mod error;
pub mod ivt_config;
use error::CanError as Error;

/**
 * CAN IDs
 *
 * This section should be kept in line with the HV bus allocation sheet.
 * 0x5n0..0x5n7 are the IVT result frames; the per-channel offsets match the
 * IVT-S mux bytes used in ivt_config.
 */
pub mod can_ids {
    pub const BMU_HEARTBEAT: u32 = 0x400;
    pub const CONTACTOR_COMMAND: u32 = 0x34F;
    // One command frame configures both IVTs; their result IDs stay distinct.
    pub const IVT_COMMAND: u32 = 0x411;
    pub const DRIVER_CONTROLS: u32 = 0x500;
    pub const CELL_VOLTAGES_BASE: u32 = 0x360;
    pub const CELL_VOLTAGES_LAST: u32 = 0x367;
    pub const FRONT_IVT_BASE: u32 = 0x520;
    pub const FRONT_IVT_LAST: u32 = 0x527;
    pub const REAR_IVT_BASE: u32 = 0x530;
    pub const REAR_IVT_LAST: u32 = 0x537;
    pub const CELL_TEMPERATURES_ROW0: u32 = 0x550;
    pub const CELL_TEMPERATURES_ROW1: u32 = 0x562;
}

//* Helper function for opening a can socket
pub fn open_socket<'a, S>(interface: S) -> Result<socketcan::CANSocket, Error>
where
    S: Into<&'a str>,
{
    Ok(socketcan::CANSocket::open(interface.into())?)
}

/**
 * Traits and Error Types defined by can_extentions
 */
pub mod prelude {
    pub use super::can_command::CanCommand;
    pub use super::can_frame::FrameHandler;
    pub use super::can_socket::BmuCanSocket;
    pub use super::error::CanError;
}
