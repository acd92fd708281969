/**
 * @Trait BmuCanSocket
 * @brief A CANSocket extention which implements the BMU's outbound frames:
 * the heartbeat, the contactor command, and the IVT configuration words.
 *
 * Sends rely on the socket's write timeout (set up by the CAN worker) so a
 * wedged transceiver costs at most CAN_TIMEOUT_MS per frame.
 */
use super::super::can_ids;
use super::super::error::CanError as Error;
use socketcan::{CANFrame, CANSocket};

pub trait BmuCanSocket {
    fn send_heartbeat(&self, status: &[u8; 6]) -> Result<(), Error>;
    fn send_contactor_command(&self, engaged: bool) -> Result<(), Error>;
    fn send_ivt_config_frame(&self, payload: &[u8]) -> Result<(), Error>;
}

impl BmuCanSocket for CANSocket {
    fn send_heartbeat(&self, status: &[u8; 6]) -> Result<(), Error> {
        self.write_frame(&CANFrame::new(can_ids::BMU_HEARTBEAT, status, false, false)?)
            .map_err(Error::WriteError)
    }

    fn send_contactor_command(&self, engaged: bool) -> Result<(), Error> {
        let command = [if engaged { 0x01 } else { 0x00 }];
        self.write_frame(&CANFrame::new(
            can_ids::CONTACTOR_COMMAND,
            &command,
            false,
            false,
        )?)
        .map_err(Error::WriteError)
    }

    fn send_ivt_config_frame(&self, payload: &[u8]) -> Result<(), Error> {
        self.write_frame(&CANFrame::new(can_ids::IVT_COMMAND, payload, false, false)?)
            .map_err(Error::WriteError)
    }
}
