/**
 * @brief IVT configuration sequence.
 *
 * One broadcast to 0x411 configures both IVTs: STOP, eight channel setup
 * words, START. U2 and U3 are programmed off (flag byte 0x00); their result
 * frames therefore only appear when an IVT has rebooted into its defaults,
 * which is the trigger to run this sequence again. Re-issuing the sequence
 * at any point leaves the IVTs in the same operating configuration.
 */

// Mode words: byte 1 of START selects cyclic transmission, byte 2 latches it.
const STOP_MODE: [u8; 5] = [0x34, 0x00, 0x00, 0x00, 0x00];
const START_MODE: [u8; 5] = [0x34, 0x01, 0x01, 0x00, 0x00];

// Channel setup words: mux byte, flag byte (0x02 = cyclic, 0x00 = off),
// cycle time in ms. Current reports every 25 ms, everything else every 1 s.
const CURRENT_SETUP: [u8; 4] = [0x20, 0x02, 0x00, 0x19];
const VOLTAGE1_SETUP: [u8; 4] = [0x21, 0x02, 0x03, 0xE8];
const VOLTAGE2_SETUP: [u8; 4] = [0x22, 0x00, 0x03, 0xE8];
const VOLTAGE3_SETUP: [u8; 4] = [0x23, 0x00, 0x03, 0xE8];
const TEMPERATURE_SETUP: [u8; 4] = [0x24, 0x02, 0x03, 0xE8];
const CHARGE_SETUP: [u8; 4] = [0x25, 0x02, 0x03, 0xE8];
const POWER_SETUP: [u8; 4] = [0x26, 0x02, 0x03, 0xE8];
const ENERGY_SETUP: [u8; 4] = [0x27, 0x02, 0x03, 0xE8];

/// The ten payloads, in transmission order. Each frame must be followed by
/// an IVT_CONFIG_SETTLE_US pause before the next goes out.
pub fn config_payloads() -> [&'static [u8]; 10] {
    [
        &STOP_MODE,
        &CURRENT_SETUP,
        &VOLTAGE1_SETUP,
        &VOLTAGE2_SETUP,
        &VOLTAGE3_SETUP,
        &TEMPERATURE_SETUP,
        &CHARGE_SETUP,
        &POWER_SETUP,
        &ENERGY_SETUP,
        &START_MODE,
    ]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sequence_is_stop_setups_start() {
        let payloads = config_payloads();
        assert_eq!(payloads.len(), 10);
        assert_eq!(payloads[0], &[0x34, 0x00, 0x00, 0x00, 0x00][..]);
        assert_eq!(payloads[9], &[0x34, 0x01, 0x01, 0x00, 0x00][..]);
        // The eight setup words walk the mux bytes 0x20..=0x27 in order.
        for (i, payload) in payloads[1..9].iter().enumerate() {
            assert_eq!(payload.len(), 4);
            assert_eq!(payload[0], 0x20 + i as u8);
        }
    }

    #[test]
    fn only_u2_u3_are_programmed_off() {
        let payloads = config_payloads();
        for payload in payloads[1..9].iter() {
            let expected_flag = match payload[0] {
                0x22 | 0x23 => 0x00,
                _ => 0x02,
            };
            assert_eq!(payload[1], expected_flag);
        }
    }

    #[test]
    fn current_channel_reports_fastest() {
        let payloads = config_payloads();
        assert_eq!(payloads[1], &[0x20, 0x02, 0x00, 0x19][..]);
    }
}
