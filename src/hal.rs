/**
 * @brief Hardware seam for the supervisor.
 *
 * The relay drivers, the precharge detect input and the status LEDs live on
 * the HV box wiring loom; the supervisor only ever talks to them through
 * these traits so the whole safety core can run against recorded mocks on a
 * host.
 */

pub trait ContactorIo {
    /// Close (true) or open (false) the precharge relay.
    fn set_precharge_enable(&mut self, closed: bool);
    /// Assert (true) to hold the discharge relay open; clearing it lets the
    /// discharge resistor drain the HV capacitor bank.
    fn set_discharge_disable(&mut self, open: bool);
    /// Close (true) or open (false) the main HV box contactor.
    fn set_hvdc_enable(&mut self, closed: bool);
    /// Active high once the DC bus is up to pack voltage.
    fn precharge_detect(&self) -> bool;
}

pub trait SolarOutput {
    fn set_solar_enable(&mut self, on: bool);
}

pub trait StatusLeds {
    fn set_safe_indicator(&mut self, on: bool);
    fn set_contactor_indicator(&mut self, on: bool);
    fn set_solar_indicator(&mut self, on: bool);
    fn set_charge_indicator(&mut self, on: bool);
}

pub mod bench {
    use super::{ContactorIo, SolarOutput, StatusLeds};
    use log::info;

    /**
     * @brief Bench rig I/O: logs relay transitions instead of driving pins.
     *
     * On the bench the detect line is strapped high so precharge sequences
     * complete without the HV bank present.
     */
    pub struct BenchIo {
        prechg_enable: bool,
        dischg_disable: bool,
        hvdc_enable: bool,
        solar_enable: bool,
        detect_level: bool,
    }

    impl BenchIo {
        pub fn new() -> BenchIo {
            BenchIo {
                prechg_enable: false,
                dischg_disable: false,
                hvdc_enable: false,
                solar_enable: false,
                detect_level: true,
            }
        }
    }

    impl ContactorIo for BenchIo {
        fn set_precharge_enable(&mut self, closed: bool) {
            if self.prechg_enable != closed {
                info!("prechg_enable -> {}", closed as u8);
            }
            self.prechg_enable = closed;
        }

        fn set_discharge_disable(&mut self, open: bool) {
            if self.dischg_disable != open {
                info!("dischg_disable -> {}", open as u8);
            }
            self.dischg_disable = open;
        }

        fn set_hvdc_enable(&mut self, closed: bool) {
            if self.hvdc_enable != closed {
                info!("hvdc_enable -> {}", closed as u8);
            }
            self.hvdc_enable = closed;
        }

        fn precharge_detect(&self) -> bool {
            self.detect_level
        }
    }

    impl SolarOutput for BenchIo {
        fn set_solar_enable(&mut self, on: bool) {
            if self.solar_enable != on {
                info!("solar_enable -> {}", on as u8);
            }
            self.solar_enable = on;
        }
    }

    impl StatusLeds for BenchIo {
        fn set_safe_indicator(&mut self, _on: bool) {}
        fn set_contactor_indicator(&mut self, _on: bool) {}
        fn set_solar_indicator(&mut self, _on: bool) {}
        fn set_charge_indicator(&mut self, _on: bool) {}
    }
}
