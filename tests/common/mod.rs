use bmu::hal::{ContactorIo, SolarOutput, StatusLeds};

/// Recorded pin state standing in for the HV box wiring loom.
pub struct MockIo {
    pub prechg_enable: bool,
    pub dischg_disable: bool,
    pub hvdc_enable: bool,
    pub solar_enable: bool,
    pub detect: bool,
    pub safe_led: bool,
    pub contactor_led: bool,
    pub solar_led: bool,
    pub charge_led: bool,
}

impl MockIo {
    pub fn new() -> MockIo {
        MockIo {
            prechg_enable: false,
            dischg_disable: false,
            hvdc_enable: false,
            solar_enable: false,
            detect: false,
            safe_led: false,
            contactor_led: false,
            solar_led: false,
            charge_led: false,
        }
    }
}

impl ContactorIo for MockIo {
    fn set_precharge_enable(&mut self, closed: bool) {
        self.prechg_enable = closed;
    }
    fn set_discharge_disable(&mut self, open: bool) {
        self.dischg_disable = open;
    }
    fn set_hvdc_enable(&mut self, closed: bool) {
        self.hvdc_enable = closed;
    }
    fn precharge_detect(&self) -> bool {
        self.detect
    }
}

impl SolarOutput for MockIo {
    fn set_solar_enable(&mut self, on: bool) {
        self.solar_enable = on;
    }
}

impl StatusLeds for MockIo {
    fn set_safe_indicator(&mut self, on: bool) {
        self.safe_led = on;
    }
    fn set_contactor_indicator(&mut self, on: bool) {
        self.contactor_led = on;
    }
    fn set_solar_indicator(&mut self, on: bool) {
        self.solar_led = on;
    }
    fn set_charge_indicator(&mut self, on: bool) {
        self.charge_led = on;
    }
}
