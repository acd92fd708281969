use chrono::NaiveDateTime;

/// Which battery pack an IVT frame came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pack {
    Front,
    Rear,
}

/// Measurement channels the IVT reports after configuration. Voltage-2/3
/// never appear here: their arrival means the IVT rebooted and is handled as
/// a reconfigure request rather than a reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IvtChannel {
    Current,
    Voltage1,
    Temperature,
    Power,
    Charge,
    Energy,
}

/// A raw IVT scalar stamped with its arrival time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    pub value: i32,
    pub at: NaiveDateTime,
}

// All readings are optional: a pack that has never reported must not trip
// the value-derived fault checks.
#[derive(Clone, Copy, Debug, Default)]
pub struct IvtSample {
    pub current: Option<Reading>,
    pub voltage1: Option<Reading>,
    pub temperature: Option<Reading>,
    pub power: Option<Reading>,
    pub charge: Option<Reading>,
    pub energy: Option<Reading>,
}

impl IvtSample {
    pub fn new() -> IvtSample {
        IvtSample::default()
    }

    pub fn apply(&mut self, channel: IvtChannel, value: i32, at: NaiveDateTime) {
        let reading = Some(Reading { value, at });
        match channel {
            IvtChannel::Current => self.current = reading,
            IvtChannel::Voltage1 => self.voltage1 = reading,
            IvtChannel::Temperature => self.temperature = reading,
            IvtChannel::Power => self.power = reading,
            IvtChannel::Charge => self.charge = reading,
            IvtChannel::Energy => self.energy = reading,
        }
    }

    pub fn current_ma(&self) -> Option<i32> {
        self.current.map(|r| r.value)
    }

    pub fn voltage1_mv(&self) -> Option<i32> {
        self.voltage1.map(|r| r.value)
    }

    pub fn temperature_deci_c(&self) -> Option<i32> {
        self.temperature.map(|r| r.value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn at(ms: i64) -> NaiveDateTime {
        NaiveDate::from_ymd(2022, 4, 1).and_hms(12, 0, 0) + chrono::Duration::milliseconds(ms)
    }

    #[test]
    fn apply_overwrites_and_restamps() {
        let mut dut = IvtSample::new();
        dut.apply(IvtChannel::Current, -5_000, at(0));
        dut.apply(IvtChannel::Current, 1_200, at(50));
        assert_eq!(dut.current_ma(), Some(1_200));
        assert_eq!(dut.current.unwrap().at, at(50));
        assert_eq!(dut.voltage1_mv(), None);
    }
}
