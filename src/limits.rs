// Variable naming scheme:
// limits ending in _MV / _MA / _DECI_C are compared against raw IVT readings
// (millivolts, milliamperes, tenths of a degree Celsius); timing constants
// carry the unit in the name.

// Each battery pack is 16S48P, so max_voltage = 4.19 V * 16 = 67.04 V and
// under_voltage = 3.00 V * 16 = 48 V.
pub const MAX_BATTERY_PACK_VOLTAGE_MV: i32 = 67_040;
pub const MIN_BATTERY_PACK_VOLTAGE_MV: i32 = 48_000;
pub const BATTERY_PACK_VOLTAGE_HYSTERESIS_MV: i32 = 160;

// The IVT reports temperature in tenths of a degree.
pub const MAX_IVT_TEMPERATURE_DECI_C: i32 = 750;
pub const MIN_IVT_TEMPERATURE_DECI_C: i32 = 20;
pub const IVT_TEMPERATURE_HYSTERESIS_DECI_C: i32 = 10;

// Discharge current is positive, charge current negative.
pub const MAX_DISCHARGE_CURRENT_MA: i32 = 100_000;
pub const MAX_CHARGE_CURRENT_MA: i32 = -100_000;

// A current frame from either IVT must arrive inside this window.
pub const IVT_TIMEOUT_MS: i64 = 1_000;

// Bound on a single CAN transmit completing.
pub const CAN_TIMEOUT_MS: u64 = 100;

// Precharge/discharge sequencing.
pub const PRECHARGE_SETTLE_MS: u64 = 500;
pub const PRECHARGE_DETECT_TIMEOUT_MS: u64 = 5_000;
pub const CONTACTOR_SETTLE_MS: u64 = 100;

pub const HEARTBEAT_PERIOD_MS: u64 = 1_000;

// Settle between consecutive IVT configuration frames.
pub const IVT_CONFIG_SETTLE_US: u64 = 50;
