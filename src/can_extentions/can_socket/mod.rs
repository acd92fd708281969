mod bmu_can;

pub use bmu_can::BmuCanSocket;
