pub mod messages;
mod can;
mod ticker;

pub use can::{CanManager, CanWorkerInitializer};
pub use ticker::TickerManager;
