#[derive(Debug)]
pub enum Error {
    CanSocketError(crate::can_extentions::prelude::CanError),
    WorkerChannelClosed,
    BusChannelClosed,
}

impl From<crate::can_extentions::prelude::CanError> for Error {
    fn from(error: crate::can_extentions::prelude::CanError) -> Error {
        Error::CanSocketError(error)
    }
}
