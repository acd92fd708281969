mod frame_handler;

pub use frame_handler::FrameHandler;
