pub mod client;
pub mod codec;

pub use client::{run_sensor_client, ClientError, Connection};
pub use codec::FrameError;
