pub mod client;
pub mod message;

pub use client::{CloudinaryHttpClient, HttpConnector};
pub use message::remote_message;
