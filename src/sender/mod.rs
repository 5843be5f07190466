pub mod client;
pub mod transmission;

pub use client::{DeliveryError, HttpClient, SenderConfig};
pub use transmission::{DeliveryResult, Sender};
