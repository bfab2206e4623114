pub mod network;

pub use network::MimirNet;
