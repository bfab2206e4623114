pub mod error;
pub mod math;
pub mod layers;
pub mod network;
pub mod loss;
pub mod train;

// Convenience re-exports
pub use error::NetError;
pub use math::matrix::Matrix;
pub use layers::dense::Layer;
pub use network::network::MimirNet;
pub use loss::mse::MseLoss;
pub use train::trainer::train_samples;
