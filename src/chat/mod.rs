pub mod context;
pub mod gateway;

pub use context::build_study_context;
pub use gateway::{ask, GatewayConfig, GatewayError};
