pub mod cli;
pub mod generator;
pub mod packages;
pub mod platform;

pub use generator::EnvironmentDescriptor;
pub use platform::Platform;
