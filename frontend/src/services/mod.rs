pub mod config;
pub mod dom;
pub mod logging;

pub use config::app_config;
pub use logging::Logger;
