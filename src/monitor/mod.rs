pub mod cli;
pub mod config;
pub mod monitor;
pub mod service_handle;

pub use cli::{run_cli, Cli};
pub use config::{FileConfig, MonitorConfig};
pub use monitor::Monitor;
pub use service_handle::ServiceHandle;
