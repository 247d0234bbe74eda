pub mod analyze;
pub mod generate;
pub mod init;
pub mod watch;

pub use analyze::analyze_command;
pub use generate::generate_command;
pub use init::init_command;
pub use watch::watch_command;
