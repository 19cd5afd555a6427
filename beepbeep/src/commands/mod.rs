pub mod config_cmd;
pub mod scan;
pub mod update_check;
pub mod watch;
