mod config_gen;
mod lookup;
mod suspend;

pub use config_gen::config_generate;
pub use lookup::lookup_ip;
pub use suspend::suspend_account;
