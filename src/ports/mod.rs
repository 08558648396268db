//! Port traits decoupling the domain from message transport, configuration,
//! and export targets.

pub mod config_port;
pub mod export_port;
pub mod message_source;
