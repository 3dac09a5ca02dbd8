pub mod health;
pub mod node_monitor;
