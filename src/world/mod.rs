pub mod position;
pub mod region;
pub mod replication;
pub mod state;
