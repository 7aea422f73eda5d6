pub mod alerts;
pub mod billing;
pub mod board;
pub mod conflict;
pub mod maintenance;
pub mod stats;
