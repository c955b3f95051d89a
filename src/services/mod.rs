pub mod metrics;
pub mod queue;
pub mod secrets;
pub mod storage;
