pub mod aws;
pub mod logging;
pub mod shutdown;
