pub mod import;
pub mod logging;
pub mod serve;
pub mod store;
