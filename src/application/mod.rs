pub mod arbiter;
pub mod poller;
pub mod resolver;
pub mod store;
