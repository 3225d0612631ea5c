pub mod detector;
pub mod notify;
pub mod poller;
pub mod scheduler;
pub mod session;
