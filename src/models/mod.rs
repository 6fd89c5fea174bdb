pub mod cv;
pub mod job;
pub mod notification;
