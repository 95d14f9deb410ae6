pub mod chat;
pub mod sensors;
