pub mod conversation;
pub mod message;
pub mod sensor_metric;
