pub mod cors;
pub mod refresh_throttle;
