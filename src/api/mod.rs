pub mod attendance;
pub mod navigation;
