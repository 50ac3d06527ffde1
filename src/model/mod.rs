pub mod attendance;
pub mod department;
pub mod navigation;
pub mod role;
pub mod user;
