pub mod desk;

pub use desk::DeskMode;
