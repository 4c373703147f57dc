//! Core system components for robot operation
pub mod alert;
pub mod debounce;
pub mod drive_command;
pub mod event;
pub mod fault;
pub mod line;
pub mod quadrature;
#[cfg(not(test))]
pub mod resources;
pub mod state;
pub mod steering;
