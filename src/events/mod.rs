pub mod controls;
pub mod keyboard;
pub mod pointer;

pub use controls::{wire_controls, wire_lifecycle};
pub use keyboard::wire_keyboard;
pub use pointer::wire_pointer_handlers;
