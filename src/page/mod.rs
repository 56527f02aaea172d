pub mod memory;
pub mod observer;
