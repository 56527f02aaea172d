pub mod blink;
pub mod choreographer;
pub mod rank;
pub mod timeline;
