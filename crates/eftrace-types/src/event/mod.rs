pub mod event;
pub mod fields;
pub mod kind;

pub use event::*;
pub use fields::*;
pub use kind::*;
