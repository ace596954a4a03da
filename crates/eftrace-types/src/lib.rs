pub mod entity;
pub mod event;
pub mod log_type;
pub mod result;
mod util;

pub use entity::*;
pub use event::*;
pub use log_type::*;
pub use result::*;
pub use util::*;
