mod blocks;
mod event;
mod raw;

pub use event::{Event, Iter, StrRange};
pub use raw::Toggles;
