//! Event notifications: the due-event query, message text and the tick loop.

mod notification;
mod ticker;

pub use notification::*;
pub use ticker::*;
