mod mutex;
mod sonyflake;

pub use mutex::*;
pub use sonyflake::*;
