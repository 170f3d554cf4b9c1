mod id;
mod pack;

pub use id::*;
