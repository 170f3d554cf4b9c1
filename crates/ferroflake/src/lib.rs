#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod codec;
mod config;
mod error;
mod generator;
mod machine;
mod time;

pub use crate::codec::*;
pub use crate::config::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::machine::*;
pub use crate::time::*;
