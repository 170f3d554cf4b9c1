mod interface;
mod interface_addrs;
mod private_ip;
mod resolver;

pub use interface::*;
pub use interface_addrs::*;
pub use private_ip::*;
pub use resolver::*;
