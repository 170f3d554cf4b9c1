use crate::AddressSource;
use std::{io, net::IpAddr};

/// Addresses of the host's network interfaces, in enumeration order.
#[derive(Clone, Copy, Debug, Default)]
pub struct InterfaceAddrs;

impl AddressSource for InterfaceAddrs {
    fn interface_addrs(&self) -> io::Result<Vec<IpAddr>> {
        Ok(if_addrs::get_if_addrs()?
            .into_iter()
            .map(|interface| interface.ip())
            .collect())
    }
}

/// A fixed list of addresses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticAddrs(pub Vec<IpAddr>);

impl AddressSource for StaticAddrs {
    fn interface_addrs(&self) -> io::Result<Vec<IpAddr>> {
        Ok(self.0.clone())
    }
}

impl FromIterator<IpAddr> for StaticAddrs {
    fn from_iter<I: IntoIterator<Item = IpAddr>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
