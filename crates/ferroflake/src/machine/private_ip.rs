use crate::{AddressSource, Error, Result};
use std::net::{IpAddr, Ipv4Addr};

/// Returns `true` for private (RFC 1918) and link-local (RFC 3927) IPv4
/// addresses.
pub fn is_private_ipv4(ip: Ipv4Addr) -> bool {
    ip.is_private() || ip.is_link_local()
}

/// Returns the first non-loopback private or link-local IPv4 address of
/// `source`. IPv4-mapped IPv6 addresses count as IPv4; other IPv6 addresses
/// are skipped.
///
/// # Errors
///
/// - [`Error::AddressSource`] if the source fails
/// - [`Error::NoPrivateAddress`] if no address qualifies
pub fn private_ipv4(source: &dyn AddressSource) -> Result<Ipv4Addr> {
    source
        .interface_addrs()?
        .into_iter()
        .filter_map(|addr| match addr {
            IpAddr::V4(ip) => Some(ip),
            IpAddr::V6(ip) => ip.to_ipv4_mapped(),
        })
        .find(|ip| !ip.is_loopback() && is_private_ipv4(*ip))
        .ok_or(Error::NoPrivateAddress)
}

/// Derives a machine ID from the third and fourth octets of the first
/// private IPv4 address of `source`.
///
/// # Errors
///
/// Same as [`private_ipv4`].
pub fn lower_16bit_private_ip(source: &dyn AddressSource) -> Result<u32> {
    let [_, _, high, low] = private_ipv4(source)?.octets();
    Ok(u32::from(u16::from_be_bytes([high, low])))
}
