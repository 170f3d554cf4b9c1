use crate::BoxError;
use std::{io, net::IpAddr};

/// Caller-supplied capability producing the machine ID of a generator.
pub type MachineIdFn = Box<dyn Fn() -> Result<u32, BoxError> + Send + Sync>;

/// Caller-supplied predicate validating a resolved machine ID, typically
/// against a registry or leased pool shared by the fleet.
pub type CheckMachineIdFn = Box<dyn Fn(u32) -> bool + Send + Sync>;

/// A source of local network addresses for the private-IP machine ID
/// heuristic.
///
/// The default implementation is [`InterfaceAddrs`]. Supplying another source
/// through [`Settings::with_address_source`] pins or mocks the addresses the
/// heuristic sees.
///
/// # Example
///
/// ```
/// use ferroflake::{AddressSource, lower_16bit_private_ip};
/// use std::{io, net::{IpAddr, Ipv4Addr}};
///
/// struct Pinned;
/// impl AddressSource for Pinned {
///     fn interface_addrs(&self) -> io::Result<Vec<IpAddr>> {
///         Ok(vec![IpAddr::V4(Ipv4Addr::new(10, 0, 3, 7))])
///     }
/// }
///
/// assert_eq!(lower_16bit_private_ip(&Pinned).unwrap(), 3 * 256 + 7);
/// ```
///
/// [`InterfaceAddrs`]: crate::InterfaceAddrs
/// [`Settings::with_address_source`]: crate::Settings::with_address_source
pub trait AddressSource: Send + Sync {
    /// Returns the addresses in the order the heuristic should consider them.
    fn interface_addrs(&self) -> io::Result<Vec<IpAddr>>;
}
