#[cfg(feature = "tracing")]
use tracing::debug;

use crate::{Error, InterfaceAddrs, Layout, Result, Settings, lower_16bit_private_ip};

/// Resolves the machine ID for a generator with the given layout.
///
/// Uses [`Settings::machine_id`] when present, otherwise the lower 16 bits of
/// the first private IPv4 address of [`Settings::address_source`] (or
/// [`InterfaceAddrs`]). The result must fit the machine ID field and pass
/// [`Settings::check_machine_id`] when one is set.
///
/// Uniqueness across a fleet is only as good as the heuristic or the check
/// callback; nothing here coordinates with other instances.
///
/// # Errors
///
/// - [`Error::MachineId`] wrapping the capability's own error
/// - [`Error::AddressSource`] or [`Error::NoPrivateAddress`] from the
///   heuristic
/// - [`Error::InvalidMachineId`] if the ID is out of range or rejected
pub fn resolve_machine_id(settings: &Settings, layout: &Layout) -> Result<u32> {
    let machine_id = match (&settings.machine_id, &settings.address_source) {
        (Some(machine_id), _) => machine_id().map_err(Error::MachineId)?,
        (None, Some(source)) => lower_16bit_private_ip(source.as_ref())?,
        (None, None) => lower_16bit_private_ip(&InterfaceAddrs)?,
    };

    if machine_id > layout.max_machine_id() {
        return Err(Error::InvalidMachineId);
    }
    if let Some(check) = &settings.check_machine_id {
        if !check(machine_id) {
            return Err(Error::InvalidMachineId);
        }
    }

    #[cfg(feature = "tracing")]
    debug!(machine_id, "resolved machine id");
    Ok(machine_id)
}
