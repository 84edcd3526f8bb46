//! IPv4 subnet metadata engine.
//!
//! Builds a [`Subnet`] from CIDR notation ("192.168.0.1/24") or an
//! address/netmask pair and derives the network address, broadcast address,
//! usable host range, wildcard mask, address counts and the enumeration of
//! the whole block. Pure computation: no I/O and no shared state beyond the
//! per-instance inclusive-host-count flag.

mod error;
pub mod models;
pub mod output;

pub use error::{Result, SubnetError};
pub use models::{mask_for_prefix, pop, AddressRange, Subnet, MAX_LENGTH};
