//! IPv4 subnet arithmetic.
//!
//! Provides [`Subnet`], built from CIDR notation or an address/netmask pair,
//! which derives the network address, broadcast address, usable host range,
//! address counts and the full enumeration of the block.

use crate::error::{Result, SubnetError};
use crate::models::{classful, codec};
use lazy_static::lazy_static;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

lazy_static! {
    static ref CIDR_RE: Regex =
        Regex::new(r"^(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})/(\d{1,2})$").expect("Invalid Regex?");
}

/// Netmask for a CIDR prefix length, as a packed u32.
///
/// # Examples
/// ```
/// use subnet_info::mask_for_prefix;
/// assert_eq!(mask_for_prefix(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn mask_for_prefix(len: u8) -> Result<u32> {
    if len > MAX_LENGTH {
        return Err(SubnetError::range(
            "prefix length",
            u64::from(len),
            0,
            u64::from(MAX_LENGTH),
        ));
    }
    // Shift in u64 so /0 and /32 come out exact instead of hitting the
    // 32-bit shift-width limit.
    let right_len = u32::from(MAX_LENGTH - len);
    let all_bits = u32::MAX as u64;
    Ok(((all_bits >> right_len) << right_len) as u32)
}

/// Count of set bits in a 32-bit value, bit-parallel (Hacker's Delight 5-1).
pub fn pop(x: u32) -> u32 {
    let x = x - ((x >> 1) & 0x5555_5555);
    let x = (x & 0x3333_3333) + ((x >> 2) & 0x3333_3333);
    let x = (x + (x >> 4)) & 0x0F0F_0F0F;
    let x = x + (x >> 8);
    let x = x + (x >> 16);
    x & 0x3F
}

// Spans and bound checks over the 32-bit fields go through u64 so
// `broadcast - network + 1` cannot overflow and a set high bit cannot flip
// an ordering.
fn wide(bits: u32) -> u64 {
    u64::from(bits)
}

/// IPv4 subnet with derived network and broadcast addresses.
///
/// `address`, `netmask`, `network` and `broadcast` are fixed once the
/// constructor returns; only the host-count policy flag can be toggled
/// afterwards. Shared references are safe to read concurrently, and
/// [`Subnet::set_inclusive_host_count`] takes `&mut self`, so flag updates
/// cannot race range reads in safe code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Subnet {
    address: u32,
    netmask: u32,
    network: u32,
    broadcast: u32,
    inclusive_host_count: bool,
}

impl Subnet {
    /// Create a [`Subnet`] from CIDR notation, e.g. "192.168.0.1/24".
    ///
    /// # Examples
    /// ```
    /// use subnet_info::Subnet;
    /// let subnet = Subnet::from_cidr("192.168.0.1/24").unwrap();
    /// assert_eq!(subnet.network_address(), "192.168.0.0");
    /// assert_eq!(subnet.broadcast_address(), "192.168.0.255");
    /// ```
    pub fn from_cidr(cidr: &str) -> Result<Subnet> {
        let cidr = cidr.trim();
        let caps = CIDR_RE
            .captures(cidr)
            .ok_or_else(|| SubnetError::parse(cidr, "expected a.b.c.d/n"))?;
        let address = codec::parse(&caps[1])?;
        let prefix: u8 = caps[2]
            .parse()
            .map_err(|_| SubnetError::parse(cidr, "invalid prefix length"))?;
        let netmask = mask_for_prefix(prefix)?;

        let subnet = Subnet::from_bits(address, netmask);
        log::debug!(
            "from_cidr({cidr}): network={network} broadcast={broadcast}",
            network = subnet.network_address(),
            broadcast = subnet.broadcast_address()
        );
        Ok(subnet)
    }

    /// Create a [`Subnet`] from a dotted-decimal address and netmask,
    /// e.g. "10.0.0.5" and "255.255.255.0".
    ///
    /// The netmask must be a contiguous run of leading one-bits; the
    /// all-zero mask is rejected by this constructor.
    pub fn from_address_and_mask(address: &str, mask: &str) -> Result<Subnet> {
        let address_bits = codec::parse(address)?;
        let mask_bits = codec::parse(mask)?;

        // Contiguity identity in 32-bit two's-complement arithmetic:
        // (mask & -mask) - 1 == !mask holds only when the one-bits form a
        // single leading run.
        if mask_bits == 0 || (mask_bits & mask_bits.wrapping_neg()).wrapping_sub(1) != !mask_bits {
            return Err(SubnetError::parse(mask, "netmask bits are not contiguous"));
        }

        let subnet = Subnet::from_bits(address_bits, mask_bits);
        log::debug!(
            "from_address_and_mask({address}, {mask}): network={network} broadcast={broadcast}",
            network = subnet.network_address(),
            broadcast = subnet.broadcast_address()
        );
        Ok(subnet)
    }

    fn from_bits(address: u32, netmask: u32) -> Subnet {
        let network = address & netmask;
        let broadcast = network | !netmask;
        Subnet {
            address,
            netmask,
            network,
            broadcast,
            inclusive_host_count: false,
        }
    }

    /// Whether [`Subnet::address_count`] and the low/high range include the
    /// network and broadcast addresses. Defaults to `false`.
    pub fn is_inclusive_host_count(&self) -> bool {
        self.inclusive_host_count
    }

    /// Set to `true` to count the network and broadcast addresses as usable
    /// hosts. Never touches the stored address fields.
    pub fn set_inclusive_host_count(&mut self, inclusive: bool) {
        self.inclusive_host_count = inclusive;
    }

    fn low_bits(&self) -> u32 {
        if self.inclusive_host_count {
            self.network
        } else if wide(self.broadcast) - wide(self.network) > 1 {
            self.network + 1
        } else {
            // /31 and /32 have no usable hosts once the endpoints are
            // excluded
            0
        }
    }

    fn high_bits(&self) -> u32 {
        if self.inclusive_host_count {
            self.broadcast
        } else if wide(self.broadcast) - wide(self.network) > 1 {
            self.broadcast - 1
        } else {
            0
        }
    }

    /// Count of available addresses, up to 2^32 for "0.0.0.0/0" inclusive.
    ///
    /// Zero for /31 and /32 when the inclusive flag is off.
    pub fn address_count(&self) -> u64 {
        let span = wide(self.broadcast) - wide(self.network);
        let count = span as i64 + if self.inclusive_host_count { 1 } else { -1 };
        count.max(0) as u64
    }

    /// Count of available addresses as a 32-bit signed value.
    ///
    /// Fails with [`SubnetError::Overflow`] when the true count exceeds
    /// `i32::MAX`; callers needing the full range use
    /// [`Subnet::address_count`].
    pub fn address_count_i32(&self) -> Result<i32> {
        let count = self.address_count();
        i32::try_from(count).map_err(|_| SubnetError::Overflow { count })
    }

    /// True if `address` falls within the usable range `[low, high]`.
    pub fn is_in_range(&self, address: u32) -> bool {
        let addr = wide(address);
        addr >= wide(self.low_bits()) && addr <= wide(self.high_bits())
    }

    /// Like [`Subnet::is_in_range`], parsing the dotted-decimal text first.
    pub fn is_in_range_str(&self, address: &str) -> Result<bool> {
        Ok(self.is_in_range(codec::parse(address)?))
    }

    /// Lazy walk over the textual form of every usable address, ascending.
    ///
    /// Empty when [`Subnet::address_count`] is zero. Each call returns a
    /// fresh iterator; a /8 block is sixteen million entries, so prefer
    /// this over [`Subnet::all_addresses`] for large blocks.
    pub fn iter_addresses(&self) -> AddressRange {
        if self.address_count() == 0 {
            AddressRange { next: 1, last: 0 }
        } else {
            AddressRange {
                next: wide(self.low_bits()),
                last: wide(self.high_bits()),
            }
        }
    }

    /// Every usable address, eagerly collected.
    ///
    /// Materializes up to [`Subnet::address_count`] strings.
    pub fn all_addresses(&self) -> Vec<String> {
        self.iter_addresses().collect()
    }

    /// The input address as dotted-decimal text.
    pub fn address(&self) -> String {
        codec::format(self.address)
    }

    /// The netmask as dotted-decimal text.
    pub fn netmask(&self) -> String {
        codec::format(self.netmask)
    }

    /// The network address (all host bits cleared) as dotted-decimal text.
    pub fn network_address(&self) -> String {
        codec::format(self.network)
    }

    /// The broadcast address (all host bits set) as dotted-decimal text.
    pub fn broadcast_address(&self) -> String {
        codec::format(self.broadcast)
    }

    /// First address of the block after this one, wrapping modulo 2^32.
    pub fn next_network_address(&self) -> String {
        codec::format(self.broadcast.wrapping_add(1))
    }

    /// The wildcard mask (bitwise complement of the netmask) as text.
    pub fn wildcard_mask(&self) -> String {
        codec::format(!self.netmask)
    }

    /// Lowest usable address as text; "0.0.0.0" when the count is zero.
    pub fn low_address(&self) -> String {
        codec::format(self.low_bits())
    }

    /// Highest usable address as text; "0.0.0.0" when the count is zero.
    pub fn high_address(&self) -> String {
        codec::format(self.high_bits())
    }

    /// CIDR form of the input, e.g. "192.168.0.1/24".
    pub fn cidr_signature(&self) -> String {
        format!("{}/{}", self.address(), pop(self.netmask))
    }

    /// Classful default mask for the network address, as text.
    ///
    /// `None` for class D/E space.
    pub fn default_mask(&self) -> Option<String> {
        classful::lookup((self.network >> 24) as u8).map(codec::format)
    }

    /// The input address as a packed u32.
    pub fn address_bits(&self) -> u32 {
        self.address
    }

    /// The netmask as a packed u32.
    pub fn netmask_bits(&self) -> u32 {
        self.netmask
    }

    /// The network address as a packed u32.
    pub fn network_bits(&self) -> u32 {
        self.network
    }

    /// The broadcast address as a packed u32.
    pub fn broadcast_bits(&self) -> u32 {
        self.broadcast
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CIDR signature: [{}]", self.cidr_signature())?;
        writeln!(f, "Netmask:        [{}]", self.netmask())?;
        writeln!(f, "Wildcard:       [{}]", self.wildcard_mask())?;
        writeln!(f, "Network:        [{}]", self.network_address())?;
        writeln!(f, "First address:  [{}]", self.low_address())?;
        writeln!(f, "Last address:   [{}]", self.high_address())?;
        writeln!(f, "Broadcast:      [{}]", self.broadcast_address())?;
        writeln!(f, "Next network:   [{}]", self.next_network_address())?;
        match self.default_mask() {
            Some(mask) => writeln!(f, "Default mask:   [{mask}]")?,
            None => writeln!(f, "Default mask:   [none]")?,
        }
        write!(f, "Address count:  [{}]", self.address_count())
    }
}

impl Serialize for Subnet {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.cidr_signature())
    }
}

impl<'de> Deserialize<'de> for Subnet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Subnet, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Subnet::from_cidr(&s).map_err(de::Error::custom)
    }
}

/// Lazy iterator over the usable addresses of a [`Subnet`], in ascending
/// order. Restart by calling [`Subnet::iter_addresses`] again.
#[derive(Debug, Clone)]
pub struct AddressRange {
    next: u64,
    last: u64,
}

impl Iterator for AddressRange {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.next > self.last {
            return None;
        }
        let text = codec::format(self.next as u32);
        self.next += 1;
        Some(text)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next > self.last {
            0
        } else {
            (self.last - self.next + 1) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AddressRange {}
