//! Dotted-decimal address codec.
//!
//! Converts IPv4 addresses between their textual dotted-decimal form and a
//! packed big-endian `u32` (octet 0 in bits 31-24).

use crate::error::{Result, SubnetError};
use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv4Addr;

lazy_static! {
    static ref ADDRESS_RE: Regex =
        Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$").expect("Invalid Regex?");
}

/// Parse a dotted-decimal address (e.g. "192.168.0.1") into a packed u32.
///
/// # Examples
/// ```
/// use subnet_info::models::codec;
/// assert_eq!(codec::parse("10.0.0.1").unwrap(), 0x0A000001);
/// ```
pub fn parse(text: &str) -> Result<u32> {
    let text = text.trim();
    let caps = ADDRESS_RE
        .captures(text)
        .ok_or_else(|| SubnetError::parse(text, "not a dotted-decimal address"))?;

    let mut bits: u32 = 0;
    for group in 1..=4 {
        let octet: u32 = caps[group]
            .parse()
            .map_err(|_| SubnetError::parse(text, "not a dotted-decimal address"))?;
        if octet > 255 {
            return Err(SubnetError::range("octet", u64::from(octet), 0, 255));
        }
        bits = (bits << 8) | octet;
    }
    log::trace!("parse({text}) = {bits:#010x}");
    Ok(bits)
}

/// Format a packed u32 as canonical dotted decimal (no leading zeros).
pub fn format(bits: u32) -> String {
    Ipv4Addr::from(bits).to_string()
}
