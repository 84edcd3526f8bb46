//! Terminal output utilities.
//!
//! Renders a subnet summary for the command line, with plain formatting
//! helpers kept separate from the coloring so they stay testable.

use crate::models::Subnet;
use colored::Colorize;

/// Format a labelled value as one summary row, label padded to a fixed
/// column.
pub fn format_row<T: ToString>(label: &str, value: T) -> String {
    format!("{:<16}[{}]", format!("{label}:"), value.to_string())
}

/// Render the full subnet summary with colored values, one field per line.
pub fn render_summary(subnet: &Subnet) -> String {
    let rows = [
        ("CIDR signature", subnet.cidr_signature()),
        ("Netmask", subnet.netmask()),
        ("Wildcard", subnet.wildcard_mask()),
        ("Network", subnet.network_address()),
        ("First address", subnet.low_address()),
        ("Last address", subnet.high_address()),
        ("Broadcast", subnet.broadcast_address()),
        ("Next network", subnet.next_network_address()),
        (
            "Default mask",
            subnet.default_mask().unwrap_or_else(|| "none".to_string()),
        ),
        ("Address count", subnet.address_count().to_string()),
    ];

    rows.iter()
        .map(|(label, value)| format_row(label, value.as_str().cyan()))
        .collect::<Vec<String>>()
        .join("\n")
}
