//! Human-facing renderings of sizes and addresses.

use crate::ids::Address;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with binary units and at most one decimal: `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.1}");
    let trimmed = rounded.strip_suffix(".0").unwrap_or(&rounded);
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

/// Shortens an address to `head…tail`, keeping `keep` characters on each side.
pub fn short_address(address: &Address, keep: usize) -> String {
    let full = address.to_string();
    if full.len() <= keep * 2 {
        return full;
    }
    format!("{}…{}", &full[..keep], &full[full.len() - keep..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
    }

    #[test]
    fn test_short_address() {
        let address: Address = "2DWNrUtJXqnA9qu444yyACg2VXnXmEqwBPG7Q7cgM1NM".parse().unwrap();
        assert_eq!(short_address(&address, 6), "2DWNrU…cgM1NM");
    }
}
