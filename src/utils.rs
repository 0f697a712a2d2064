// utils.rs - Common Utility Functions

use crate::app::WindowId;

/// Window id as printed in results: `0x` followed by uppercase hex
pub fn format_window_id(window: WindowId) -> String {
    format!("0x{:X}", window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_ids_are_uppercase_hex() {
        assert_eq!(format_window_id(0), "0x0");
        assert_eq!(format_window_id(0x3a0001), "0x3A0001");
    }
}
