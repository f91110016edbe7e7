//! Player color normalization

/// Color used when a stored or submitted color cannot be parsed
pub const FALLBACK_COLOR: &str = "#3b82f6";

/// Colors handed out in seat order when color tagging is enabled
pub const DEFAULT_PALETTE: [&str; 12] = [
    "#3b82f6", "#ef4444", "#22c55e", "#f59e0b",
    "#a855f7", "#14b8a6", "#ec4899", "#84cc16",
    "#f97316", "#06b6d4", "#6366f1", "#78716c",
];

/// Normalize a `#rrggbb` or `#rgb` hex color to lowercase `#rrggbb`.
///
/// Anything else yields [`FALLBACK_COLOR`].
pub fn normalize_color(input: &str) -> String {
    let trimmed = input.trim();
    let Some(digits) = trimmed.strip_prefix('#') else {
        return FALLBACK_COLOR.to_string();
    };

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return FALLBACK_COLOR.to_string();
    }

    match digits.len() {
        6 => format!("#{}", digits.to_ascii_lowercase()),
        3 => {
            let expanded: String = digits
                .to_ascii_lowercase()
                .chars()
                .flat_map(|c| [c, c])
                .collect();
            format!("#{}", expanded)
        }
        _ => FALLBACK_COLOR.to_string(),
    }
}

/// Default color for the seat at `index`
pub fn palette_color(index: usize) -> String {
    DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_short_form() {
        assert_eq!(normalize_color("#ABC"), "#aabbcc");
    }

    #[test]
    fn keeps_long_form() {
        assert_eq!(normalize_color("#112233"), "#112233");
        assert_eq!(normalize_color("#A1B2C3"), "#a1b2c3");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(normalize_color("notacolor"), FALLBACK_COLOR);
        assert_eq!(normalize_color("112233"), FALLBACK_COLOR);
        assert_eq!(normalize_color("#12345"), FALLBACK_COLOR);
        assert_eq!(normalize_color("#ggg"), FALLBACK_COLOR);
        assert_eq!(normalize_color(""), FALLBACK_COLOR);
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(palette_color(0), DEFAULT_PALETTE[0]);
        assert_eq!(palette_color(12), DEFAULT_PALETTE[0]);
        assert_eq!(palette_color(13), DEFAULT_PALETTE[1]);
    }
}
