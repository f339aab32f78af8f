//! Color values.

use crate::error::{ColoringError, Result};

/// A vertex color. Colors are numbered from [`FIRST_COLOR`].
pub type Color = u32;

/// The lowest valid color.
pub const FIRST_COLOR: Color = 1;

/// Rejects the reserved color `0`.
pub fn validate_color(color: Color) -> Result<Color> {
    if color < FIRST_COLOR {
        Err(ColoringError::InvalidColor(color))
    } else {
        Ok(color)
    }
}

/// Iterates the palette `1..=budget`.
pub fn palette(budget: Color) -> impl Iterator<Item = Color> {
    FIRST_COLOR..=budget
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_color() {
        assert_eq!(validate_color(1), Ok(1));
        assert_eq!(validate_color(42), Ok(42));
        assert_eq!(validate_color(0), Err(ColoringError::InvalidColor(0)));
    }

    #[test]
    fn test_palette() {
        assert_eq!(palette(3).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(palette(0).count(), 0);
    }
}
