//! Pastel display colors handed out to songs created without one.

use rand::seq::SliceRandom;
use rand::Rng;

/// Fixed set of "macaron" colors. New songs draw uniformly from this list.
pub const MACARON_PALETTE: [&str; 15] = [
    "#FFB3BA", "#FFDFBA", "#FFFFBA", "#BAFFC9", "#BAE1FF", "#E0BBE4", "#FFB7D5", "#C7CEEA",
    "#B4E7F5", "#FED9B7", "#A0E7E5", "#F7C6C7", "#C9E4DE", "#FFD1DC", "#E4C1F9",
];

/// Pick one palette entry uniformly at random.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    MACARON_PALETTE
        .choose(rng)
        .copied()
        .unwrap_or(MACARON_PALETTE[0])
}

/// Parse `#RRGGBB` (leading `#` optional) into its components.
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;

    #[test]
    fn random_color_comes_from_palette() {
        let mut rng = Pcg64::seed_from_u64(7);
        for _ in 0..100 {
            assert!(MACARON_PALETTE.contains(&random_color(&mut rng)));
        }
    }

    #[test]
    fn every_palette_entry_parses() {
        for color in MACARON_PALETTE {
            assert!(parse_hex(color).is_some(), "{color} should parse");
        }
        assert_eq!(parse_hex("#FFB3BA"), Some((0xFF, 0xB3, 0xBA)));
    }

    #[test]
    fn parse_hex_rejects_garbage() {
        assert_eq!(parse_hex(""), None);
        assert_eq!(parse_hex("#FFF"), None);
        assert_eq!(parse_hex("#GGGGGG"), None);
    }
}
