//! Property-based tests for the color engine and menu search
//!
//! Uses proptest to verify conversion round trips and search invariants.

use adminshell_core::color::{
    generate_color_gradations, hex_to_rgb, hsl_to_rgb, rgb_to_hex, rgb_to_hsl, PALETTE_SIZE,
};
use adminshell_core::menu::{search_menu_items, MenuItem};
use proptest::prelude::*;

// ============================================================================
// Strategy Generators
// ============================================================================

/// Valid 6-digit hex colors in mixed case, with or without `#`
fn hex_color_strategy() -> impl Strategy<Value = String> {
    (any::<bool>(), prop::string::string_regex("[0-9a-fA-F]{6}").expect("valid regex"))
        .prop_map(|(hash, digits)| if hash { format!("#{}", digits) } else { digits })
}

fn menu_items_strategy() -> impl Strategy<Value = Vec<MenuItem>> {
    prop::collection::vec(
        prop::string::string_regex("[a-zA-Z ]{1,20}").expect("valid regex"),
        0..20,
    )
    .prop_map(|titles| {
        titles
            .into_iter()
            .enumerate()
            .map(|(i, title)| MenuItem {
                title,
                icon: "default".to_string(),
                path: format!("/page/{}", i),
                name: format!("Page{}", i),
            })
            .collect()
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// hex -> rgb -> hex reproduces the input, lowercased and `#`-prefixed
    #[test]
    fn hex_roundtrip(hex in hex_color_strategy()) {
        let rgb = hex_to_rgb(&hex).unwrap();
        let expected = format!("#{}", hex.trim_start_matches('#').to_lowercase());
        prop_assert_eq!(rgb_to_hex(rgb.r, rgb.g, rgb.b), expected);
    }

    /// rgb -> hsl -> rgb is within rounding of the input
    #[test]
    fn hsl_roundtrip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let hsl = rgb_to_hsl(r, g, b);
        let back = hsl_to_rgb(hsl.h, hsl.s, hsl.l);
        prop_assert!((i16::from(back.r) - i16::from(r)).abs() <= 1);
        prop_assert!((i16::from(back.g) - i16::from(g)).abs() <= 1);
        prop_assert!((i16::from(back.b) - i16::from(b)).abs() <= 1);
    }

    /// HSL components stay in their documented ranges
    #[test]
    fn hsl_ranges(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let hsl = rgb_to_hsl(r, g, b);
        prop_assert!(hsl.h >= 0.0 && hsl.h < 360.0);
        prop_assert!(hsl.s >= 0.0 && hsl.s <= 100.0 + 1e-9);
        prop_assert!(hsl.l >= 0.0 && hsl.l <= 100.0);
    }

    /// Every shade of a valid base is a valid color, and lightness never increases
    #[test]
    fn palette_is_valid_and_ordered(hex in hex_color_strategy()) {
        let palette = generate_color_gradations(&hex);
        prop_assert_eq!(palette.iter().count(), PALETTE_SIZE);

        let lightness: Vec<f64> = palette
            .iter()
            .map(|(_, color)| hex_to_rgb(color).unwrap().to_hsl().l)
            .collect();
        for pair in lightness.windows(2) {
            prop_assert!(pair[0] >= pair[1]);
        }
    }

    /// Anything that is not a 6-digit hex color falls back to itself in every slot
    #[test]
    fn palette_fallback_is_verbatim(garbage in "[g-z ]{0,12}") {
        let palette = generate_color_gradations(&garbage);
        for (_, color) in palette.iter() {
            prop_assert_eq!(color, garbage.as_str());
        }
    }

    /// Search results are an order-preserving subsequence of the input
    #[test]
    fn search_preserves_order(items in menu_items_strategy(), keyword in "[a-z]{1,3}") {
        let found = search_menu_items(&items, &keyword);
        let mut cursor = items.iter();
        for item in &found {
            prop_assert!(cursor.any(|candidate| candidate == item));
            prop_assert!(item.title.to_lowercase().contains(&keyword));
        }
    }

    /// Blank keywords never match
    #[test]
    fn blank_keyword_matches_nothing(items in menu_items_strategy(), blanks in "[ \t]{0,4}") {
        prop_assert!(search_menu_items(&items, &blanks).is_empty());
    }
}
