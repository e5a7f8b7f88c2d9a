//! KML color decoding.
//!
//! KML writes colors as eight hex digits in `aabbggrr` order (alpha, blue,
//! green, red). Web consumers want `#RRGGBB`.

/// Number of characters in a KML color value.
const KML_COLOR_LEN: usize = 8;

/// Converts a KML `aabbggrr` color into an uppercase `#RRGGBB` string.
///
/// Alpha is discarded. The digits are reordered as-is without validating
/// them as hex. Returns `None` unless `raw` is exactly eight characters.
#[must_use]
pub fn decode_color(raw: &str) -> Option<String> {
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() != KML_COLOR_LEN {
        return None;
    }

    let (blue, green, red) = (&chars[2..4], &chars[4..6], &chars[6..8]);

    let mut hex = String::with_capacity(KML_COLOR_LEN - 1);
    hex.push('#');
    hex.extend(red.iter().chain(green).chain(blue));
    Some(hex.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorders_bgr_to_rgb() {
        assert_eq!(decode_color("ff0000ff").as_deref(), Some("#FF0000"));
        assert_eq!(decode_color("ff00ff00").as_deref(), Some("#00FF00"));
        assert_eq!(decode_color("ffff0000").as_deref(), Some("#0000FF"));
    }

    #[test]
    fn discards_alpha() {
        assert_eq!(decode_color("00336699"), decode_color("ff336699"));
        assert_eq!(decode_color("7f336699").as_deref(), Some("#996633"));
    }

    #[test]
    fn uppercases_digits() {
        assert_eq!(decode_color("ffabcdef").as_deref(), Some("#EFCDAB"));
    }

    #[test]
    fn encoded_rgb_decodes_back() {
        for rgb in ["1a2b3c", "FFFFFF", "000000", "c0ffee", "8E44AD"] {
            let (r, g, b) = (&rgb[0..2], &rgb[2..4], &rgb[4..6]);
            for alpha in ["00", "80", "ff"] {
                let kml = format!("{alpha}{b}{g}{r}");
                assert_eq!(
                    decode_color(&kml),
                    Some(format!("#{}", rgb.to_uppercase())),
                    "{kml}"
                );
            }
        }
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(decode_color(""), None);
        assert_eq!(decode_color("ff0000"), None);
        assert_eq!(decode_color("ff0000ff0"), None);
        assert_eq!(decode_color("#ff0000ff"), None);
    }
}
