//! Hex <-> HSB colour conversion for the admin colour picker.
//!
//! The picker works in hue/saturation/brightness (hue in `[0, 360)`,
//! saturation and brightness in `[0, 1]`); settings store `#rrggbb`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A colour as the picker control reports it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsb {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

/// Parse `#rgb` / `#rrggbb` (the `#` is optional, case-insensitive) into
/// its three channels.
pub fn parse_hex(hex: &str) -> Result<[u8; 3], CoreError> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid_hex(hex));
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(invalid_hex(hex)),
    };

    let num = u32::from_str_radix(&expanded, 16).map_err(|_| invalid_hex(hex))?;
    Ok([
        ((num >> 16) & 0xff) as u8,
        ((num >> 8) & 0xff) as u8,
        (num & 0xff) as u8,
    ])
}

/// Canonical lower-case `#rrggbb` form of a hex colour.
pub fn normalize_hex(hex: &str) -> Result<String, CoreError> {
    let [r, g, b] = parse_hex(hex)?;
    Ok(format!("#{r:02x}{g:02x}{b:02x}"))
}

pub fn hex_to_hsb(hex: &str) -> Result<Hsb, CoreError> {
    let [r8, g8, b8] = parse_hex(hex)?;
    let max8 = r8.max(g8).max(b8);
    let min8 = r8.min(g8).min(b8);

    let (r, g, b) = (unit(r8), unit(g8), unit(b8));
    let max = unit(max8);
    let delta = max - unit(min8);

    let hue = if max8 == min8 {
        0.0
    } else {
        let sector = if max8 == r8 {
            ((g - b) / delta) % 6.0
        } else if max8 == g8 {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        let degrees = sector * 60.0;
        if degrees < 0.0 {
            degrees + 360.0
        } else {
            degrees
        }
    };

    let saturation = if max8 == 0 { 0.0 } else { delta / max };

    Ok(Hsb {
        hue,
        saturation,
        brightness: max,
    })
}

/// Convert a picker colour to lower-case `#rrggbb`.
///
/// Hue wraps modulo 360; saturation and brightness are clamped to `[0, 1]`.
pub fn hsb_to_hex(hsb: Hsb) -> String {
    let h = hsb.hue.rem_euclid(360.0);
    let s = hsb.saturation.clamp(0.0, 1.0);
    let v = hsb.brightness.clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (rp, gp, bp) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let channel = |p: f64| ((p + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(rp), channel(gp), channel(bp))
}

fn unit(channel: u8) -> f64 {
    f64::from(channel) / 255.0
}

fn invalid_hex(hex: &str) -> CoreError {
    CoreError::Validation(format!("'{hex}' is not a #rgb or #rrggbb hex colour"))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn default_bar_color_converts() {
        let hsb = hex_to_hsb("#288d40").unwrap();
        assert!(hsb.hue > 133.0 && hsb.hue < 135.0, "hue was {}", hsb.hue);
        assert!(approx(hsb.brightness, 141.0 / 255.0));
        assert_eq!(hsb_to_hex(hsb), "#288d40");
    }

    #[test]
    fn primaries_have_expected_hues() {
        assert!(approx(hex_to_hsb("#ff0000").unwrap().hue, 0.0));
        assert!(approx(hex_to_hsb("#00ff00").unwrap().hue, 120.0));
        assert!(approx(hex_to_hsb("#0000ff").unwrap().hue, 240.0));
        assert!(approx(hex_to_hsb("#ff00ff").unwrap().hue, 300.0));
    }

    #[test]
    fn greys_have_zero_hue_and_saturation() {
        for hex in ["#000000", "#808080", "#ffffff"] {
            let hsb = hex_to_hsb(hex).unwrap();
            assert!(approx(hsb.hue, 0.0));
            assert!(approx(hsb.saturation, 0.0));
        }
    }

    #[test]
    fn hex_survives_conversion_through_hsb() {
        let steps = [0u8, 1, 51, 102, 127, 128, 153, 204, 254, 255];
        for r in steps {
            for g in steps {
                for b in steps {
                    let hex = format!("#{r:02x}{g:02x}{b:02x}");
                    let back = hsb_to_hex(hex_to_hsb(&hex).unwrap());
                    assert_eq!(back, hex, "conversion drifted for {hex}");
                }
            }
        }
    }

    #[test]
    fn short_and_upper_case_hex_are_accepted() {
        assert_eq!(hsb_to_hex(hex_to_hsb("#ABC").unwrap()), "#aabbcc");
        assert_eq!(hsb_to_hex(hex_to_hsb("FF00Aa").unwrap()), "#ff00aa");
        assert_eq!(normalize_hex(" #F0a ").unwrap(), "#ff00aa");
    }

    #[test]
    fn invalid_hex_is_rejected() {
        for bad in ["", "#", "#12", "#12345", "#gggggg", "#1234567", "red"] {
            assert_matches!(hex_to_hsb(bad), Err(CoreError::Validation(_)), "accepted {bad:?}");
        }
    }

    #[test]
    fn hsb_out_of_range_is_normalized() {
        let wrapped = Hsb {
            hue: 480.0,
            saturation: 1.0,
            brightness: 1.0,
        };
        assert_eq!(hsb_to_hex(wrapped), "#00ff00");

        let clamped = Hsb {
            hue: -120.0,
            saturation: 2.0,
            brightness: -1.0,
        };
        assert_eq!(hsb_to_hex(clamped), "#000000");
    }
}
