use serde::Deserialize;
use serde::Serialize;

/// An RGBA color. In parameter and output files it is written as a
/// hex string, `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RColor {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl RColor {
    pub const BLUE: RColor = RColor::rgb(0.0, 0.0, 1.0);
    pub const RED: RColor = RColor::rgb(1.0, 0.0, 0.0);
    pub const GREEN: RColor = RColor::rgb(0.0, 1.0, 0.0);
    pub const YELLOW: RColor = RColor::rgb(1.0, 1.0, 0.0);
    pub const BLACK: RColor = RColor::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: (r * 255.0) as u8,
            g: (g * 255.0) as u8,
            b: (b * 255.0) as u8,
            a: 255,
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn from_hex(s: &str) -> Result<Self, String> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| format!("Color \"{s}\" does not start with '#'"))?;
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(format!("Color \"{s}\" is not of the form #rrggbb or #rrggbbaa"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[2 * i..2 * i + 2], 16)
                .map_err(|e| format!("Invalid color \"{s}\": {e}"))
        };
        let a = if digits.len() == 8 { channel(3)? } else { 255 };
        Ok(Self {
            r: channel(0)?,
            g: channel(1)?,
            b: channel(2)?,
            a,
        })
    }
}

impl Default for RColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<RColor> for String {
    fn from(color: RColor) -> String {
        color.to_hex()
    }
}

impl TryFrom<String> for RColor {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}
