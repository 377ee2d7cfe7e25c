// palette.rs - Cell colour palettes

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Every palette holds exactly three shades.
pub type Shades = [Rgb; 3];

const RED: Shades = [Rgb::new(70, 5, 10), Rgb::new(90, 10, 20), Rgb::new(110, 15, 30)];
const GREEN: Shades = [Rgb::new(5, 60, 15), Rgb::new(10, 90, 30), Rgb::new(15, 120, 45)];
const BLUE: Shades = [Rgb::new(0, 30, 60), Rgb::new(0, 60, 120), Rgb::new(0, 80, 160)];
const ORANGE: Shades = [Rgb::new(239, 84, 17), Rgb::new(255, 101, 23), Rgb::new(255, 130, 46)];
const YELLOW: Shades = [Rgb::new(255, 232, 20), Rgb::new(255, 177, 20), Rgb::new(255, 196, 18)];
const PURPLE: Shades = [Rgb::new(37, 6, 76), Rgb::new(54, 23, 94), Rgb::new(85, 50, 133)];
const WHITE: Shades = [Rgb::new(166, 166, 166), Rgb::new(198, 198, 198), Rgb::new(224, 224, 224)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Palette {
    Red,
    Green,
    Blue,
    Orange,
    Yellow,
    Purple,
    #[default]
    White,
}

impl Palette {
    pub const ALL: [Palette; 7] = [
        Palette::Red,
        Palette::Green,
        Palette::Blue,
        Palette::Orange,
        Palette::Yellow,
        Palette::Purple,
        Palette::White,
    ];

    pub const fn shades(self) -> &'static Shades {
        match self {
            Palette::Red    => &RED,
            Palette::Green  => &GREEN,
            Palette::Blue   => &BLUE,
            Palette::Orange => &ORANGE,
            Palette::Yellow => &YELLOW,
            Palette::Purple => &PURPLE,
            Palette::White  => &WHITE,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Palette::Red    => "red",
            Palette::Green  => "green",
            Palette::Blue   => "blue",
            Palette::Orange => "orange",
            Palette::Yellow => "yellow",
            Palette::Purple => "purple",
            Palette::White  => "white",
        }
    }

    /// Palette bound to a number key. Only 1..=6 are bound; white is the
    /// startup palette and has no key.
    pub const fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Palette::Red),
            2 => Some(Palette::Green),
            3 => Some(Palette::Blue),
            4 => Some(Palette::Orange),
            5 => Some(Palette::Yellow),
            6 => Some(Palette::Purple),
            _ => None,
        }
    }

    /// Picks one of the three shades uniformly. Called once per cell per
    /// render, so a static cell flickers between shades.
    pub fn pick<R: Rng + ?Sized>(self, rng: &mut R) -> Rgb {
        let shades = self.shades();
        shades[rng.gen_range(0..shades.len())]
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Palette::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownPalette(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn digits_map_to_keyed_palettes() {
        assert_eq!(Palette::from_digit(1), Some(Palette::Red));
        assert_eq!(Palette::from_digit(2), Some(Palette::Green));
        assert_eq!(Palette::from_digit(3), Some(Palette::Blue));
        assert_eq!(Palette::from_digit(4), Some(Palette::Orange));
        assert_eq!(Palette::from_digit(5), Some(Palette::Yellow));
        assert_eq!(Palette::from_digit(6), Some(Palette::Purple));
        assert_eq!(Palette::from_digit(0), None);
        assert_eq!(Palette::from_digit(7), None);
    }

    #[test]
    fn default_is_white() {
        assert_eq!(Palette::default(), Palette::White);
    }

    #[test]
    fn pick_stays_within_shades() {
        let mut rng = StdRng::seed_from_u64(7);
        for palette in Palette::ALL {
            for _ in 0..50 {
                let colour = palette.pick(&mut rng);
                assert!(palette.shades().contains(&colour), "{palette}: {colour:?}");
            }
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for palette in Palette::ALL {
            assert_eq!(palette.name().parse::<Palette>().unwrap(), palette);
        }
        assert_eq!("  Orange ".parse::<Palette>().unwrap(), Palette::Orange);
        assert!(matches!("teal".parse::<Palette>(), Err(ConfigError::UnknownPalette(_))));
    }
}
