//! Length units of a building model

use std::fmt;

/// Length units a [`Model`](crate::document::Model) can be expressed in.
///
/// GEM text is always written and read in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Units {
    #[default]
    Meters,
    Millimeters,
    Centimeters,
    Feet,
    Inches,
}

impl Units {
    /// Length of one unit in meters
    pub fn to_meters_factor(&self) -> f64 {
        match self {
            Units::Meters => 1.0,
            Units::Millimeters => 0.001,
            Units::Centimeters => 0.01,
            Units::Feet => 0.3048,
            Units::Inches => 0.0254,
        }
    }

    /// Factor converting a length in `self` into `target`
    pub fn conversion_factor(&self, target: Units) -> f64 {
        self.to_meters_factor() / target.to_meters_factor()
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Units::Meters => "Meters",
            Units::Millimeters => "Millimeters",
            Units::Centimeters => "Centimeters",
            Units::Feet => "Feet",
            Units::Inches => "Inches",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_factor() {
        assert_eq!(Units::Millimeters.conversion_factor(Units::Meters), 0.001);
        assert_eq!(Units::Meters.conversion_factor(Units::Meters), 1.0);
        assert!((Units::Feet.conversion_factor(Units::Inches) - 12.0).abs() < 1e-12);
    }
}
