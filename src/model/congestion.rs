//! Congestion levels as reported by the live traffic feed.

use std::fmt;

use crate::Error;

/// Traffic state of a road segment, levels 0-6.
///
/// Level 0 means the feed carries no reading for the segment; it is *not*
/// the same as free-flowing traffic and sits between levels 1 and 2 in the
/// weighting table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum CongestionLevel {
    NoData = 0,
    VeryFluid = 1,
    Fluid = 2,
    Dense = 3,
    VeryDense = 4,
    Congested = 5,
    CutOff = 6,
}

impl CongestionLevel {
    /// Travel-time multiplier applied on top of the free-flow estimate.
    ///
    /// `CutOff` is an effective-infinity penalty rather than an edge
    /// removal: a closed street stays traversable so routing still succeeds
    /// when it is the only connection.
    pub fn factor(self) -> f64 {
        match self {
            Self::NoData => 1.2,
            Self::VeryFluid => 1.0,
            Self::Fluid => 1.5,
            Self::Dense => 3.0,
            Self::VeryDense => 5.0,
            Self::Congested => 10.0,
            Self::CutOff => 10_000_000.0,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for CongestionLevel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        match value {
            0 => Ok(Self::NoData),
            1 => Ok(Self::VeryFluid),
            2 => Ok(Self::Fluid),
            3 => Ok(Self::Dense),
            4 => Ok(Self::VeryDense),
            5 => Ok(Self::Congested),
            6 => Ok(Self::CutOff),
            other => Err(Error::InvalidData(format!(
                "congestion level {other} is outside the 0-6 range"
            ))),
        }
    }
}

impl fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoData => "no data",
            Self::VeryFluid => "very fluid",
            Self::Fluid => "fluid",
            Self::Dense => "dense",
            Self::VeryDense => "very dense",
            Self::Congested => "congested",
            Self::CutOff => "cut off",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::CongestionLevel;

    #[test]
    fn factor_is_non_decreasing_for_reported_levels() {
        let reported = [
            CongestionLevel::VeryFluid,
            CongestionLevel::Fluid,
            CongestionLevel::Dense,
            CongestionLevel::VeryDense,
            CongestionLevel::Congested,
            CongestionLevel::CutOff,
        ];
        for pair in reported.windows(2) {
            assert!(pair[0].factor() <= pair[1].factor());
        }
    }

    #[test]
    fn no_data_sits_between_very_fluid_and_fluid() {
        let no_data = CongestionLevel::NoData.factor();
        assert!(no_data > CongestionLevel::VeryFluid.factor());
        assert!(no_data < CongestionLevel::Fluid.factor());
        assert!((no_data - 1.2).abs() < 1e-12);
    }

    #[test]
    fn try_from_round_trips_valid_levels() {
        for raw in 0..=6u8 {
            let level = CongestionLevel::try_from(raw).unwrap();
            assert_eq!(level.as_u8(), raw);
        }
    }

    #[test]
    fn try_from_rejects_out_of_range() {
        assert!(CongestionLevel::try_from(7).is_err());
        assert!(CongestionLevel::try_from(255).is_err());
    }
}
