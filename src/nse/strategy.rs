use super::config;
use serde::Serialize;
use std::fmt;

/// Coarse strategy recommendation from spot vs support/resistance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    NotEnoughData,
    IronCondor { support: f64, resistance: f64 },
    BullCallSpread { support: f64 },
    BearPutSpread { resistance: f64 },
    WaitAndWatch,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::NotEnoughData => write!(f, "Not enough data for strategy suggestion."),
            Strategy::IronCondor { support, resistance } => {
                write!(f, "Suggest: Iron Condor between **{} - {}**", support, resistance)
            }
            Strategy::BullCallSpread { support } => {
                write!(f, "Suggest: Bull Call Spread — Spot is below support ({})", support)
            }
            Strategy::BearPutSpread { resistance } => {
                write!(f, "Suggest: Bear Put Spread — Spot is above resistance ({})", resistance)
            }
            Strategy::WaitAndWatch => write!(f, "Suggest: Wait & Watch — Spot is in neutral zone"),
        }
    }
}

/// Pick a strategy; rules are checked top to bottom and the first match wins
///
/// 1. missing support or resistance: not enough data
/// 2. both within `IRON_CONDOR_BAND` of spot: iron condor
/// 3. spot below support: bull call spread
/// 4. spot above resistance: bear put spread
/// 5. otherwise wait and watch
///
/// Support above resistance is not rejected; such inputs go through the same
/// table.
pub fn suggest_strategy(spot: f64, support: Option<f64>, resistance: Option<f64>) -> Strategy {
    let (Some(support), Some(resistance)) = (support, resistance) else {
        return Strategy::NotEnoughData;
    };

    if (support - spot).abs() <= config::IRON_CONDOR_BAND
        && (resistance - spot).abs() <= config::IRON_CONDOR_BAND
    {
        Strategy::IronCondor { support, resistance }
    } else if spot < support {
        Strategy::BullCallSpread { support }
    } else if spot > resistance {
        Strategy::BearPutSpread { resistance }
    } else {
        Strategy::WaitAndWatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_is_inclusive() {
        assert_eq!(
            suggest_strategy(18500.0, Some(18400.0), Some(18600.0)),
            Strategy::IronCondor { support: 18400.0, resistance: 18600.0 }
        );
        assert_eq!(
            suggest_strategy(18500.0, Some(18399.0), Some(18600.0)),
            Strategy::WaitAndWatch
        );
    }

    #[test]
    fn test_zero_strike_is_present() {
        // A zero strike is real data, not a missing level
        assert_ne!(suggest_strategy(50.0, Some(0.0), Some(100.0)), Strategy::NotEnoughData);
    }

    #[test]
    fn test_inverted_levels_follow_table() {
        assert_eq!(
            suggest_strategy(18450.0, Some(18500.0), Some(18400.0)),
            Strategy::IronCondor { support: 18500.0, resistance: 18400.0 }
        );
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(
            Strategy::BearPutSpread { resistance: 18300.0 }.to_string(),
            "Suggest: Bear Put Spread — Spot is above resistance (18300)"
        );
        assert_eq!(
            Strategy::NotEnoughData.to_string(),
            "Not enough data for strategy suggestion."
        );
    }
}
