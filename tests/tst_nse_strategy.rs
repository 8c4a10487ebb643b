use nifty_trap_detector::nse::{suggest_strategy, Strategy};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_levels() {
        assert_eq!(suggest_strategy(18000.0, None, Some(18100.0)), Strategy::NotEnoughData);
        assert_eq!(suggest_strategy(18000.0, Some(18100.0), None), Strategy::NotEnoughData);
        assert_eq!(
            suggest_strategy(18000.0, None, None).to_string(),
            "Not enough data for strategy suggestion."
        );
    }

    #[test]
    fn test_neutral_zone() {
        let strategy = suggest_strategy(18450.0, Some(18000.0), Some(18500.0));
        assert_eq!(strategy, Strategy::WaitAndWatch);
        assert_eq!(strategy.to_string(), "Suggest: Wait & Watch — Spot is in neutral zone");
    }

    #[test]
    fn test_iron_condor() {
        let strategy = suggest_strategy(18450.0, Some(18400.0), Some(18500.0));
        assert_eq!(strategy.to_string(), "Suggest: Iron Condor between **18400 - 18500**");
    }

    #[test]
    fn test_iron_condor_takes_precedence() {
        assert_eq!(
            suggest_strategy(100.0, Some(50.0), Some(150.0)),
            Strategy::IronCondor { support: 50.0, resistance: 150.0 }
        );
    }

    #[test]
    fn test_bull_call_spread() {
        let strategy = suggest_strategy(18400.0, Some(18500.0), Some(18600.0));
        assert_eq!(strategy, Strategy::BullCallSpread { support: 18500.0 });
        assert_eq!(
            strategy.to_string(),
            "Suggest: Bull Call Spread — Spot is below support (18500)"
        );
    }

    #[test]
    fn test_bear_put_spread() {
        let strategy = suggest_strategy(18800.0, Some(18000.0), Some(18500.0));
        assert_eq!(
            strategy.to_string(),
            "Suggest: Bear Put Spread — Spot is above resistance (18500)"
        );
    }
}
