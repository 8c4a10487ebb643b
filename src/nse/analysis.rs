use super::config;
use super::models::{OptionChainRow, OptionLeg, OptionSide};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sharp open interest drop at one strike leg
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrapAlert {
    pub strike_price: f64,
    pub option_type: OptionSide,
    pub pchange_in_oi: f64,
    pub description: String,
}

impl TrapAlert {
    pub fn new(strike_price: f64, option_type: OptionSide, pchange_in_oi: f64) -> Self {
        let description = format!(
            "{} Trap at {} {} — OI dropped {:.1}%",
            option_type.label(),
            strike_price,
            option_type.code(),
            pchange_in_oi
        );
        Self {
            strike_price,
            option_type,
            pchange_in_oi,
            description,
        }
    }
}

impl fmt::Display for TrapAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Traps plus support/resistance inferred from one option chain
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub traps: Vec<TrapAlert>,
    /// Strike with the highest put OI
    pub support: Option<f64>,
    /// Strike with the highest call OI
    pub resistance: Option<f64>,
}

impl AnalysisResult {
    pub fn trap_messages(&self) -> Vec<String> {
        self.traps.iter().map(|t| t.description.clone()).collect()
    }
}

/// Aggregate open interest across complete rows
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct OiSummary {
    pub total_call_oi: f64,
    pub total_put_oi: f64,
    /// Put-call ratio, `None` when there is no call OI
    pub pcr: Option<f64>,
}

/// Running max-OI tracker; strict `>` keeps the first strike on ties
#[derive(Debug, Default)]
struct MaxOi {
    max_oi: f64,
    strike: Option<f64>,
}

impl MaxOi {
    fn observe(&mut self, strike: f64, oi: f64) {
        // First complete row always sets a level, even with zero OI
        if oi > self.max_oi || (self.strike.is_none() && oi >= self.max_oi) {
            self.max_oi = oi;
            self.strike = Some(strike);
        }
    }
}

/// Percentage OI change for a leg, `None` when OI is zero
fn oi_change_pct(leg: &OptionLeg) -> Option<f64> {
    if leg.open_interest > 0.0 {
        Some((leg.change_in_oi / leg.open_interest) * 100.0)
    } else {
        None
    }
}

/// Check trap rule for a single leg (CE or PE)
pub fn check_trap(strike: f64, option_type: OptionSide, leg: &OptionLeg) -> Option<TrapAlert> {
    let pct = oi_change_pct(leg)?;
    if pct < config::TRAP_OI_DROP_PCT {
        Some(TrapAlert::new(strike, option_type, pct))
    } else {
        None
    }
}

/// Scan option chain rows once, in order, collecting traps and max-OI levels
///
/// Rows without both a CE and a PE leg are skipped. No rule reads the spot
/// price yet.
pub fn analyze(rows: &[OptionChainRow], _spot_price: f64) -> AnalysisResult {
    let mut traps = Vec::new();
    let mut support = MaxOi::default();
    let mut resistance = MaxOi::default();

    for row in rows {
        let Some((ce, pe)) = row.legs() else {
            continue;
        };
        let strike = row.strike_price;

        traps.extend(check_trap(strike, OptionSide::Call, ce));
        traps.extend(check_trap(strike, OptionSide::Put, pe));

        support.observe(strike, pe.open_interest);
        resistance.observe(strike, ce.open_interest);
    }

    AnalysisResult {
        traps,
        support: support.strike,
        resistance: resistance.strike,
    }
}

/// Total call/put OI and PCR over complete rows
pub fn summarize_open_interest(rows: &[OptionChainRow]) -> OiSummary {
    let (total_call_oi, total_put_oi) = rows
        .iter()
        .filter_map(|row| row.legs())
        .fold((0.0, 0.0), |(ce_sum, pe_sum), (ce, pe)| {
            (ce_sum + ce.open_interest, pe_sum + pe.open_interest)
        });

    let pcr = (total_call_oi > 0.0).then(|| total_put_oi / total_call_oi);

    OiSummary {
        total_call_oi,
        total_put_oi,
        pcr,
    }
}
