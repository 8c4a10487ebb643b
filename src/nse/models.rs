use serde::{Deserialize, Serialize};

/// Top-level response from the NSE option-chain-indices API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionChainResponse {
    pub records: Records,
}

/// Records section with every strike row and the spot price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Records {
    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(rename = "underlyingValue")]
    pub underlying_value: f64,

    #[serde(default)]
    pub data: Vec<OptionChainRow>,
}

/// One strike's combined call/put data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionChainRow {
    #[serde(rename = "strikePrice")]
    pub strike_price: f64,

    #[serde(rename = "CE", default)]
    pub call: Option<OptionLeg>,

    #[serde(rename = "PE", default)]
    pub put: Option<OptionLeg>,
}

/// Open interest figures for a CE or PE leg
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OptionLeg {
    #[serde(rename = "openInterest", default)]
    pub open_interest: f64,

    #[serde(rename = "changeinOpenInterest", default)]
    pub change_in_oi: f64,
}

impl OptionLeg {
    pub fn new(open_interest: f64, change_in_oi: f64) -> Self {
        Self { open_interest, change_in_oi }
    }
}

impl OptionChainRow {
    pub fn new(strike_price: f64, call: Option<OptionLeg>, put: Option<OptionLeg>) -> Self {
        Self { strike_price, call, put }
    }

    /// Both legs, or `None` when the row is incomplete
    pub fn legs(&self) -> Option<(&OptionLeg, &OptionLeg)> {
        Some((self.call.as_ref()?, self.put.as_ref()?))
    }
}

/// Rows and spot price from one fetch cycle
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OptionChainSnapshot {
    pub rows: Vec<OptionChainRow>,
    pub spot_price: f64,
    pub timestamp: Option<String>,
}

impl OptionChainSnapshot {
    /// The `([], 0)` result handed back when a fetch fails
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<OptionChainResponse> for OptionChainSnapshot {
    fn from(response: OptionChainResponse) -> Self {
        let Records { timestamp, underlying_value, data } = response.records;
        Self {
            rows: data,
            spot_price: underlying_value,
            timestamp,
        }
    }
}

/// Which leg of a strike row an alert refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OptionSide {
    #[serde(rename = "CE")]
    Call,
    #[serde(rename = "PE")]
    Put,
}

impl OptionSide {
    pub fn code(&self) -> &'static str {
        match self {
            OptionSide::Call => "CE",
            OptionSide::Put => "PE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OptionSide::Call => "Call",
            OptionSide::Put => "Put",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nse_payload() {
        let body = r#"{
            "records": {
                "timestamp": "19-Oct-2026 15:30:00",
                "underlyingValue": 18450.35,
                "data": [
                    {"strikePrice": 18400, "expiryDate": "30-Oct-2026",
                     "CE": {"openInterest": 1200, "changeinOpenInterest": -300, "lastPrice": 110.5},
                     "PE": {"openInterest": 5400, "changeinOpenInterest": 800}},
                    {"strikePrice": 18500, "CE": {"openInterest": 900, "changeinOpenInterest": 10}}
                ]
            },
            "filtered": {"data": []}
        }"#;

        let response: OptionChainResponse = serde_json::from_str(body).unwrap();
        let snapshot = OptionChainSnapshot::from(response);

        assert_eq!(snapshot.spot_price, 18450.35);
        assert_eq!(snapshot.timestamp.as_deref(), Some("19-Oct-2026 15:30:00"));
        assert_eq!(snapshot.rows.len(), 2);
        assert_eq!(snapshot.rows[0].call, Some(OptionLeg::new(1200.0, -300.0)));
        assert!(snapshot.rows[0].legs().is_some());
        assert!(snapshot.rows[1].put.is_none());
        assert!(snapshot.rows[1].legs().is_none());
    }

    #[test]
    fn test_missing_records_is_error() {
        let result: Result<OptionChainResponse, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = OptionChainSnapshot::empty();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.spot_price, 0.0);
    }
}
