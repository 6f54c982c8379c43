use serde::{Deserialize, Serialize};

use crate::labels::LabelSet;
use crate::recording::RecordingRule;

/// Alert rule as the rule-evaluation backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireAlertRule {
    pub alert: String,
    pub expr: String,
    #[serde(rename = "for", default)]
    pub for_duration: String,
    #[serde(default)]
    pub labels: LabelSet,
    #[serde(default)]
    pub annotations: LabelSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireRule {
    Recording(RecordingRule),
    Alert(WireAlertRule),
}

impl WireRule {
    pub fn name(&self) -> &str {
        match self {
            Self::Recording(r) => &r.record,
            Self::Alert(a) => &a.alert,
        }
    }

    pub fn expr(&self) -> &str {
        match self {
            Self::Recording(r) => &r.expr,
            Self::Alert(a) => &a.expr,
        }
    }
}

impl From<RecordingRule> for WireRule {
    fn from(r: RecordingRule) -> Self {
        Self::Recording(r)
    }
}

impl From<WireAlertRule> for WireRule {
    fn from(a: WireAlertRule) -> Self {
        Self::Alert(a)
    }
}

/// A named group of rules, the unit a ruler stores per namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleGroup {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<WireRule>,
}
