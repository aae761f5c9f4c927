//! Rule Model (C1): parses and validates the rule file, exposes
//! per-day capacity and per-label weight lookups.

use std::path::Path;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Per-day task weight budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Capacity {
    Flat(i64),
    PerWeekday(WeekdayCapacity),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekdayCapacity {
    pub monday: i64,
    pub tuesday: i64,
    pub wednesday: i64,
    pub thursday: i64,
    pub friday: i64,
    pub saturday: i64,
    pub sunday: i64,
}

impl Capacity {
    /// The largest capacity across any day, used to pre-flight-validate
    /// rule weights before any task is fetched.
    pub fn ceiling(&self) -> i64 {
        match self {
            Capacity::Flat(c) => *c,
            Capacity::PerWeekday(w) => [
                w.monday,
                w.tuesday,
                w.wednesday,
                w.thursday,
                w.friday,
                w.saturday,
                w.sunday,
            ]
            .into_iter()
            .max()
            .unwrap_or(0),
        }
    }

    pub fn capacity_for(&self, date: NaiveDate) -> i64 {
        match self {
            Capacity::Flat(c) => *c,
            Capacity::PerWeekday(w) => match date.weekday() {
                Weekday::Mon => w.monday,
                Weekday::Tue => w.tuesday,
                Weekday::Wed => w.wednesday,
                Weekday::Thu => w.thursday,
                Weekday::Fri => w.friday,
                Weekday::Sat => w.saturday,
                Weekday::Sun => w.sunday,
            },
        }
    }
}

/// A single classification rule: a label filter and its cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub filter: String,
    #[serde(default)]
    pub weight: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl Rule {
    /// The label key this rule matches against, i.e. `filter` with its
    /// leading `@` stripped.
    pub fn label(&self) -> &str {
        self.filter.strip_prefix('@').unwrap_or(&self.filter)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScheduleConfigFile {
    max_weight: Capacity,
    #[serde(default)]
    rules: Vec<Rule>,
}

/// Validated rule set, ready to be queried by the planner.
#[derive(Debug, Clone)]
pub struct RuleSet {
    capacity: Capacity,
    rules: Vec<Rule>,
}

const DEFAULT_CAPACITY: i64 = 10;

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            capacity: Capacity::Flat(DEFAULT_CAPACITY),
            rules: Vec::new(),
        }
    }
}

impl RuleSet {
    /// Load and validate a rule set from a path. `None` (or a path that
    /// doesn't exist) yields the default: capacity 10 every day, no
    /// rules, so every task is classified at weight 0.
    pub fn load(path: Option<&Path>) -> Result<Self, RuleError> {
        let Some(path) = path else {
            tracing::info!("no rule file provided, using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::info!(path = %path.display(), "rule file not found, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| RuleError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let parsed: ScheduleConfigFile =
            serde_json::from_str(&raw).map_err(|source| RuleError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        Self::from_parts(parsed.max_weight, parsed.rules)
    }

    pub fn from_parts(capacity: Capacity, rules: Vec<Rule>) -> Result<Self, RuleError> {
        let capacity_valid = match &capacity {
            Capacity::Flat(c) => *c > 0,
            Capacity::PerWeekday(w) => [
                w.monday,
                w.tuesday,
                w.wednesday,
                w.thursday,
                w.friday,
                w.saturday,
                w.sunday,
            ]
            .into_iter()
            .all(|day| day >= 0),
        };
        if !capacity_valid {
            return Err(RuleError::InvalidCapacity);
        }

        for (index, rule) in rules.iter().enumerate() {
            if rule.filter.trim().is_empty() {
                return Err(RuleError::EmptyFilter { index });
            }
            if let Some(weight) = rule.weight {
                if weight <= 0 {
                    return Err(RuleError::NonPositiveWeight { index, weight });
                }
            }
            if let Some(limit) = rule.limit {
                if limit <= 0 {
                    return Err(RuleError::NonPositiveLimit { index, limit });
                }
            }
        }

        let ceiling = capacity.ceiling();
        for rule in &rules {
            if let Some(weight) = rule.weight {
                if weight > ceiling {
                    return Err(RuleError::WeightExceedsCapacity {
                        filter: rule.filter.clone(),
                        weight,
                        ceiling,
                    });
                }
            }
        }

        tracing::info!(rule_count = rules.len(), cap_ceiling = ceiling, "rules validated");

        Ok(Self { capacity, rules })
    }

    pub fn capacity_for(&self, date: NaiveDate) -> i64 {
        self.capacity.capacity_for(date)
    }

    pub fn cap_ceiling(&self) -> i64 {
        self.capacity.ceiling()
    }

    /// Whether any classification rules are configured. When empty every
    /// task is included at weight 0.
    pub fn has_rules(&self) -> bool {
        !self.rules.is_empty()
    }

    /// The weight for the first rule (in rule-file order) matching this
    /// label, if any. Rules lacking a `weight` are ignored here — they
    /// contribute nothing to classification.
    pub fn weight_for(&self, label: &str) -> Option<u32> {
        self.rules
            .iter()
            .find(|rule| rule.label() == label && rule.weight.is_some())
            .and_then(|rule| rule.weight)
            .map(|w| w as u32)
    }
}
