//! Transform configuration.

use chrono::NaiveDate;

/// Normalization ceiling for housing_buy `median_days`.
pub const DEFAULT_HOUSING_BUY_DAYS_MAX: i64 = 420;

/// Normalization ceiling for housing_buy `permission_count`.
pub const DEFAULT_HOUSING_BUY_PERMISSION_MAX: i64 = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    pub housing_buy_days_max: i64,
    pub housing_buy_permission_max: i64,
    /// Stamped into `generated_at`.
    pub today: NaiveDate,
}

impl TransformOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            housing_buy_days_max: DEFAULT_HOUSING_BUY_DAYS_MAX,
            housing_buy_permission_max: DEFAULT_HOUSING_BUY_PERMISSION_MAX,
            today,
        }
    }

    #[must_use]
    pub fn with_housing_buy_days_max(mut self, days_max: i64) -> Self {
        self.housing_buy_days_max = days_max;
        self
    }

    #[must_use]
    pub fn with_housing_buy_permission_max(mut self, permission_max: i64) -> Self {
        self.housing_buy_permission_max = permission_max;
        self
    }
}
