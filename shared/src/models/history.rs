//! Summary figures for the roast history page

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BeanRecord, RoastRecord};

/// Headline numbers over every stored roast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryStats {
    pub total_roasts: usize,
    /// Mean weight loss, two decimal places; `None` with no roasts
    pub average_weight_loss_percent: Option<Decimal>,
    /// Name of the most roasted bean; ties go to the alphabetically first
    pub favorite_bean: Option<String>,
}

pub fn summarize_history(roasts: &[RoastRecord], beans: &[BeanRecord]) -> HistoryStats {
    let average_weight_loss_percent = if roasts.is_empty() {
        None
    } else {
        let total: Decimal = roasts.iter().map(RoastRecord::weight_loss_percent).sum();
        Some((total / Decimal::from(roasts.len())).round_dp(2))
    };

    let mut counts: HashMap<Uuid, usize> = HashMap::new();
    for roast in roasts {
        *counts.entry(roast.bean_id).or_default() += 1;
    }

    let favorite_bean = beans
        .iter()
        .filter_map(|bean| counts.get(&bean.id).map(|count| (*count, bean.name.as_str())))
        .max_by(|(count_a, name_a), (count_b, name_b)| {
            count_a.cmp(count_b).then_with(|| name_b.cmp(name_a))
        })
        .map(|(_, name)| name.to_string());

    HistoryStats {
        total_roasts: roasts.len(),
        average_weight_loss_percent,
        favorite_bean,
    }
}
