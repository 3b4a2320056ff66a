use std::collections::HashMap;

use serde::Serialize;

use crate::parser::FishingRecord;
use super::RodFilter;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesStat {
    pub fish_name: String,
    pub count: u64,
    pub total_weight_kg: f64,
}

/// Aggregates over the records of the selected rods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_captures: u64,
    pub total_weight_kg: f64,
    pub total_exp: u64,
    pub lost_count: u64,
    /// Percentage of finished attempts that were captures
    pub success_rate: f64,
    /// Captured species, heaviest total first
    pub species: Vec<SpeciesStat>,
}

impl Summary {
    pub fn compute(records: &[FishingRecord], rods: &RodFilter) -> Self {
        let mut total_captures = 0u64;
        let mut total_weight_kg = 0.0f64;
        let mut total_exp = 0u64;
        let mut lost_count = 0u64;

        let mut by_species: HashMap<&str, (u64, f64)> = HashMap::new();
        // first-seen order, so ties stay deterministic
        let mut seen: Vec<&str> = Vec::new();

        for record in records.iter().filter(|r| rods.allows(r.rod_slot)) {
            if record.is_lost() {
                lost_count += 1;
                continue;
            }

            total_captures += 1;
            total_weight_kg += record.weight_kg;
            total_exp += record.exp_points;

            let entry = by_species.entry(record.fish_name.as_str()).or_insert_with(|| {
                seen.push(record.fish_name.as_str());
                (0, 0.0)
            });
            entry.0 += 1;
            entry.1 += record.weight_kg;
        }

        let mut species: Vec<SpeciesStat> = seen
            .into_iter()
            .filter_map(|name| {
                by_species.get(name).map(|(count, weight)| SpeciesStat {
                    fish_name: name.to_string(),
                    count: *count,
                    total_weight_kg: *weight,
                })
            })
            .collect();
        species.sort_by(|a, b| b.total_weight_kg.total_cmp(&a.total_weight_kg));

        let attempts = total_captures + lost_count;
        let success_rate = if attempts > 0 {
            total_captures as f64 / attempts as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_captures,
            total_weight_kg,
            total_exp,
            lost_count,
            success_rate,
            species,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_captures == 0 && self.lost_count == 0
    }
}
