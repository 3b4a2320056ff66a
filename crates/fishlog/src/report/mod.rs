//! Report — views, sorting, rod filtering and rendering over parsed records.

pub mod summary;
pub mod render;

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};

use crate::parser::FishingRecord;

pub use summary::{SpeciesStat, Summary};
pub use render::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Aggregate totals and per-species table
    #[default]
    Summary,
    /// Capture records only
    Detail,
    /// Lost records only
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Keep finalization order
    #[default]
    None,
    Weight,
    Exp,
}

/// Rod selection. Empty means every rod.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RodFilter {
    rods: BTreeSet<u32>,
}

impl RodFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only<I: IntoIterator<Item = u32>>(rods: I) -> Self {
        Self {
            rods: rods.into_iter().collect(),
        }
    }

    #[inline]
    pub fn allows(&self, rod: u32) -> bool {
        self.rods.is_empty() || self.rods.contains(&rod)
    }
}

/// Select and order the records shown by a list view.
///
/// Detail shows captures, lost shows losses; the summary view has no list
/// and returns nothing. Experience sorting only applies to the detail view.
/// Sorting is stable, so equal keys keep finalization order.
pub fn select<'a>(
    records: &'a [FishingRecord],
    view: ViewMode,
    sort: SortKey,
    descending: bool,
    rods: &RodFilter,
) -> Vec<&'a FishingRecord> {
    let mut selected: Vec<&FishingRecord> = match view {
        ViewMode::Summary => return Vec::new(),
        ViewMode::Detail => records.iter().filter(|r| !r.is_lost()).collect(),
        ViewMode::Lost => records.iter().filter(|r| r.is_lost()).collect(),
    };
    selected.retain(|r| rods.allows(r.rod_slot));

    match (sort, view) {
        (SortKey::Weight, _) => {
            selected.sort_by(|a, b| {
                let ord = a.weight_kg.total_cmp(&b.weight_kg);
                if descending { ord.reverse() } else { ord }
            });
        }
        (SortKey::Exp, ViewMode::Detail) => {
            selected.sort_by(|a, b| {
                let ord = a.exp_points.cmp(&b.exp_points);
                if descending { ord.reverse() } else { ord }
            });
        }
        _ => {}
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LogParser;

    const LOG: &str = "\
10:00 : 捕获：鱼竿:1,【鲤鱼】2公斤,总经验:10,耗时:5秒,鱼饵:蚯蚓
10:01 : 捕获：鱼竿:2,【草鱼】3公斤,总经验:30,耗时:6秒,鱼饵:玉米
10:02 : 鱼上钩了！鱼竿：3，鱼信息:【黑鱼】1kg
10:03 : 鱼脱钩了！鱼竿：3
10:04 : 捕获：鱼竿:3,【鲫鱼】500克,总经验:20,耗时:7秒,鱼饵:面包
10:05 : 鱼脱钩了！鱼竿：1";

    fn names(records: &[&FishingRecord]) -> Vec<String> {
        records.iter().map(|r| r.fish_name.clone()).collect()
    }

    #[test]
    fn test_detail_view_in_order() {
        let records = LogParser::new().parse(LOG);
        let view = select(&records, ViewMode::Detail, SortKey::None, true, &RodFilter::all());
        assert_eq!(names(&view), vec!["鲤鱼", "草鱼", "鲫鱼"]);
    }

    #[test]
    fn test_detail_sorted_by_weight() {
        let records = LogParser::new().parse(LOG);
        let desc = select(&records, ViewMode::Detail, SortKey::Weight, true, &RodFilter::all());
        assert_eq!(names(&desc), vec!["草鱼", "鲤鱼", "鲫鱼"]);
        let asc = select(&records, ViewMode::Detail, SortKey::Weight, false, &RodFilter::all());
        assert_eq!(names(&asc), vec!["鲫鱼", "鲤鱼", "草鱼"]);
    }

    #[test]
    fn test_detail_sorted_by_exp() {
        let records = LogParser::new().parse(LOG);
        let desc = select(&records, ViewMode::Detail, SortKey::Exp, true, &RodFilter::all());
        assert_eq!(names(&desc), vec!["草鱼", "鲫鱼", "鲤鱼"]);
    }

    #[test]
    fn test_lost_view_ignores_exp_sort() {
        let records = LogParser::new().parse(LOG);
        let view = select(&records, ViewMode::Lost, SortKey::Exp, true, &RodFilter::all());
        assert_eq!(names(&view), vec!["黑鱼", "?"]);
    }

    #[test]
    fn test_rod_filter() {
        let records = LogParser::new().parse(LOG);
        let rods = RodFilter::only([1, 3]);
        let view = select(&records, ViewMode::Detail, SortKey::None, true, &rods);
        assert_eq!(names(&view), vec!["鲤鱼", "鲫鱼"]);
        assert!(rods.allows(3));
        assert!(!rods.allows(2));
        assert!(RodFilter::all().allows(99));
    }

    #[test]
    fn test_summary_view_has_no_rows() {
        let records = LogParser::new().parse(LOG);
        assert!(select(&records, ViewMode::Summary, SortKey::Weight, true, &RodFilter::all()).is_empty());
    }
}
