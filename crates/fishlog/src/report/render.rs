use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::parser::{FishingRecord, ParseStats};
use super::{select, RodFilter, SortKey, Summary, ViewMode};

const COLUMNS: [(&str, usize); 7] = [
    ("时间", 10),
    ("鱼竿", 8),
    ("鱼类", 16),
    ("重量", 12),
    ("经验", 12),
    ("耗时", 8),
    ("鱼饵/状态", 16),
];

/// Rendered output for one input.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub source: String,
    /// Serializes as ISO-8601
    pub generated_at: DateTime<Utc>,
    pub view: ViewMode,
    pub from_cache: bool,
    /// Absent when the records came from the cache
    pub stats: Option<ParseStats>,
    pub summary: Summary,
    pub records: Vec<&'a FishingRecord>,
}

impl<'a> Report<'a> {
    pub fn build(
        source: impl Into<String>,
        records: &'a [FishingRecord],
        view: ViewMode,
        sort: SortKey,
        descending: bool,
        rods: &RodFilter,
    ) -> Self {
        Self {
            source: source.into(),
            generated_at: Utc::now(),
            view,
            from_cache: false,
            stats: None,
            summary: Summary::compute(records, rods),
            records: select(records, view, sort, descending, rods),
        }
    }

    pub fn with_stats(mut self, stats: Option<ParseStats>) -> Self {
        self.from_cache = stats.is_none();
        self.stats = stats;
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text rendering for a terminal.
    pub fn to_text(&self) -> String {
        match self.view {
            ViewMode::Summary => render_summary(&self.summary),
            ViewMode::Detail | ViewMode::Lost => render_table(&self.records),
        }
    }
}

pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "总捕获数  {} 条", summary.total_captures);
    let _ = writeln!(out, "总重量    {:.3} kg", summary.total_weight_kg);
    let _ = writeln!(out, "总经验    {} 点", summary.total_exp);
    let _ = writeln!(out, "脱钩数    {} 次", summary.lost_count);
    let _ = writeln!(out, "成功率    {:.1}%", summary.success_rate);

    if !summary.species.is_empty() {
        let _ = writeln!(out);
        pad_right(&mut out, "鱼类", 15);
        pad_left(&mut out, "数量", 8);
        pad_left(&mut out, "总重量", 14);
        let _ = writeln!(out);
        for stat in &summary.species {
            pad_right(&mut out, &stat.fish_name, 15);
            pad_left(&mut out, &format!("{} 条", stat.count), 8);
            pad_left(&mut out, &format!("{:.3} kg", stat.total_weight_kg), 14);
            let _ = writeln!(out);
        }
    }
    out
}

pub fn render_table(records: &[&FishingRecord]) -> String {
    let mut out = String::new();
    for (title, width) in COLUMNS {
        pad_right(&mut out, title, width);
    }
    let _ = writeln!(out);

    for record in records {
        let cells = [
            record.time.clone(),
            format!("鱼竿{}", record.rod_slot),
            record.fish_name.clone(),
            record.formatted_weight(),
            record.formatted_exp(),
            record.cost(),
            record.bait_name.clone(),
        ];
        for (cell, (_, width)) in cells.iter().zip(COLUMNS) {
            pad_right(&mut out, cell, width);
        }
        let _ = writeln!(out);
    }
    out
}

/// Terminal columns taken by `text`. CJK ideographs, kana, hangul and
/// fullwidth forms take two columns, everything else one.
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

fn char_width(c: char) -> usize {
    match c as u32 {
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x20000..=0x3FFFD => 2,
        _ => 1,
    }
}

/// Left-align `cell` in `width` columns. Overlong cells are written as is.
fn pad_right(out: &mut String, cell: &str, width: usize) {
    out.push_str(cell);
    let fill = width.saturating_sub(display_width(cell));
    out.extend(std::iter::repeat(' ').take(fill));
}

fn pad_left(out: &mut String, cell: &str, width: usize) {
    let fill = width.saturating_sub(display_width(cell));
    out.extend(std::iter::repeat(' ').take(fill));
    out.push_str(cell);
}
