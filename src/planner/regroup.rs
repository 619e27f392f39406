//! Regrouping of flat, ordered units into numbered groups
//!
//! Weeks are chunked into months (4 per month by default) and months into
//! years (12 per year). Groups are contiguous, keep input order, and are
//! numbered from 1. Only the last group may be short.

use super::types::{Month, Week, Year};

pub const DEFAULT_WEEKS_PER_MONTH: usize = 4;
pub const DEFAULT_MONTHS_PER_YEAR: usize = 12;

/// Split `items` into consecutive groups of `group_size`, paired with their
/// 1-based ordinal. A zero group size is treated as 1.
pub fn chunk_with_ordinals<T>(items: Vec<T>, group_size: usize) -> Vec<(u32, Vec<T>)> {
    let group_size = group_size.max(1);
    let mut groups = Vec::with_capacity(items.len().div_ceil(group_size));
    let mut current = Vec::with_capacity(group_size);

    for item in items {
        current.push(item);
        if current.len() == group_size {
            let ordinal = next_ordinal(groups.len());
            groups.push((ordinal, std::mem::take(&mut current)));
        }
    }

    if !current.is_empty() {
        let ordinal = next_ordinal(groups.len());
        groups.push((ordinal, current));
    }

    groups
}

fn next_ordinal(existing: usize) -> u32 {
    u32::try_from(existing).map_or(u32::MAX, |n| n.saturating_add(1))
}

/// Group a flat week sequence into months. Weeks are renumbered from 1
/// inside each month.
pub fn regroup_by_month(weeks: Vec<Week>, weeks_per_month: usize) -> Vec<Month> {
    chunk_with_ordinals(weeks, weeks_per_month)
        .into_iter()
        .map(|(month, mut weeks)| {
            renumber_weeks(&mut weeks);
            Month {
                month,
                focus: None,
                weeks,
            }
        })
        .collect()
}

/// Group a flat month sequence into years. Month ordinals are left as-is so
/// they keep counting across years.
pub fn regroup_by_year(months: Vec<Month>, months_per_year: usize) -> Vec<Year> {
    chunk_with_ordinals(months, months_per_year)
        .into_iter()
        .map(|(year, months)| Year { year, months })
        .collect()
}

pub fn renumber_weeks(weeks: &mut [Week]) {
    for (idx, week) in weeks.iter_mut().enumerate() {
        week.week = next_ordinal(idx);
    }
}

pub fn renumber_months(months: &mut [Month]) {
    for (idx, month) in months.iter_mut().enumerate() {
        month.month = next_ordinal(idx);
    }
}
