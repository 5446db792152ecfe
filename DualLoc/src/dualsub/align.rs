//! Page-count alignment between the two tracks

use std::collections::VecDeque;

use super::page::{Page, TimeSpan, structural};
use crate::error::Result;

/// Choose which pages of `pages` to fold into their successor.
///
/// When `reference` has at least two pages, every page boundary of `pages`
/// (the end time of each page but the last) is scored by its distance to the
/// nearest boundary in `reference`. The `joins` boundaries farthest from any
/// reference boundary are picked; equal scores keep their original order and
/// the later ones win. Otherwise the first `joins` boundaries are picked.
///
/// The returned indices are ascending.
pub fn join_candidates(pages: &[Page], reference: &[Page], joins: usize) -> Result<Vec<usize>> {
    if reference.len() < 2 {
        return Ok((0..joins).collect());
    }

    let ends = boundaries(pages)?;
    let reference_ends = boundaries(reference)?;

    let distances: Vec<f64> = ends
        .iter()
        .map(|&end| {
            reference_ends
                .iter()
                .map(|&r| (end - r).abs())
                .fold(f64::INFINITY, f64::min)
        })
        .collect();

    let mut order: Vec<usize> = (0..distances.len()).collect();
    order.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));

    let mut picked = order[order.len().saturating_sub(joins)..].to_vec();
    picked.sort_unstable();
    Ok(picked)
}

/// Fold `joins` adjacent page pairs of `pages` so it lines up with `reference`.
///
/// A folded page keeps the start of the first page and the end of the second;
/// their texts are concatenated.
pub fn join_pages(pages: &mut Vec<Page>, reference: &[Page], joins: usize) -> Result<()> {
    let mut remaining: VecDeque<usize> = join_candidates(pages, reference, joins)?.into();
    tracing::debug!(
        "joining {} of {} pages at {:?}",
        joins,
        pages.len(),
        remaining
    );

    while let Some(index) = remaining.pop_front() {
        if index + 1 >= pages.len() {
            return Err(structural(format!(
                "cannot join page {index} of {}",
                pages.len()
            )));
        }
        let next = pages.remove(index + 1);
        let page = &mut pages[index];
        page.tag = TimeSpan::join_tags(&page.tag, &next.tag)?;
        page.text.push_str(&next.text);

        for candidate in &mut remaining {
            if *candidate > index {
                *candidate -= 1;
            }
        }
    }
    Ok(())
}

/// End times of every page except the last
fn boundaries(pages: &[Page]) -> Result<Vec<f64>> {
    let inner = pages.split_last().map_or(&[][..], |(_, rest)| rest);
    inner.iter().map(Page::end_seconds).collect()
}
