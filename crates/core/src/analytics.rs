//! Marketing channel aggregates: ROI, totals and rankings.

use crate::constants::{DEFAULT_RANKING_LIMIT, MAX_RANKING_LIMIT};
use crate::format::round_one_decimal;
use api_shared::{ChannelPerformance, ChannelRanking, ChannelTotals, MarketingChannel};
use std::cmp::Ordering;

/// Return on spend as a percentage, one decimal place.
///
/// `(avg_ltv * conversions - cost) / cost * 100`; `None` when the channel cost nothing.
pub fn roi(channel: &MarketingChannel) -> Option<f64> {
    if channel.cost_incurred == 0.0 {
        return None;
    }
    let revenue = channel.avg_ltv * channel.conversions as f64;
    Some(round_one_decimal(
        (revenue - channel.cost_incurred) / channel.cost_incurred * 100.0,
    ))
}

pub fn channel_performance(channels: &[MarketingChannel]) -> Vec<ChannelPerformance> {
    channels
        .iter()
        .map(|channel| ChannelPerformance {
            roi: roi(channel),
            metrics: channel.clone(),
        })
        .collect()
}

pub fn channel_totals(channels: &[MarketingChannel]) -> ChannelTotals {
    let leads: u64 = channels.iter().map(|c| c.leads).sum();
    let conversions: u64 = channels.iter().map(|c| c.conversions).sum();
    let cost_incurred: f64 = channels.iter().map(|c| c.cost_incurred).sum();
    let conversion_rate = if leads == 0 {
        0.0
    } else {
        round_one_decimal(conversions as f64 / leads as f64 * 100.0)
    };

    ChannelTotals {
        leads,
        conversions,
        cost_incurred,
        conversion_rate,
    }
}

/// Clamp a requested ranking size into `1..=MAX_RANKING_LIMIT`.
pub fn ranking_limit(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_RANKING_LIMIT)
        .clamp(1, MAX_RANKING_LIMIT)
}

/// The `limit` best channels by `by`, best first. Channels without an ROI rank last.
pub fn top_channels(
    channels: &[MarketingChannel],
    by: ChannelRanking,
    limit: usize,
) -> Vec<ChannelPerformance> {
    let mut ranked = channel_performance(channels);
    match by {
        ChannelRanking::Roi => ranked.sort_by(|a, b| compare_roi_desc(a.roi, b.roi)),
        ChannelRanking::Leads => ranked.sort_by(|a, b| b.metrics.leads.cmp(&a.metrics.leads)),
    }
    ranked.truncate(limit);
    ranked
}

fn compare_roi_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
