use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Amount, Booking, Priority, ServiceProvider};

/// Number of bookings for one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderCount {
    pub provider_name: String,
    pub count: usize,
}

/// Revenue booked with one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRevenue {
    pub provider_name: String,
    pub revenue: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: usize,
}

/// Bookings created on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Catalog averages for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub provider_count: usize,
    pub average_rate: Amount,
    pub average_rating: f64,
}

/// One bucket of the hourly rate histogram. The last bucket includes its
/// upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBin {
    pub lower: Amount,
    pub upper: Amount,
    pub count: usize,
}

/// Folds items into groups keyed by `key`, keeping groups in the order their
/// key first appears.
fn group_in_order<'a, T, K, A>(
    items: &'a [T],
    key: impl Fn(&'a T) -> K,
    mut fold: impl FnMut(&mut A, &'a T),
) -> Vec<(K, A)>
where
    K: PartialEq,
    A: Default,
{
    let mut groups: Vec<(K, A)> = Vec::new();
    for item in items {
        let k = key(item);
        let index = match groups.iter().position(|(existing, _)| *existing == k) {
            Some(index) => index,
            None => {
                groups.push((k, A::default()));
                groups.len() - 1
            }
        };
        fold(&mut groups[index].1, item);
    }
    groups
}

pub fn count_by_provider(bookings: &[Booking]) -> Vec<ProviderCount> {
    group_in_order(bookings, |b| b.provider_name.as_str(), |n: &mut usize, _| *n += 1)
        .into_iter()
        .map(|(name, count)| ProviderCount {
            provider_name: name.to_string(),
            count,
        })
        .collect()
}

pub fn revenue_by_provider(bookings: &[Booking]) -> Vec<ProviderRevenue> {
    group_in_order(
        bookings,
        |b| b.provider_name.as_str(),
        |sum: &mut Amount, b| *sum += b.total_price,
    )
    .into_iter()
    .map(|(name, revenue)| ProviderRevenue {
        provider_name: name.to_string(),
        revenue,
    })
    .collect()
}

pub fn count_by_priority(bookings: &[Booking]) -> Vec<PriorityCount> {
    group_in_order(bookings, |b| b.priority, |n: &mut usize, _| *n += 1)
        .into_iter()
        .map(|(priority, count)| PriorityCount { priority, count })
        .collect()
}

/// Bookings per creation date, oldest first.
pub fn daily_trend(bookings: &[Booking]) -> Vec<DailyCount> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for booking in bookings {
        *days.entry(booking.created_at.date()).or_insert(0) += 1;
    }
    days.into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

pub fn total_revenue(bookings: &[Booking]) -> Amount {
    bookings.iter().map(|b| b.total_price).sum()
}

/// Mean provider rating, `None` for an empty catalog.
pub fn average_rating(catalog: &[ServiceProvider]) -> Option<f64> {
    if catalog.is_empty() {
        return None;
    }
    Some(catalog.iter().map(|p| p.rating).sum::<f64>() / catalog.len() as f64)
}

pub fn category_stats(catalog: &[ServiceProvider]) -> Vec<CategoryStats> {
    #[derive(Default)]
    struct Sums {
        count: usize,
        rate: f64,
        rating: f64,
    }

    group_in_order(
        catalog,
        |p| p.category.as_str(),
        |sums: &mut Sums, p| {
            sums.count += 1;
            sums.rate += p.hourly_rate;
            sums.rating += p.rating;
        },
    )
    .into_iter()
    .map(|(category, sums)| CategoryStats {
        category: category.to_string(),
        provider_count: sums.count,
        average_rate: sums.rate / sums.count as f64,
        average_rating: sums.rating / sums.count as f64,
    })
    .collect()
}

/// Histogram of hourly rates over `bins` equal-width buckets spanning the
/// cheapest to the most expensive provider.
pub fn rate_histogram(catalog: &[ServiceProvider], bins: usize) -> Vec<RateBin> {
    if catalog.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = catalog.iter().map(|p| p.hourly_rate).fold(f64::INFINITY, f64::min);
    let max = catalog
        .iter()
        .map(|p| p.hourly_rate)
        .fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![RateBin {
            lower: min,
            upper: max,
            count: catalog.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut histogram: Vec<RateBin> = (0..bins)
        .map(|i| RateBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for provider in catalog {
        let index = (((provider.hourly_rate - min) / width) as usize).min(bins - 1);
        histogram[index].count += 1;
    }

    histogram
}
