// 🔎 Query Filters - Criteria as Data
// Each filter compares one attribute of a linked close approach against a
// reference value.

use crate::entities::LinkedApproach;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

// ============================================================================
// COMPARISON
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Eq,
    Ge,
    Le,
}

impl Comparison {
    fn holds<T: PartialOrd>(self, value: T, reference: T) -> bool {
        // NaN compares as None: never matches
        match value.partial_cmp(&reference) {
            Some(Ordering::Equal) => true,
            Some(Ordering::Greater) => self == Comparison::Ge,
            Some(Ordering::Less) => self == Comparison::Le,
            None => false,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Eq => "==",
            Comparison::Ge => ">=",
            Comparison::Le => "<=",
        }
    }
}

// ============================================================================
// FILTER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// Calendar date of the approach (time of day ignored)
    Date(Comparison, NaiveDate),
    /// Approach distance in au
    Distance(Comparison, f64),
    /// Approach velocity in km/s
    Velocity(Comparison, f64),
    /// NEO diameter in km; unknown diameters never match
    Diameter(Comparison, f64),
    Hazardous(bool),
}

impl Filter {
    pub fn matches(&self, approach: &LinkedApproach<'_>) -> bool {
        match *self {
            Filter::Date(cmp, date) => cmp.holds(approach.approach().time().date(), date),
            Filter::Distance(cmp, value) => cmp.holds(approach.approach().distance(), value),
            Filter::Velocity(cmp, value) => cmp.holds(approach.approach().velocity(), value),
            Filter::Diameter(cmp, value) => cmp.holds(approach.neo().diameter(), value),
            Filter::Hazardous(wanted) => approach.neo().hazardous() == wanted,
        }
    }
}

/// True when the approach passes every filter (an empty set passes all)
pub fn matches_all(filters: &[Filter], approach: &LinkedApproach<'_>) -> bool {
    filters.iter().all(|f| f.matches(approach))
}

// ============================================================================
// QUERY CRITERIA
// ============================================================================

/// User-facing query options, each optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryCriteria {
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub distance_min: Option<f64>,
    pub distance_max: Option<f64>,
    pub velocity_min: Option<f64>,
    pub velocity_max: Option<f64>,
    pub diameter_min: Option<f64>,
    pub diameter_max: Option<f64>,
    pub hazardous: Option<bool>,
}

impl QueryCriteria {
    /// Turn the set options into filters
    pub fn create_filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();

        if let Some(date) = self.date {
            filters.push(Filter::Date(Comparison::Eq, date));
        }
        if let Some(date) = self.start_date {
            filters.push(Filter::Date(Comparison::Ge, date));
        }
        if let Some(date) = self.end_date {
            filters.push(Filter::Date(Comparison::Le, date));
        }
        if let Some(value) = self.distance_min {
            filters.push(Filter::Distance(Comparison::Ge, value));
        }
        if let Some(value) = self.distance_max {
            filters.push(Filter::Distance(Comparison::Le, value));
        }
        if let Some(value) = self.velocity_min {
            filters.push(Filter::Velocity(Comparison::Ge, value));
        }
        if let Some(value) = self.velocity_max {
            filters.push(Filter::Velocity(Comparison::Le, value));
        }
        if let Some(value) = self.diameter_min {
            filters.push(Filter::Diameter(Comparison::Ge, value));
        }
        if let Some(value) = self.diameter_max {
            filters.push(Filter::Diameter(Comparison::Le, value));
        }
        if let Some(hazardous) = self.hazardous {
            filters.push(Filter::Hazardous(hazardous));
        }

        debug!(count = filters.len(), "built query filters");
        filters
    }
}

/// Take at most `n` items; `None` or `Some(0)` leaves the iterator unlimited
pub fn limit<I: Iterator>(iter: I, n: Option<usize>) -> std::iter::Take<I> {
    match n {
        Some(n) if n > 0 => iter.take(n),
        _ => iter.take(usize::MAX),
    }
}

// ============================================================================
// TESTS
// ============================================================================
