// 🛰️ Close Approach Entity
//
// One flyby of a NEO near Earth. The raw close-approach data is positional:
//
//   0: des   3: cd (calendar date)   4: dist (au)   7: v_rel (km/s)
//
// `RawApproach::from_positions` is the only place that knows these positions;
// everything past the load boundary works with named fields.

use super::{FixedFloat, FloatText, NearEarthObject, NeoId, NeoLookup};
use crate::error::{NeoError, NeoResult};
use crate::temporal::{format_calendar_date, parse_calendar_date};
use chrono::NaiveDateTime;
use std::fmt;

// ============================================================================
// RAW RECORD
// ============================================================================

/// Named form of a fixed-position close-approach record
#[derive(Debug, Clone, PartialEq)]
pub struct RawApproach {
    pub designation: String,
    pub calendar_date: String,
    pub distance: String,
    pub velocity: String,
}

impl RawApproach {
    pub const DESIGNATION: usize = 0;
    pub const CALENDAR_DATE: usize = 3;
    pub const DISTANCE: usize = 4;
    pub const VELOCITY: usize = 7;

    pub fn new(designation: &str, calendar_date: &str, distance: &str, velocity: &str) -> Self {
        RawApproach {
            designation: designation.to_string(),
            calendar_date: calendar_date.to_string(),
            distance: distance.to_string(),
            velocity: velocity.to_string(),
        }
    }

    /// Pick the required positions out of a raw data row.
    ///
    /// A position that is past the end of the row, or `None` (JSON null), is
    /// a malformed record.
    pub fn from_positions(row: &[Option<String>]) -> NeoResult<Self> {
        let at = |position: usize, field: &'static str| -> NeoResult<String> {
            row.get(position)
                .cloned()
                .flatten()
                .ok_or_else(|| {
                    NeoError::malformed(
                        field,
                        "",
                        format!("missing value at position {} (row has {} fields)", position, row.len()),
                    )
                })
        };

        Ok(RawApproach {
            designation: at(Self::DESIGNATION, "des")?,
            calendar_date: at(Self::CALENDAR_DATE, "cd")?,
            distance: at(Self::DISTANCE, "dist")?,
            velocity: at(Self::VELOCITY, "v_rel")?,
        })
    }
}

fn parse_float(field: &'static str, value: &str) -> NeoResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| NeoError::malformed(field, value, e))
}

// ============================================================================
// CLOSE APPROACH ENTITY
// ============================================================================

/// A close approach to Earth by a NEO.
///
/// `foreign_designation` is kept after linking since exports read the
/// designation from here, not from the NEO.
#[derive(Clone, PartialEq)]
pub struct CloseApproach {
    foreign_designation: String,
    time: NaiveDateTime,
    distance: f64,
    velocity: f64,
    neo: Option<NeoId>,
}

impl CloseApproach {
    /// Build an approach from its raw record, optionally already linked
    pub fn new(raw: RawApproach, neo: Option<NeoId>) -> NeoResult<Self> {
        let time = parse_calendar_date(&raw.calendar_date)?;
        let distance = parse_float("dist", &raw.distance)?;
        let velocity = parse_float("v_rel", &raw.velocity)?;

        Ok(CloseApproach {
            foreign_designation: raw.designation,
            time,
            distance,
            velocity,
            neo,
        })
    }

    pub fn foreign_designation(&self) -> &str {
        &self.foreign_designation
    }

    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    /// Approach time as "YYYY-Mon-DD HH:MM"
    pub fn time_str(&self) -> String {
        format_calendar_date(&self.time)
    }

    /// Nominal approach distance in au
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Relative approach velocity in km/s
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn neo(&self) -> Option<NeoId> {
        self.neo
    }

    pub fn is_linked(&self) -> bool {
        self.neo.is_some()
    }

    /// Set the NEO reference. Only allowed once.
    pub fn link(&mut self, neo: NeoId) -> NeoResult<()> {
        if self.neo.is_some() {
            return Err(NeoError::AlreadyLinked {
                designation: self.foreign_designation.clone(),
            });
        }
        self.neo = Some(neo);
        Ok(())
    }

    /// Resolve the NEO reference.
    ///
    /// Fails with `UnlinkedApproach` when the approach has no NEO, or when the
    /// id does not resolve in `neos`.
    pub fn linked<'a, L>(&'a self, neos: &'a L) -> NeoResult<LinkedApproach<'a>>
    where
        L: NeoLookup + ?Sized,
    {
        let neo = self
            .neo
            .and_then(|id| neos.neo(id))
            .ok_or_else(|| NeoError::UnlinkedApproach {
                designation: self.foreign_designation.clone(),
                time: self.time_str(),
            })?;

        Ok(LinkedApproach {
            approach: self,
            neo,
        })
    }

    /// Human-readable summary; requires a linked NEO
    pub fn summary<L: NeoLookup + ?Sized>(&self, neos: &L) -> NeoResult<String> {
        Ok(self.linked(neos)?.to_string())
    }
}

impl fmt::Debug for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseApproach")
            .field("time", &self.time_str())
            .field("distance", &FixedFloat(self.distance, 2))
            .field("velocity", &FixedFloat(self.velocity, 2))
            .field("neo", &self.neo)
            .finish()
    }
}

// ============================================================================
// LINKED VIEW
// ============================================================================

/// A close approach together with its resolved NEO
#[derive(Clone, Copy)]
pub struct LinkedApproach<'a> {
    approach: &'a CloseApproach,
    neo: &'a NearEarthObject,
}

impl<'a> LinkedApproach<'a> {
    pub fn approach(&self) -> &'a CloseApproach {
        self.approach
    }

    pub fn neo(&self) -> &'a NearEarthObject {
        self.neo
    }
}

impl fmt::Display for LinkedApproach<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "On {}, {} approaches Earth at a distance of {} au and a velocity of {} km/s.",
            self.approach.time_str(),
            self.neo.fullname(),
            FloatText(self.approach.distance),
            FloatText(self.approach.velocity)
        )
    }
}

impl fmt::Debug for LinkedApproach<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseApproach")
            .field("time", &self.approach.time_str())
            .field("distance", &FixedFloat(self.approach.distance, 2))
            .field("velocity", &FixedFloat(self.approach.velocity, 2))
            .field("neo", self.neo)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
