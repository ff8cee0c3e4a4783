// Entity Models
//
// NEOs and close approaches reference each other without owning each other:
// the database owns both arenas and the cross references are index ids.
//
// - `NearEarthObject::approaches` holds `ApproachId`s (append-only)
// - `CloseApproach::neo` holds an optional `NeoId` (set once by the linker)
// - `NeoLookup` resolves a `NeoId` back into a `&NearEarthObject`

pub mod approach;
pub mod neo;

pub use approach::{CloseApproach, LinkedApproach, RawApproach};
pub use neo::{NearEarthObject, RawNeo};

use std::fmt;

/// Position of a NEO in the owning arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeoId(usize);

impl NeoId {
    pub const fn new(index: usize) -> Self {
        NeoId(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

/// Position of a close approach in the owning arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApproachId(usize);

impl ApproachId {
    pub const fn new(index: usize) -> Self {
        ApproachId(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

/// Resolves non-owning NEO references
pub trait NeoLookup {
    fn neo(&self, id: NeoId) -> Option<&NearEarthObject>;
}

impl NeoLookup for [NearEarthObject] {
    fn neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.get(id.index())
    }
}

impl NeoLookup for Vec<NearEarthObject> {
    fn neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.as_slice().neo(id)
    }
}

// ============================================================================
// FLOAT TEXT
// ============================================================================

/// Float as it reads in summaries: whole numbers keep `.0`, NaN is `nan`
#[derive(Clone, Copy)]
pub struct FloatText(pub f64);

impl fmt::Display for FloatText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            f.write_str("nan")
        } else {
            write!(f, "{:?}", self.0)
        }
    }
}

/// Float rounded to a fixed number of decimals, NaN as `nan`
#[derive(Clone, Copy)]
pub struct FixedFloat(pub f64, pub usize);

impl fmt::Debug for FixedFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            f.write_str("nan")
        } else {
            write!(f, "{:.*}", self.1, self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_text() {
        assert_eq!(FloatText(1.0).to_string(), "1.0");
        assert_eq!(FloatText(5.0).to_string(), "5.0");
        assert_eq!(FloatText(16.84).to_string(), "16.84");
        assert_eq!(FloatText(0.1534).to_string(), "0.1534");
        assert_eq!(FloatText(f64::NAN).to_string(), "nan");
    }

    #[test]
    fn test_fixed_float() {
        assert_eq!(format!("{:?}", FixedFloat(16.84, 3)), "16.840");
        assert_eq!(format!("{:?}", FixedFloat(5.0, 2)), "5.00");
        assert_eq!(format!("{:?}", FixedFloat(f64::NAN, 3)), "nan");
    }
}
