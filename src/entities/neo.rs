// ☄️ Near-Earth Object Entity
//
// One NEO from the catalog, normalized from its raw CSV record:
// - empty name → None (never an empty string in memory)
// - empty diameter → NaN ("unknown")
// - hazardous only when the flag is exactly "Y"

use super::{ApproachId, FixedFloat, FloatText};
use crate::error::{NeoError, NeoResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// RAW RECORD
// ============================================================================

/// RawNeo - keyed record as it appears in the NEO catalog CSV
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNeo {
    /// Primary designation
    pub pdes: String,

    #[serde(default)]
    pub name: String,

    /// Diameter in km, empty when unknown
    #[serde(default)]
    pub diameter: String,

    /// Potentially hazardous flag ("Y" / "N" / "")
    #[serde(default)]
    pub pha: String,
}

impl RawNeo {
    pub fn new(pdes: &str, name: &str, diameter: &str, pha: &str) -> Self {
        RawNeo {
            pdes: pdes.to_string(),
            name: name.to_string(),
            diameter: diameter.to_string(),
            pha: pha.to_string(),
        }
    }
}

// ============================================================================
// NEO ENTITY
// ============================================================================

/// A near-Earth object.
///
/// Identity is the primary designation, which never changes after
/// construction. The only mutation afterwards is the linker appending
/// approach back-references.
#[derive(Clone, PartialEq)]
pub struct NearEarthObject {
    designation: String,
    name: Option<String>,
    diameter: f64,
    hazardous: bool,
    approaches: Vec<ApproachId>,
}

impl NearEarthObject {
    /// Build a NEO from its raw catalog record
    pub fn new(raw: RawNeo) -> NeoResult<Self> {
        if raw.pdes.is_empty() {
            return Err(NeoError::malformed(
                "pdes",
                raw.pdes,
                "designation must not be empty",
            ));
        }

        let name = if raw.name.is_empty() {
            None
        } else {
            Some(raw.name)
        };

        let diameter = if raw.diameter.is_empty() {
            f64::NAN
        } else {
            raw.diameter
                .trim()
                .parse::<f64>()
                .map_err(|e| NeoError::malformed("diameter", raw.diameter.as_str(), e))?
        };

        // Case-sensitive on purpose: "y" is not hazardous
        let hazardous = raw.pha == "Y";

        Ok(NearEarthObject {
            designation: raw.pdes,
            name,
            diameter,
            hazardous,
            approaches: Vec::new(),
        })
    }

    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Diameter in km, NaN when unknown
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// False when the catalog had no diameter
    pub fn has_known_diameter(&self) -> bool {
        !self.diameter.is_nan()
    }

    pub fn hazardous(&self) -> bool {
        self.hazardous
    }

    pub fn approaches(&self) -> &[ApproachId] {
        &self.approaches
    }

    /// "designation (name)", or the designation alone for unnamed NEOs
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.designation, name),
            None => self.designation.clone(),
        }
    }

    /// Append a close-approach back-reference (linker only)
    pub(crate) fn push_approach(&mut self, approach: ApproachId) {
        self.approaches.push(approach);
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hazard = if self.hazardous {
            "potentially hazardous."
        } else {
            "not potentially hazardous."
        };
        write!(
            f,
            "NEO {} has a diameter of {} km and is {}",
            self.fullname(),
            FloatText(self.diameter),
            hazard
        )
    }
}

impl fmt::Debug for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NearEarthObject")
            .field("designation", &self.designation)
            .field("name", &self.name)
            .field("diameter", &FixedFloat(self.diameter, 3))
            .field("hazardous", &self.hazardous)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn eros() -> NearEarthObject {
        NearEarthObject::new(RawNeo::new("433", "Eros", "16.84", "N")).unwrap()
    }

    #[test]
    fn test_neo_creation() {
        let neo = eros();

        assert_eq!(neo.designation(), "433");
        assert_eq!(neo.name(), Some("Eros"));
        assert_eq!(neo.diameter(), 16.84);
        assert!(!neo.hazardous());
        assert!(neo.approaches().is_empty());
    }

    #[test]
    fn test_empty_name_becomes_none() {
        let neo = NearEarthObject::new(RawNeo::new("2020 AB", "", "0.5", "N")).unwrap();

        assert_eq!(neo.name(), None);
        assert_eq!(neo.fullname(), "2020 AB");
    }

    #[test]
    fn test_fullname_with_name() {
        assert_eq!(eros().fullname(), "433 (Eros)");
    }

    #[test]
    fn test_empty_diameter_is_nan() {
        let neo = NearEarthObject::new(RawNeo::new("2020 AB", "", "", "N")).unwrap();

        assert!(neo.diameter().is_nan());
        assert!(!neo.has_known_diameter());
    }

    #[test]
    fn test_unparsable_diameter_is_malformed() {
        let err = NearEarthObject::new(RawNeo::new("433", "Eros", "big", "N")).unwrap_err();
        assert!(matches!(
            err,
            NeoError::MalformedRecord { field: "diameter", .. }
        ));
    }

    #[test]
    fn test_empty_designation_is_malformed() {
        let err = NearEarthObject::new(RawNeo::new("", "Nameless", "1.0", "N")).unwrap_err();
        assert!(matches!(err, NeoError::MalformedRecord { field: "pdes", .. }));
    }

    #[test]
    fn test_hazardous_only_for_uppercase_y() {
        let flag = |pha: &str| {
            NearEarthObject::new(RawNeo::new("1", "", "", pha))
                .unwrap()
                .hazardous()
        };

        assert!(flag("Y"));
        assert!(!flag("N"));
        assert!(!flag("y"));
        assert!(!flag(""));
        assert!(!flag("YES"));
        assert!(!flag(" Y"));
    }

    #[test]
    fn test_display_not_hazardous() {
        assert_eq!(
            eros().to_string(),
            "NEO 433 (Eros) has a diameter of 16.84 km and is not potentially hazardous."
        );
    }

    #[test]
    fn test_display_hazardous() {
        let neo = NearEarthObject::new(RawNeo::new("99942", "Apophis", "0.37", "Y")).unwrap();
        assert_eq!(
            neo.to_string(),
            "NEO 99942 (Apophis) has a diameter of 0.37 km and is potentially hazardous."
        );
    }

    #[test]
    fn test_display_whole_number_diameter() {
        let neo = NearEarthObject::new(RawNeo::new("1", "", "1.0", "N")).unwrap();
        assert_eq!(
            neo.to_string(),
            "NEO 1 has a diameter of 1.0 km and is not potentially hazardous."
        );
    }

    #[test]
    fn test_display_unknown_diameter() {
        let neo = NearEarthObject::new(RawNeo::new("2020 AB", "", "", "Y")).unwrap();
        assert_eq!(
            neo.to_string(),
            "NEO 2020 AB has a diameter of nan km and is potentially hazardous."
        );
        assert_eq!(
            format!("{:?}", neo),
            "NearEarthObject { designation: \"2020 AB\", name: None, diameter: nan, hazardous: true }"
        );
    }

    #[test]
    fn test_debug_rounds_diameter() {
        assert_eq!(
            format!("{:?}", eros()),
            "NearEarthObject { designation: \"433\", name: Some(\"Eros\"), diameter: 16.840, hazardous: false }"
        );
    }

    #[test]
    fn test_push_approach_appends_in_order() {
        let mut neo = eros();
        neo.push_approach(ApproachId::new(3));
        neo.push_approach(ApproachId::new(1));

        assert_eq!(neo.approaches(), &[ApproachId::new(3), ApproachId::new(1)]);
    }
}
