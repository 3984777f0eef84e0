//! Type tag dispatch
//!
//! Maps the raw `TYPE=` code of a declaration onto a point family and
//! says whether the direction still has to be decided by the rule set.

/// Analog or digital, independent of direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Analog,
    Digital,
}

impl Family {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Analog => "analog",
            Self::Digital => "digital",
        }
    }
}

/// Result of dispatching a type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    /// Input or output, decided by the family's output patterns
    Dual(Family),
    /// Always an output (`AO`, `DO`)
    OutputOnly(Family),
    /// Not a mapped point type
    Unrecognized,
}

/// Substring markers of analog-capable tags
const ANALOG_MARKERS: &[&str] = &["AA", "REAL"];

/// Substring markers of logic/boolean tags
const DIGITAL_MARKERS: &[&str] = &["LA", "BOOL"];

const ANALOG_OUTPUT_TAG: &str = "AO";
const DIGITAL_OUTPUT_TAG: &str = "DO";

impl TagClass {
    /// Classify a raw type tag.
    ///
    /// Analog markers win over digital ones when a tag carries both.
    pub fn of(type_tag: &str) -> Self {
        if ANALOG_MARKERS.iter().any(|m| type_tag.contains(m)) {
            Self::Dual(Family::Analog)
        } else if DIGITAL_MARKERS.iter().any(|m| type_tag.contains(m)) {
            Self::Dual(Family::Digital)
        } else if type_tag == ANALOG_OUTPUT_TAG {
            Self::OutputOnly(Family::Analog)
        } else if type_tag == DIGITAL_OUTPUT_TAG {
            Self::OutputOnly(Family::Digital)
        } else {
            Self::Unrecognized
        }
    }

    pub fn family(&self) -> Option<Family> {
        match self {
            Self::Dual(f) | Self::OutputOnly(f) => Some(*f),
            Self::Unrecognized => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analog_tags() {
        assert_eq!(TagClass::of("AA"), TagClass::Dual(Family::Analog));
        assert_eq!(TagClass::of("REAL"), TagClass::Dual(Family::Analog));
        assert_eq!(TagClass::of("XAAY"), TagClass::Dual(Family::Analog));
    }

    #[test]
    fn test_digital_tags() {
        assert_eq!(TagClass::of("LA"), TagClass::Dual(Family::Digital));
        assert_eq!(TagClass::of("BOOL"), TagClass::Dual(Family::Digital));
    }

    #[test]
    fn test_output_only_tags() {
        assert_eq!(TagClass::of("AO"), TagClass::OutputOnly(Family::Analog));
        assert_eq!(TagClass::of("DO"), TagClass::OutputOnly(Family::Digital));
        // exact match only
        assert_eq!(TagClass::of("DOX"), TagClass::Unrecognized);
    }

    #[test]
    fn test_analog_marker_wins() {
        assert_eq!(TagClass::of("LAAA"), TagClass::Dual(Family::Analog));
    }

    #[test]
    fn test_unrecognized_tags() {
        assert_eq!(TagClass::of("INT"), TagClass::Unrecognized);
        assert_eq!(TagClass::of("AI"), TagClass::Unrecognized);
        assert_eq!(TagClass::of(""), TagClass::Unrecognized);
        assert_eq!(TagClass::of("INT").family(), None);
    }
}
