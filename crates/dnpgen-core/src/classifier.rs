//! Point classifier
//!
//! Assigns each declaration to one of the four DNP lists and produces the
//! spare entry mirrored into the opposite-direction list of its family.

use std::fmt;

use crate::parser::PointDeclaration;
use crate::rules::RuleSet;
use crate::tag::{Family, TagClass};

/// Input or output, seen from the RTU master
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Input,
    Output,
}

/// The four DNP point lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    AnalogInput,
    AnalogOutput,
    DigitalInput,
    DigitalOutput,
}

impl Category {
    /// Section order of the list file
    pub const ALL: [Category; 4] = [
        Category::AnalogInput,
        Category::AnalogOutput,
        Category::DigitalInput,
        Category::DigitalOutput,
    ];

    pub fn new(family: Family, direction: Direction) -> Self {
        match (family, direction) {
            (Family::Analog, Direction::Input) => Self::AnalogInput,
            (Family::Analog, Direction::Output) => Self::AnalogOutput,
            (Family::Digital, Direction::Input) => Self::DigitalInput,
            (Family::Digital, Direction::Output) => Self::DigitalOutput,
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Self::AnalogInput | Self::AnalogOutput => Family::Analog,
            Self::DigitalInput | Self::DigitalOutput => Family::Digital,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Self::AnalogInput | Self::DigitalInput => Direction::Input,
            Self::AnalogOutput | Self::DigitalOutput => Direction::Output,
        }
    }

    /// Same family, opposite direction
    pub fn mirror(&self) -> Self {
        match self {
            Self::AnalogInput => Self::AnalogOutput,
            Self::AnalogOutput => Self::AnalogInput,
            Self::DigitalInput => Self::DigitalOutput,
            Self::DigitalOutput => Self::DigitalInput,
        }
    }

    /// Numeric list code of the section header
    pub fn code(&self) -> u16 {
        match self {
            Self::AnalogInput => 32761,
            Self::AnalogOutput => 32762,
            Self::DigitalInput => 32763,
            Self::DigitalOutput => 32764,
        }
    }

    /// Section title
    pub fn title(&self) -> &'static str {
        match self {
            Self::AnalogInput => "ENTRADAS ANALOGICAS DNP",
            Self::AnalogOutput => "SALIDAS ANALOGICAS DNP",
            Self::DigitalInput => "ENTRADAS DIGITALES DNP",
            Self::DigitalOutput => "SALIDAS DIGITALES DNP",
        }
    }

    pub fn short(&self) -> &'static str {
        match self {
            Self::AnalogInput => "AI",
            Self::AnalogOutput => "AO",
            Self::DigitalInput => "DI",
            Self::DigitalOutput => "DO",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short())
    }
}

/// Outcome of classifying one declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// List receiving the real point
    pub category: Category,
    /// Canonical reference, e.g. `@GV.FT041`
    pub entry: String,
    /// Spare text for `category.mirror()`
    pub spare: String,
}

impl Classification {
    pub fn mirror(&self) -> Category {
        self.category.mirror()
    }
}

/// Stateless classifier over a borrowed rule set
pub struct Classifier<'a> {
    rules: &'a RuleSet,
}

impl<'a> Classifier<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Decide the direction of a declaration. `None` for unmapped type tags.
    pub fn direction(&self, decl: &PointDeclaration) -> Option<(Family, Direction)> {
        match TagClass::of(&decl.type_tag) {
            TagClass::OutputOnly(family) => Some((family, Direction::Output)),
            TagClass::Dual(family) => {
                let direction = if self.rules.is_output(family, &decl.name) {
                    Direction::Output
                } else {
                    Direction::Input
                };
                Some((family, direction))
            }
            TagClass::Unrecognized => None,
        }
    }

    /// Classify a declaration into its list entry and mirrored spare
    pub fn classify(&self, decl: &PointDeclaration) -> Option<Classification> {
        let (family, direction) = self.direction(decl)?;
        let category = Category::new(family, direction);

        Some(Classification {
            category,
            entry: decl.reference(),
            spare: self.rules.spare_for(category.mirror(), &decl.name),
        })
    }
}
