//! Classification rule set
//!
//! Holds the output-direction patterns of both families, compiled once,
//! and the spare placeholder names. Invalid patterns never abort a run:
//! they are kept as entries that match nothing and reported as warnings.

use std::fmt;

use log::warn;
use regex::Regex;

use crate::classifier::Category;
use crate::config::Config;
use crate::tag::Family;

/// A user-supplied pattern and its compiled form
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Pattern text as written in the config
    pub source: String,
    regex: Option<Regex>,
}

impl CompiledPattern {
    fn compile(source: &str) -> (Self, Option<String>) {
        match Regex::new(source) {
            Ok(re) => (
                Self {
                    source: source.to_string(),
                    regex: Some(re),
                },
                None,
            ),
            Err(e) => (
                Self {
                    source: source.to_string(),
                    regex: None,
                },
                Some(e.to_string()),
            ),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.regex.is_some()
    }

    /// Unanchored search; invalid patterns never match
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(name))
    }
}

/// A pattern that failed to compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternWarning {
    pub family: Family,
    pub pattern: String,
    pub message: String,
}

impl fmt::Display for PatternWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} output pattern '{}' ignored: {}",
            self.family.name(),
            self.pattern,
            self.message
        )
    }
}

/// Ordered output patterns of one family
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
}

impl PatternSet {
    /// Compile all patterns. Failures are logged and returned as warnings.
    pub fn compile<S: AsRef<str>>(family: Family, sources: &[S]) -> (Self, Vec<PatternWarning>) {
        let mut patterns = Vec::with_capacity(sources.len());
        let mut warnings = Vec::new();

        for source in sources {
            let (pattern, error) = CompiledPattern::compile(source.as_ref());
            if let Some(message) = error {
                let warning = PatternWarning {
                    family,
                    pattern: pattern.source.clone(),
                    message,
                };
                warn!("{}", warning);
                warnings.push(warning);
            }
            patterns.push(pattern);
        }

        (Self { patterns }, warnings)
    }

    /// True if any pattern matches the bare point name
    pub fn is_match(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(name))
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    pub fn invalid(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.patterns.iter().filter(|p| !p.is_valid())
    }
}

/// Spare placeholder names per category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spares {
    pub ai: String,
    pub ao: String,
    pub di: String,
    pub do_: String,
}

impl Spares {
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::AnalogInput => &self.ai,
            Category::AnalogOutput => &self.ao,
            Category::DigitalInput => &self.di,
            Category::DigitalOutput => &self.do_,
        }
    }
}

/// Immutable decision parameters of one run
#[derive(Debug, Clone)]
pub struct RuleSet {
    analog_output: PatternSet,
    digital_output: PatternSet,
    spares: Spares,
    annotate_spares: bool,
}

impl RuleSet {
    pub fn new(
        analog_output: PatternSet,
        digital_output: PatternSet,
        spares: Spares,
        annotate_spares: bool,
    ) -> Self {
        Self {
            analog_output,
            digital_output,
            spares,
            annotate_spares,
        }
    }

    /// Build the rule set from config, returning pattern warnings alongside
    pub fn from_config(config: &Config) -> (Self, Vec<PatternWarning>) {
        let (analog_output, mut warnings) = PatternSet::compile(
            Family::Analog,
            &config.classification.analog_output_regex,
        );
        let (digital_output, digital_warnings) = PatternSet::compile(
            Family::Digital,
            &config.classification.digital_output_regex,
        );
        warnings.extend(digital_warnings);

        let spares = Spares {
            ai: config.spares.ai.clone(),
            ao: config.spares.ao.clone(),
            di: config.spares.di.clone(),
            do_: config.spares.do_.clone(),
        };

        (
            Self::new(
                analog_output,
                digital_output,
                spares,
                config.spares.annotate,
            ),
            warnings,
        )
    }

    pub fn output_patterns(&self, family: Family) -> &PatternSet {
        match family {
            Family::Analog => &self.analog_output,
            Family::Digital => &self.digital_output,
        }
    }

    /// Whether a dual-capable point of `family` named `name` is an output
    pub fn is_output(&self, family: Family, name: &str) -> bool {
        self.output_patterns(family).is_match(name)
    }

    /// Spare entry for `category`, consumed by point `name`
    pub fn spare_for(&self, category: Category, name: &str) -> String {
        let spare = self.spares.get(category);
        if self.annotate_spares {
            format!("{}({})", spare, name)
        } else {
            spare.to_string()
        }
    }
}
