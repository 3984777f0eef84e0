//! A single classification pass over a signal file

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use crate::classifier::Classifier;
use crate::error::{DnpGenError, Result};
use crate::lists::CategoryLists;
use crate::parser::parse_declarations;
use crate::rules::RuleSet;

/// Result of one pass
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub lists: CategoryLists,
    /// Lines read from the input
    pub lines_scanned: usize,
    /// Declarations that matched the extraction pattern
    pub declarations: usize,
    /// Declarations skipped because of an unmapped type tag
    pub unrecognized: usize,
}

/// Classification context owned by one run
pub struct ClassificationRun<'a> {
    classifier: Classifier<'a>,
}

impl<'a> ClassificationRun<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self {
            classifier: Classifier::new(rules),
        }
    }

    /// Classify every declaration of `reader` in order
    pub fn process_reader<R: BufRead>(&self, reader: R) -> Result<RunReport> {
        let mut report = RunReport::default();
        let mut declarations = parse_declarations(reader);

        for decl in declarations.by_ref() {
            let decl = decl?;
            report.declarations += 1;

            match self.classifier.classify(&decl) {
                Some(classification) => {
                    debug!(
                        "{} -> {} (spare in {})",
                        decl.name,
                        classification.category,
                        classification.mirror()
                    );
                    report.lists.record(&classification);
                }
                None => {
                    debug!("{}: type {} not mapped", decl.name, decl.type_tag);
                    report.unrecognized += 1;
                }
            }
        }

        report.lines_scanned = declarations.lines_read();
        Ok(report)
    }

    /// Classify a signal file
    pub fn process_file(&self, path: &Path) -> Result<RunReport> {
        if !path.is_file() {
            return Err(DnpGenError::SignalFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let report = self.process_reader(BufReader::new(file))?;
        info!(
            "{}: {} lines, {} declarations, {} unmapped",
            path.display(),
            report.lines_scanned,
            report.declarations,
            report.unrecognized
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Category;
    use crate::config::{Config, ConfigFormat};
    use crate::writer::render;
    use tempfile::TempDir;

    const SIG: &str = "\
[HEADER]
NODE=RTU01
SIG=@GV.FT041_H_H TYPE=AA
SIG=@GV.VALVE1_CMD TYPE=LA
NOTES=random text
SIG=@GV.PUMP2 TYPE=AO
SIG=@GV.COUNTER TYPE=DINT
SIG=@GV.LIT200_H_H TYPE=REAL
SIG=@GV.ALARM_1 TYPE=BOOL
SIG=@GV.SIREN TYPE=DO
SIG=malformed line
";

    fn rules_with(analog: &[&str], digital: &[&str]) -> RuleSet {
        let mut config = Config::default();
        config.classification.analog_output_regex = analog.iter().map(|s| s.to_string()).collect();
        config.classification.digital_output_regex =
            digital.iter().map(|s| s.to_string()).collect();
        config.spares.ai = "SP_AI".to_string();
        config.spares.ao = "SP_AO".to_string();
        config.spares.di = "SP_DI".to_string();
        config.spares.do_ = "SP_DO".to_string();
        RuleSet::from_config(&config).0
    }

    fn run(rules: &RuleSet, input: &str) -> RunReport {
        ClassificationRun::new(rules)
            .process_reader(input.as_bytes())
            .unwrap()
    }

    #[test]
    fn test_full_pass() {
        let rules = rules_with(&["LIT.*_H_H"], &["_CMD"]);
        let report = run(&rules, SIG);

        assert_eq!(report.lines_scanned, 11);
        assert_eq!(report.declarations, 7);
        assert_eq!(report.unrecognized, 1);

        let lists = &report.lists;
        assert_eq!(
            lists.get(Category::AnalogInput),
            ["@GV.FT041_H_H", "SP_AI(PUMP2)", "SP_AI(LIT200_H_H)"]
        );
        assert_eq!(
            lists.get(Category::AnalogOutput),
            ["SP_AO(FT041_H_H)", "@GV.PUMP2", "@GV.LIT200_H_H"]
        );
        assert_eq!(
            lists.get(Category::DigitalInput),
            ["SP_DI(VALVE1_CMD)", "@GV.ALARM_1", "SP_DI(SIREN)"]
        );
        assert_eq!(
            lists.get(Category::DigitalOutput),
            ["@GV.VALVE1_CMD", "SP_DO(ALARM_1)", "@GV.SIREN"]
        );
        assert!(lists.is_aligned());
    }

    #[test]
    fn test_non_declaration_lines_change_nothing() {
        let rules = rules_with(&[], &[]);
        let report = run(&rules, "NOTES=random text\n; comment\n\n");
        assert!(report.lists.is_empty());
        assert_eq!(report.declarations, 0);
    }

    #[test]
    fn test_deterministic_output() {
        let rules = rules_with(&["LIT.*_H_H"], &["_CMD"]);
        let first = render(&run(&rules, SIG).lists);
        let second = render(&run(&rules, SIG).lists);
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_pattern_does_not_abort() {
        let rules = rules_with(&["(", "LIT.*_H_H"], &["[", "_CMD"]);
        let report = run(&rules, SIG);
        assert!(report.lists.is_aligned());
        assert_eq!(report.lists.get(Category::DigitalOutput)[0], "@GV.VALVE1_CMD");
        assert_eq!(report.lists.get(Category::AnalogOutput)[2], "@GV.LIT200_H_H");
    }

    #[test]
    fn test_mirror_invariant_over_many_lines() {
        let rules = rules_with(&["_SP($|_)"], &["_OUT"]);
        let mut input = String::new();
        for i in 0..50 {
            let (name, tag) = match i % 5 {
                0 => (format!("T{i}_SP"), "AA"),
                1 => (format!("T{i}_SPAN"), "REAL"),
                2 => (format!("D{i}_OUT"), "LA"),
                3 => (format!("D{i}"), "BOOL"),
                _ => (format!("X{i}"), "STRING"),
            };
            input.push_str(&format!("SIG=@GV.{name} TYPE={tag}\n"));
        }

        let counts = run(&rules, &input).lists.counts();
        assert_eq!(counts.ai, counts.ao);
        assert_eq!(counts.di, counts.do_);
        assert_eq!(counts.ai, 20);
        assert_eq!(counts.di, 20);
    }

    #[test]
    fn test_process_file_missing() {
        let tmp = TempDir::new().unwrap();
        let rules = rules_with(&[], &[]);
        let err = ClassificationRun::new(&rules)
            .process_file(&tmp.path().join("RTU01.SIG"))
            .unwrap_err();
        assert!(matches!(err, DnpGenError::SignalFileNotFound { .. }));
    }

    #[test]
    fn test_process_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("RTU01.SIG");
        std::fs::write(&path, SIG).unwrap();

        let rules = rules_with(&[], &[]);
        let report = ClassificationRun::new(&rules).process_file(&path).unwrap();
        assert_eq!(report.lists.len(Category::AnalogInput), 3);
        assert_eq!(report.lists.len(Category::DigitalOutput), 3);
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let rules = rules_with(&[], &[]);
        let input: &[u8] = b"SIG=@GV.A TYPE=AA\nDESC=V\xe1lvula principal\nSIG=@GV.B TYPE=LA\n";
        let report = ClassificationRun::new(&rules).process_reader(input).unwrap();

        assert_eq!(report.lines_scanned, 3);
        assert_eq!(report.declarations, 2);
        assert_eq!(report.lists.get(Category::AnalogInput), ["@GV.A"]);
        assert_eq!(report.lists.get(Category::DigitalInput), ["@GV.B"]);
        assert!(report.lists.is_aligned());
    }

    #[test]
    fn test_config_without_patterns_classifies_inputs() {
        let config = Config::parse("app:\n  spares:\n    di: SP_DI\n", ConfigFormat::Yaml).unwrap();
        let (rules, warnings) = RuleSet::from_config(&config);
        assert!(warnings.is_empty());

        let report = run(&rules, "SIG=@GV.VALVE1_CMD TYPE=LA\nSIG=@GV.LIT200_H_H TYPE=REAL\n");
        assert_eq!(report.lists.get(Category::DigitalInput), ["@GV.VALVE1_CMD"]);
        assert_eq!(report.lists.get(Category::AnalogInput), ["@GV.LIT200_H_H"]);
        assert!(report.lists.get(Category::DigitalOutput)[0].starts_with("@GV.SPARE_DO"));
    }
}
