pub mod classifier;
pub mod config;
pub mod error;
pub mod layout;
pub mod lists;
pub mod parser;
pub mod rules;
pub mod run;
pub mod sigext;
pub mod tag;
pub mod writer;

pub use classifier::{Category, Classification, Classifier, Direction};
pub use config::{Config, ConfigFormat};
pub use error::{DnpGenError, Result};
pub use layout::ProjectLayout;
pub use lists::{CategoryLists, ListCounts};
pub use parser::{parse_declarations, parse_line, PointDeclaration};
pub use rules::{PatternSet, PatternWarning, RuleSet, Spares};
pub use run::{ClassificationRun, RunReport};
pub use sigext::SigExt;
pub use tag::{Family, TagClass};
pub use writer::{render, write_lists, write_lists_file, LIST_FILE};
