//! Category list accumulator

use std::fmt;

use crate::classifier::{Category, Classification};

/// The four point lists of one run, in encounter order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryLists {
    ai: Vec<String>,
    ao: Vec<String>,
    di: Vec<String>,
    do_: Vec<String>,
}

/// Entry counts per list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCounts {
    pub ai: usize,
    pub ao: usize,
    pub di: usize,
    pub do_: usize,
}

impl fmt::Display for ListCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DI: {} | DO: {} | AI: {} | AO: {}",
            self.di, self.do_, self.ai, self.ao
        )
    }
}

impl CategoryLists {
    pub fn new() -> Self {
        Self::default()
    }

    fn list_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::AnalogInput => &mut self.ai,
            Category::AnalogOutput => &mut self.ao,
            Category::DigitalInput => &mut self.di,
            Category::DigitalOutput => &mut self.do_,
        }
    }

    /// Append the real point and its mirrored spare in one step
    pub fn record(&mut self, classification: &Classification) {
        self.list_mut(classification.category)
            .push(classification.entry.clone());
        self.list_mut(classification.mirror())
            .push(classification.spare.clone());
    }

    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::AnalogInput => &self.ai,
            Category::AnalogOutput => &self.ao,
            Category::DigitalInput => &self.di,
            Category::DigitalOutput => &self.do_,
        }
    }

    pub fn len(&self, category: Category) -> usize {
        self.get(category).len()
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.get(*c).is_empty())
    }

    /// Paired lists have equal length
    pub fn is_aligned(&self) -> bool {
        self.ai.len() == self.ao.len() && self.di.len() == self.do_.len()
    }

    pub fn counts(&self) -> ListCounts {
        ListCounts {
            ai: self.ai.len(),
            ao: self.ao.len(),
            di: self.di.len(),
            do_: self.do_.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classification(category: Category, entry: &str, spare: &str) -> Classification {
        Classification {
            category,
            entry: entry.to_string(),
            spare: spare.to_string(),
        }
    }

    #[test]
    fn test_record_appends_to_both_lists() {
        let mut lists = CategoryLists::new();
        assert!(lists.is_empty());

        lists.record(&classification(Category::DigitalOutput, "@GV.V1_CMD", "SP_DI"));
        assert_eq!(lists.get(Category::DigitalOutput), ["@GV.V1_CMD"]);
        assert_eq!(lists.get(Category::DigitalInput), ["SP_DI"]);
        assert_eq!(lists.len(Category::AnalogInput), 0);
        assert!(lists.is_aligned());
        assert!(!lists.is_empty());
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let mut lists = CategoryLists::new();
        lists.record(&classification(Category::AnalogInput, "@GV.B", "S(B)"));
        lists.record(&classification(Category::AnalogOutput, "@GV.A", "S(A)"));
        lists.record(&classification(Category::AnalogInput, "@GV.B", "S(B)"));

        assert_eq!(lists.get(Category::AnalogInput), ["@GV.B", "S(A)", "@GV.B"]);
        assert_eq!(lists.get(Category::AnalogOutput), ["S(B)", "@GV.A", "S(B)"]);
        assert!(lists.is_aligned());
    }

    #[test]
    fn test_counts_display() {
        let mut lists = CategoryLists::new();
        lists.record(&classification(Category::AnalogInput, "@GV.T", "S"));
        lists.record(&classification(Category::DigitalInput, "@GV.D", "S"));
        lists.record(&classification(Category::DigitalInput, "@GV.E", "S"));

        let counts = lists.counts();
        assert_eq!(counts.di, 2);
        assert_eq!(counts.to_string(), "DI: 2 | DO: 2 | AI: 1 | AO: 1");
    }
}
