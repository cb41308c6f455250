//! Index naming convention: dates in index names are dot-delimited.

use std::sync::LazyLock;

use regex::Regex;

use super::Check;
use crate::logger::AuditLogger;
use crate::model::IndexList;

/// `YYYY-MM-DD` anywhere in the name. ASCII digits only.
static DASHED_DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("Invalid dashed date regex pattern")
});

/// Warns about indices named with a `YYYY-MM-DD` date.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexNameCheck;

impl IndexNameCheck {
    pub const NAME: &'static str = "index_name";
}

impl Check for IndexNameCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, index_list: &IndexList, logger: &dyn AuditLogger) {
        for (_group_name, indices) in index_list.iter() {
            for index in indices {
                if has_dashed_date(&index.name) {
                    logger.warn(&format!(
                        "Prefer YYYY.MM.dd to YYYY-MM-dd for naming indices: {}",
                        index.name
                    ));
                }
            }
        }
    }
}

/// True if `name` contains a `YYYY-MM-DD` substring.
pub fn has_dashed_date(name: &str) -> bool {
    DASHED_DATE_PATTERN.is_match(name)
}
