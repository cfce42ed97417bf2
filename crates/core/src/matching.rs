//! Role classification for bucketing employees under role tabs.
//!
//! Roles are created by admins as free text with no canonical taxonomy, so
//! matching has to be fuzzy. The two built-in roles are a closed tier with
//! keyword-set matching that tolerates the synonyms found in legacy records
//! ("salesperson", "sales exec", "field officer"); everything else goes
//! through a generic fuzzy comparison.

use crate::domain::employee::Employee;

pub const SALES_PERSON: &str = "Sales Person";
pub const FIELD_EXECUTIVE: &str = "Field Executive";

const SALES_KEYWORDS: [&str; 3] = ["sales", "sale", "selling"];
const FIELD_KEYWORDS: [&str; 3] = ["field", "executive", "exec"];

/// A role bucket an employee can be matched against.
///
/// Keyword matching is deliberately loose: a custom role like
/// `"Sales Manager"` also lands in the `SalesPerson` bucket because it
/// contains a sales keyword. That spill-over mirrors how the historical data
/// was grouped and is relied on by existing installations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoleTarget {
    SalesPerson,
    FieldExecutive,
    Custom(String),
}

impl RoleTarget {
    /// The two built-in names map to their closed variants; anything else is
    /// a free-text custom role.
    pub fn parse(name: &str) -> Self {
        match name {
            SALES_PERSON => Self::SalesPerson,
            FIELD_EXECUTIVE => Self::FieldExecutive,
            other => Self::Custom(other.to_owned()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::SalesPerson => SALES_PERSON,
            Self::FieldExecutive => FIELD_EXECUTIVE,
            Self::Custom(name) => name,
        }
    }
}

/// Whether `employee` belongs in the `target` bucket.
///
/// The primary role is checked first, then every entry of the multi-role
/// list, short-circuiting on the first hit.
pub fn employee_matches(employee: &Employee, target: &RoleTarget) -> bool {
    std::iter::once(employee.primary_role.as_str())
        .chain(employee.roles.iter().map(String::as_str))
        .any(|source| role_matches(source, target))
}

fn role_matches(source: &str, target: &RoleTarget) -> bool {
    match target {
        RoleTarget::SalesPerson => contains_keyword(source, &SALES_KEYWORDS),
        RoleTarget::FieldExecutive => contains_keyword(source, &FIELD_KEYWORDS),
        RoleTarget::Custom(name) => fuzzy_label_match(source, name),
    }
}

fn contains_keyword(source: &str, keywords: &[&str]) -> bool {
    let lowered = source.to_lowercase();
    keywords.iter().any(|keyword| lowered.contains(keyword))
}

/// Free-text comparison ladder: exact, case-insensitive exact, substring in
/// either direction (case-insensitive), and finally equality with all
/// whitespace stripped.
fn fuzzy_label_match(source: &str, target: &str) -> bool {
    if source == target {
        return true;
    }

    let source_lower = source.to_lowercase();
    let target_lower = target.to_lowercase();
    if source_lower == target_lower {
        return true;
    }
    if source_lower.contains(&target_lower) || target_lower.contains(&source_lower) {
        return true;
    }

    strip_whitespace(source) == strip_whitespace(target)
}

fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|ch| !ch.is_whitespace()).collect()
}
