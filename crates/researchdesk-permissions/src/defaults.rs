//! Default permission table.
//!
//! The defaults are a pure function of the compiled catalog. They are used
//! when the store is empty (seeding) and when an administrator resets the
//! table.
//!
//! The policy is an ordered rule list. For each pair every rule is checked
//! in order and the last one that matches decides the level, so role
//! specific rules placed further down override the baseline above them.

use researchdesk_core::navigation::{
    self, JOB_TITLES, NAVIGATION_ITEMS, REPORT_ITEMS, RESEARCH_STAFF, TRAINEE_HIDDEN_ITEMS,
    TRAINEE_READ_ONLY_ITEMS, TRAINEES,
};
use researchdesk_models::{AccessLevel, NavigationPermission};

#[derive(Debug, Clone, Copy)]
enum Roles {
    All,
    OneOf(&'static [&'static str]),
    /// Any role with a home domain in [`navigation::OFFICE_DOMAINS`].
    Office,
}

#[derive(Debug, Clone, Copy)]
enum Items {
    All,
    /// `-office` / `-reviewer` sections.
    Administrative,
    OneOf(&'static [&'static str]),
    /// The home domain of the office role being evaluated.
    HomeDomain,
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    roles: Roles,
    items: Items,
    level: AccessLevel,
}

impl Rule {
    const fn new(roles: Roles, items: Items, level: AccessLevel) -> Self {
        Self {
            roles,
            items,
            level,
        }
    }

    fn matches(&self, job_title: &str, navigation_item: &str) -> bool {
        let role_matches = match self.roles {
            Roles::All => true,
            Roles::OneOf(roles) => roles.contains(&job_title),
            Roles::Office => navigation::office_domain(job_title).is_some(),
        };

        role_matches
            && match self.items {
                Items::All => true,
                Items::Administrative => navigation::is_administrative_section(navigation_item),
                Items::OneOf(items) => items.contains(&navigation_item),
                Items::HomeDomain => navigation::office_domain(job_title)
                    .is_some_and(|domain| domain.contains(&navigation_item)),
            }
    }
}

const DEFAULT_RULES: &[Rule] = &[
    // Baseline: full access.
    Rule::new(Roles::All, Items::All, AccessLevel::Edit),
    // Research staff.
    Rule::new(
        Roles::OneOf(RESEARCH_STAFF),
        Items::Administrative,
        AccessLevel::Hide,
    ),
    Rule::new(
        Roles::OneOf(RESEARCH_STAFF),
        Items::OneOf(REPORT_ITEMS),
        AccessLevel::View,
    ),
    Rule::new(
        Roles::OneOf(TRAINEES),
        Items::OneOf(TRAINEE_READ_ONLY_ITEMS),
        AccessLevel::View,
    ),
    Rule::new(
        Roles::OneOf(TRAINEES),
        Items::OneOf(TRAINEE_HIDDEN_ITEMS),
        AccessLevel::Hide,
    ),
    // Specialized offices. The home-domain rule comes after the
    // administrative one so an office keeps its own office/reviewer section.
    Rule::new(Roles::Office, Items::Administrative, AccessLevel::Hide),
    Rule::new(Roles::Office, Items::HomeDomain, AccessLevel::Edit),
    Rule::new(Roles::Office, Items::OneOf(REPORT_ITEMS), AccessLevel::View),
];

/// Default level for a single pair. Total over all strings: anything the
/// rules do not mention keeps the `edit` baseline.
pub fn default_access_level(job_title: &str, navigation_item: &str) -> AccessLevel {
    DEFAULT_RULES
        .iter()
        .rev()
        .find(|rule| rule.matches(job_title, navigation_item))
        .map(|rule| rule.level)
        .unwrap_or(AccessLevel::Edit)
}

/// Full `JOB_TITLES x NAVIGATION_ITEMS` cross-product, one record per pair,
/// ordered by job title then navigation item as they appear in the catalog.
pub fn generate_defaults() -> Vec<NavigationPermission> {
    JOB_TITLES
        .iter()
        .flat_map(|job_title| {
            NAVIGATION_ITEMS.iter().map(move |navigation_item| {
                NavigationPermission::new(
                    *job_title,
                    *navigation_item,
                    default_access_level(job_title, navigation_item),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use researchdesk_core::navigation::*;
    use std::collections::HashSet;

    #[test]
    fn test_defaults_cover_cross_product_once() {
        let defaults = generate_defaults();
        assert_eq!(defaults.len(), JOB_TITLES.len() * NAVIGATION_ITEMS.len());

        let pairs: HashSet<_> = defaults
            .iter()
            .map(|p| (p.job_title.as_str(), p.navigation_item.as_str()))
            .collect();
        assert_eq!(pairs.len(), defaults.len());
    }

    #[test]
    fn test_defaults_are_deterministic() {
        assert_eq!(generate_defaults(), generate_defaults());
    }

    #[test]
    fn test_phd_student_hidden_from_contracts() {
        assert_eq!(
            default_access_level(PHD_STUDENT, CONTRACTS),
            AccessLevel::Hide
        );
    }

    #[test]
    fn test_research_staff_hidden_from_administrative_sections() {
        for role in RESEARCH_STAFF {
            for item in NAVIGATION_ITEMS
                .iter()
                .filter(|i| is_administrative_section(i))
            {
                assert_eq!(default_access_level(role, item), AccessLevel::Hide, "{role} {item}");
            }
            for item in REPORT_ITEMS {
                assert_eq!(default_access_level(role, item), AccessLevel::View, "{role} {item}");
            }
        }
    }

    #[test]
    fn test_investigator_keeps_edit_on_research_sections() {
        assert_eq!(default_access_level(INVESTIGATOR, PROJECTS), AccessLevel::Edit);
        assert_eq!(default_access_level(INVESTIGATOR, GRANTS), AccessLevel::Edit);
        assert_eq!(default_access_level(INVESTIGATOR, CONTRACTS), AccessLevel::Edit);
    }

    #[test]
    fn test_trainee_read_only_sections() {
        assert_eq!(default_access_level(PHD_STUDENT, GRANTS), AccessLevel::View);
        assert_eq!(
            default_access_level(LAB_TECHNICIAN, ROOM_ASSIGNMENTS),
            AccessLevel::View
        );
        assert_eq!(default_access_level(POSTDOCTORAL_FELLOW, PATENTS), AccessLevel::Hide);
    }

    #[test]
    fn test_grant_officer_retains_own_domain() {
        assert_eq!(default_access_level(GRANT_OFFICER, GRANTS), AccessLevel::Edit);
        assert_eq!(
            default_access_level(GRANT_OFFICER, GRANTS_OFFICE),
            AccessLevel::Edit
        );
        assert_eq!(default_access_level(GRANT_OFFICER, IRB_OFFICE), AccessLevel::Hide);
        assert_eq!(
            default_access_level(GRANT_OFFICER, CONTRACTS_OFFICE),
            AccessLevel::Hide
        );
        assert_eq!(default_access_level(GRANT_OFFICER, REPORTS), AccessLevel::View);
    }

    #[test]
    fn test_irb_coordinator_keeps_reviewer_section() {
        assert_eq!(
            default_access_level(IRB_COORDINATOR, IRB_REVIEWER),
            AccessLevel::Edit
        );
        assert_eq!(
            default_access_level(IRB_COORDINATOR, IBC_REVIEWER),
            AccessLevel::Hide
        );
    }

    #[test]
    fn test_administrators_have_full_access() {
        for item in NAVIGATION_ITEMS {
            assert_eq!(
                default_access_level(RESEARCH_ADMINISTRATOR, item),
                AccessLevel::Edit
            );
            assert_eq!(default_access_level(DEPARTMENT_CHAIR, item), AccessLevel::Edit);
        }
    }

    #[test]
    fn test_unknown_pairs_keep_baseline() {
        assert_eq!(default_access_level("Janitor", "cafeteria"), AccessLevel::Edit);
        assert_eq!(default_access_level("", ""), AccessLevel::Edit);
    }
}
