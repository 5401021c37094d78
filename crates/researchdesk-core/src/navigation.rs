//! Compiled navigation catalog for ResearchDesk.
//!
//! Job titles and navigation items are closed sets baked into the
//! application. Adding a role or a section is a code change here, never a
//! data migration.
//!
//! # Example
//!
//! ```ignore
//! use researchdesk_core::navigation::{self, JOB_TITLES, NAVIGATION_ITEMS};
//!
//! for job_title in JOB_TITLES {
//!     for item in NAVIGATION_ITEMS {
//!         // build a grid row
//!     }
//! }
//!
//! assert!(navigation::is_administrative_section(navigation::IRB_OFFICE));
//! ```

/// Longest job title or navigation item a permission record may carry,
/// counted in characters.
pub const MAX_IDENTIFIER_LEN: usize = 100;

// =============================================================================
// Job titles
// =============================================================================

pub const RESEARCH_ADMINISTRATOR: &str = "Research Administrator";
pub const DEPARTMENT_CHAIR: &str = "Department Chair";
pub const INVESTIGATOR: &str = "Investigator";
pub const CO_INVESTIGATOR: &str = "Co-Investigator";
pub const RESEARCH_SCIENTIST: &str = "Research Scientist";
pub const POSTDOCTORAL_FELLOW: &str = "Postdoctoral Fellow";
pub const PHD_STUDENT: &str = "PhD Student";
pub const LAB_TECHNICIAN: &str = "Lab Technician";
pub const GRANT_OFFICER: &str = "Grant Officer";
pub const CONTRACTS_OFFICER: &str = "Contracts Officer";
pub const IRB_COORDINATOR: &str = "IRB Coordinator";
pub const IBC_COORDINATOR: &str = "IBC Coordinator";
pub const TECHNOLOGY_TRANSFER_OFFICER: &str = "Technology Transfer Officer";
pub const FACILITIES_MANAGER: &str = "Facilities Manager";

/// Every job title the application knows about, in display order.
pub const JOB_TITLES: &[&str] = &[
    RESEARCH_ADMINISTRATOR,
    DEPARTMENT_CHAIR,
    INVESTIGATOR,
    CO_INVESTIGATOR,
    RESEARCH_SCIENTIST,
    POSTDOCTORAL_FELLOW,
    PHD_STUDENT,
    LAB_TECHNICIAN,
    GRANT_OFFICER,
    CONTRACTS_OFFICER,
    IRB_COORDINATOR,
    IBC_COORDINATOR,
    TECHNOLOGY_TRANSFER_OFFICER,
    FACILITIES_MANAGER,
];

// =============================================================================
// Navigation items
// =============================================================================

pub const DASHBOARD: &str = "dashboard";
pub const SCIENTISTS: &str = "scientists";
pub const PROGRAMS: &str = "programs";
pub const PROJECTS: &str = "projects";
pub const RESEARCH_ACTIVITIES: &str = "research-activities";
pub const IRB_APPLICATIONS: &str = "irb-applications";
pub const IRB_OFFICE: &str = "irb-office";
pub const IRB_REVIEWER: &str = "irb-reviewer";
pub const IBC_APPLICATIONS: &str = "ibc-applications";
pub const IBC_OFFICE: &str = "ibc-office";
pub const IBC_REVIEWER: &str = "ibc-reviewer";
pub const GRANTS: &str = "grants";
pub const GRANTS_OFFICE: &str = "grants-office";
pub const CONTRACTS: &str = "contracts";
pub const CONTRACTS_OFFICE: &str = "contracts-office";
pub const PUBLICATIONS: &str = "publications";
pub const PATENTS: &str = "patents";
pub const PATENTS_OFFICE: &str = "patents-office";
pub const DATA_MANAGEMENT_PLANS: &str = "data-management-plans";
pub const FACILITIES: &str = "facilities";
pub const ROOM_ASSIGNMENTS: &str = "room-assignments";
pub const REPORTS: &str = "reports";
pub const ANALYTICS: &str = "analytics";
pub const SETTINGS: &str = "settings";

/// Every navigation section, in menu order.
pub const NAVIGATION_ITEMS: &[&str] = &[
    DASHBOARD,
    SCIENTISTS,
    PROGRAMS,
    PROJECTS,
    RESEARCH_ACTIVITIES,
    IRB_APPLICATIONS,
    IRB_OFFICE,
    IRB_REVIEWER,
    IBC_APPLICATIONS,
    IBC_OFFICE,
    IBC_REVIEWER,
    GRANTS,
    GRANTS_OFFICE,
    CONTRACTS,
    CONTRACTS_OFFICE,
    PUBLICATIONS,
    PATENTS,
    PATENTS_OFFICE,
    DATA_MANAGEMENT_PLANS,
    FACILITIES,
    ROOM_ASSIGNMENTS,
    REPORTS,
    ANALYTICS,
    SETTINGS,
];

// =============================================================================
// Role groups and item groups used by the default policy
// =============================================================================

/// Bench roles: hidden from administrative and review sections.
pub const RESEARCH_STAFF: &[&str] = &[
    INVESTIGATOR,
    CO_INVESTIGATOR,
    RESEARCH_SCIENTIST,
    POSTDOCTORAL_FELLOW,
    PHD_STUDENT,
    LAB_TECHNICIAN,
];

/// Research staff still in training.
pub const TRAINEES: &[&str] = &[POSTDOCTORAL_FELLOW, PHD_STUDENT, LAB_TECHNICIAN];

/// Report-style sections that most non-administrative roles only read.
pub const REPORT_ITEMS: &[&str] = &[REPORTS, ANALYTICS];

/// Sections trainees never see.
pub const TRAINEE_HIDDEN_ITEMS: &[&str] = &[CONTRACTS, PATENTS, SETTINGS];

/// Sections trainees may read but not change.
pub const TRAINEE_READ_ONLY_ITEMS: &[&str] = &[GRANTS, FACILITIES, ROOM_ASSIGNMENTS];

/// Home domain of each specialized office role. Items listed here stay
/// editable for that role even when they are administrative sections.
pub const OFFICE_DOMAINS: &[(&str, &[&str])] = &[
    (GRANT_OFFICER, &[GRANTS, GRANTS_OFFICE]),
    (CONTRACTS_OFFICER, &[CONTRACTS, CONTRACTS_OFFICE]),
    (IRB_COORDINATOR, &[IRB_APPLICATIONS, IRB_OFFICE, IRB_REVIEWER]),
    (IBC_COORDINATOR, &[IBC_APPLICATIONS, IBC_OFFICE, IBC_REVIEWER]),
    (TECHNOLOGY_TRANSFER_OFFICER, &[PATENTS, PATENTS_OFFICE]),
    (FACILITIES_MANAGER, &[FACILITIES, ROOM_ASSIGNMENTS]),
];

/// Administrative or review-only sections carry an `-office` or `-reviewer`
/// marker in their identifier.
pub fn is_administrative_section(navigation_item: &str) -> bool {
    navigation_item.contains("-office") || navigation_item.contains("-reviewer")
}

/// Home-domain items for a specialized office role, if it is one.
pub fn office_domain(job_title: &str) -> Option<&'static [&'static str]> {
    OFFICE_DOMAINS
        .iter()
        .find(|(role, _)| *role == job_title)
        .map(|(_, items)| *items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_no_duplicates() {
        let titles: HashSet<_> = JOB_TITLES.iter().collect();
        assert_eq!(titles.len(), JOB_TITLES.len());

        let items: HashSet<_> = NAVIGATION_ITEMS.iter().collect();
        assert_eq!(items.len(), NAVIGATION_ITEMS.len());
    }

    #[test]
    fn test_groups_reference_known_entries() {
        for role in RESEARCH_STAFF.iter().chain(TRAINEES) {
            assert!(JOB_TITLES.contains(role), "{role}");
        }
        for item in REPORT_ITEMS
            .iter()
            .chain(TRAINEE_HIDDEN_ITEMS)
            .chain(TRAINEE_READ_ONLY_ITEMS)
        {
            assert!(NAVIGATION_ITEMS.contains(item), "{item}");
        }
        for (role, items) in OFFICE_DOMAINS {
            assert!(JOB_TITLES.contains(role), "{role}");
            for item in *items {
                assert!(NAVIGATION_ITEMS.contains(item), "{item}");
            }
        }
    }

    #[test]
    fn test_catalog_fits_identifier_limit() {
        for id in JOB_TITLES.iter().chain(NAVIGATION_ITEMS) {
            assert!(id.chars().count() <= MAX_IDENTIFIER_LEN, "{id}");
        }
    }

    #[test]
    fn test_administrative_section_marker() {
        assert!(is_administrative_section(IRB_OFFICE));
        assert!(is_administrative_section(IBC_REVIEWER));
        assert!(!is_administrative_section(GRANTS));
        assert!(!is_administrative_section(REPORTS));
    }

    #[test]
    fn test_office_domain_lookup() {
        assert_eq!(office_domain(GRANT_OFFICER), Some(&[GRANTS, GRANTS_OFFICE][..]));
        assert_eq!(office_domain(PHD_STUDENT), None);
        assert_eq!(office_domain("Janitor"), None);
    }
}
