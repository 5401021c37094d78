//! Runtime lookup surface used by route guards and navigation rendering.

use std::collections::HashMap;

use researchdesk_core::navigation::{MAX_IDENTIFIER_LEN, NAVIGATION_ITEMS};
use researchdesk_models::{AccessDecision, AccessLevel, MenuEntry, NavigationPermission};

use crate::error::TableError;

/// Reject a pair whose identifiers are blank or longer than
/// [`MAX_IDENTIFIER_LEN`] characters.
pub fn check_pair(job_title: &str, navigation_item: &str) -> Result<(), TableError> {
    let usable =
        |s: &str| !s.trim().is_empty() && s.chars().count() <= MAX_IDENTIFIER_LEN;
    if usable(job_title) && usable(navigation_item) {
        return Ok(());
    }
    Err(TableError::InvalidIdentifier {
        job_title: job_title.to_string(),
        navigation_item: navigation_item.to_string(),
    })
}

/// Check every record's identifiers and reject tables holding more than one
/// record for the same pair.
///
/// Loading and saving run the same check, so anything a session accepts
/// can be loaded back.
pub fn check_table(records: &[NavigationPermission]) -> Result<(), TableError> {
    let mut seen: HashMap<&str, Vec<&str>> = HashMap::new();
    for record in records {
        check_pair(&record.job_title, &record.navigation_item)?;
        let items = seen.entry(record.job_title.as_str()).or_default();
        if items.contains(&record.navigation_item.as_str()) {
            return Err(TableError::DuplicatePair {
                job_title: record.job_title.clone(),
                navigation_item: record.navigation_item.clone(),
            });
        }
        items.push(record.navigation_item.as_str());
    }
    Ok(())
}

/// Immutable snapshot of a permission table plus its lookup index.
///
/// Lookups are total: a pair with no record resolves to the configured
/// fallback, whatever the strings are.
#[derive(Debug, Clone)]
pub struct PermissionResolver {
    records: Vec<NavigationPermission>,
    index: HashMap<String, HashMap<String, AccessLevel>>,
    fallback: AccessLevel,
}

impl PermissionResolver {
    pub fn new(
        records: Vec<NavigationPermission>,
        fallback: AccessLevel,
    ) -> Result<Self, TableError> {
        check_table(&records)?;
        Ok(Self::from_unique(records, fallback))
    }

    pub fn empty(fallback: AccessLevel) -> Self {
        Self::from_unique(Vec::new(), fallback)
    }

    /// Caller guarantees a valid table (generated defaults, checked edits).
    pub(crate) fn from_unique(records: Vec<NavigationPermission>, fallback: AccessLevel) -> Self {
        let mut index: HashMap<String, HashMap<String, AccessLevel>> = HashMap::new();
        for record in &records {
            index
                .entry(record.job_title.clone())
                .or_default()
                .insert(record.navigation_item.clone(), record.access_level);
        }

        Self {
            records,
            index,
            fallback,
        }
    }

    pub fn access_level(&self, job_title: &str, navigation_item: &str) -> AccessLevel {
        self.index
            .get(job_title)
            .and_then(|items| items.get(navigation_item))
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn can_view(&self, job_title: &str, navigation_item: &str) -> bool {
        self.access_level(job_title, navigation_item).can_view()
    }

    pub fn can_edit(&self, job_title: &str, navigation_item: &str) -> bool {
        self.access_level(job_title, navigation_item).can_edit()
    }

    pub fn is_hidden(&self, job_title: &str, navigation_item: &str) -> bool {
        self.access_level(job_title, navigation_item).is_hidden()
    }

    pub fn is_read_only(&self, job_title: &str, navigation_item: &str) -> bool {
        self.access_level(job_title, navigation_item).is_read_only()
    }

    pub fn decision(&self, job_title: &str, navigation_item: &str) -> AccessDecision {
        AccessDecision::new(
            job_title,
            navigation_item,
            self.access_level(job_title, navigation_item),
        )
    }

    /// Catalog sections a role gets to see, in menu order.
    pub fn menu(&self, job_title: &str) -> Vec<MenuEntry> {
        NAVIGATION_ITEMS
            .iter()
            .filter_map(|item| {
                let access_level = self.access_level(job_title, item);
                (!access_level.is_hidden()).then(|| MenuEntry {
                    navigation_item: item.to_string(),
                    access_level,
                    read_only: access_level.is_read_only(),
                })
            })
            .collect()
    }

    /// Copy of the table with one pair set to `access_level`, added at the
    /// end when the pair had no record.
    pub fn with_access_level(
        &self,
        job_title: &str,
        navigation_item: &str,
        access_level: AccessLevel,
    ) -> Result<Self, TableError> {
        check_pair(job_title, navigation_item)?;

        let mut records = self.records.clone();
        match records
            .iter_mut()
            .find(|record| record.matches(job_title, navigation_item))
        {
            Some(record) => record.access_level = access_level,
            None => records.push(NavigationPermission::new(
                job_title,
                navigation_item,
                access_level,
            )),
        }
        Ok(Self::from_unique(records, self.fallback))
    }

    pub fn records(&self) -> &[NavigationPermission] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
