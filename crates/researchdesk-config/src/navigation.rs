use std::env;

use researchdesk_models::AccessLevel;
use tracing::warn;

/// Resolver settings.
///
/// `NAVIGATION_FALLBACK_ACCESS` picks the level returned for pairs with no
/// stored record. It defaults to `edit` (fail-open); deployments that prefer
/// unknown sections to disappear set it to `hide`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationConfig {
    pub fallback_access: AccessLevel,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            fallback_access: AccessLevel::Edit,
        }
    }
}

impl NavigationConfig {
    pub fn from_env() -> Self {
        let fallback_access = match env::var("NAVIGATION_FALLBACK_ACCESS") {
            Ok(value) => value.parse().unwrap_or_else(|err| {
                warn!("{}; keeping fail-open fallback", err);
                AccessLevel::Edit
            }),
            Err(_) => AccessLevel::Edit,
        };

        Self { fallback_access }
    }
}
