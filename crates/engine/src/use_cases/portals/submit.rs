//! Submit portal use case.
//!
//! Records a user-reported portal between two zones. Both ends are resolved
//! from free text, and a newer report for the same pair replaces the old one.

use std::sync::Arc;

use chrono::Duration;
use cortex_domain::{DomainError, Portal};
use tracing::info;

use crate::cartography::LocationResolver;
use crate::entities::Portals;
use crate::infrastructure::ports::RepoError;

/// A portal report as typed by a user.
#[derive(Debug, Clone)]
pub struct PortalSubmission {
    pub from: String,
    pub to: String,
    /// How long the portal stays open from now.
    pub lifetime: Duration,
    pub submitter: String,
    /// Ranks ambiguous names by distance from here.
    pub home: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitPortalError {
    #[error("No zone matches '{0}'")]
    UnknownZone(String),
    #[error("Invalid portal: {0}")]
    Invalid(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

pub struct SubmitPortal {
    resolver: Arc<LocationResolver>,
    portals: Arc<Portals>,
}

impl SubmitPortal {
    pub fn new(resolver: Arc<LocationResolver>, portals: Arc<Portals>) -> Self {
        Self { resolver, portals }
    }

    pub async fn execute(&self, submission: PortalSubmission) -> Result<Portal, SubmitPortalError> {
        let home = submission.home.as_deref();
        let from = self
            .resolver
            .best_guess(&submission.from, home)
            .ok_or_else(|| SubmitPortalError::UnknownZone(submission.from.clone()))?;
        let to = self
            .resolver
            .best_guess(&submission.to, home)
            .ok_or_else(|| SubmitPortalError::UnknownZone(submission.to.clone()))?;

        let now = self.portals.now();
        let expires_at = now
            .checked_add_signed(submission.lifetime)
            .ok_or_else(|| DomainError::validation("portal lifetime is out of range"))?;
        let portal = Portal::new(from, to, expires_at, submission.submitter, now)?;

        if let Some(existing) = self
            .portals
            .find_between(&portal.from_zone, &portal.to_zone)
            .await?
        {
            info!(portal_id = %existing.id, portal = %existing, "Replacing portal");
            self.portals.delete(existing.id).await?;
        }

        self.portals.save(&portal).await?;
        info!(portal_id = %portal.id, portal = %portal, submitter = %portal.submitter, "Portal submitted");
        Ok(portal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockPortalRepo;
    use crate::test_fixtures::{fixed_clock, fixed_now, fixture_resolver, portal};

    fn submission(from: &str, to: &str, minutes: i64) -> PortalSubmission {
        PortalSubmission {
            from: from.to_string(),
            to: to.to_string(),
            lifetime: Duration::minutes(minutes),
            submitter: "@scout".to_string(),
            home: None,
        }
    }

    fn use_case(repo: MockPortalRepo) -> SubmitPortal {
        SubmitPortal::new(
            Arc::new(fixture_resolver()),
            Arc::new(Portals::new(Arc::new(repo), Arc::new(fixed_clock()))),
        )
    }

    #[tokio::test]
    async fn resolves_names_and_saves() {
        let mut repo = MockPortalRepo::new();
        repo.expect_find_between().returning(|_, _| Ok(None));
        repo.expect_delete().never();
        repo.expect_save()
            .withf(|portal| {
                portal.from_zone == "Scuttlesink Marsh"
                    && portal.to_zone == "Qiient-Al-Nusom"
                    && portal.expires_at == fixed_now() + Duration::minutes(90)
            })
            .times(1)
            .returning(|_| Ok(()));

        let saved = use_case(repo)
            .execute(submission("scuttlesink", "qan", 90))
            .await
            .expect("submit");

        assert_eq!(saved.submitted_at, fixed_now());
    }

    #[tokio::test]
    async fn replaces_an_existing_pair() {
        let existing = portal("Qiient-Al-Nusom", "Scuttlesink Marsh");
        let existing_id = existing.id;
        let mut repo = MockPortalRepo::new();
        repo.expect_find_between()
            .returning(move |_, _| Ok(Some(existing.clone())));
        repo.expect_delete()
            .withf(move |id| *id == existing_id)
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_save().times(1).returning(|_| Ok(()));

        use_case(repo)
            .execute(submission("Scuttlesink Marsh", "Qiient-Al-Nusom", 30))
            .await
            .expect("submit");
    }

    #[tokio::test]
    async fn unknown_zone_is_rejected() {
        let mut repo = MockPortalRepo::new();
        repo.expect_save().never();

        let err = use_case(repo)
            .execute(submission("Scuttlesink Marsh", "zzz-nonexistent", 30))
            .await
            .expect_err("should fail");

        assert!(matches!(err, SubmitPortalError::UnknownZone(query) if query == "zzz-nonexistent"));
    }

    #[tokio::test]
    async fn non_positive_lifetime_is_invalid() {
        let mut repo = MockPortalRepo::new();
        repo.expect_save().never();

        let err = use_case(repo)
            .execute(submission("Scuttlesink Marsh", "Qiient-Al-Nusom", 0))
            .await
            .expect_err("should fail");

        assert!(matches!(err, SubmitPortalError::Invalid(_)));
    }

    #[tokio::test]
    async fn out_of_range_lifetime_is_invalid() {
        let mut repo = MockPortalRepo::new();
        repo.expect_save().never();
        let mut endless = submission("Scuttlesink Marsh", "Qiient-Al-Nusom", 30);
        endless.lifetime = Duration::MAX;

        let err = use_case(repo)
            .execute(endless)
            .await
            .expect_err("should fail");

        assert!(matches!(
            err,
            SubmitPortalError::Invalid(DomainError::Validation(ref message))
                if message.contains("out of range")
        ));
    }

    #[tokio::test]
    async fn same_zone_is_invalid() {
        let mut repo = MockPortalRepo::new();
        repo.expect_save().never();

        let err = use_case(repo)
            .execute(submission("marsh", "Scuttlesink Marsh", 30))
            .await
            .expect_err("should fail");

        assert!(matches!(err, SubmitPortalError::Invalid(_)));
    }
}
