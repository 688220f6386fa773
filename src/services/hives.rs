//! Hive management: validation and mutation rules for hives.
//!
//! Every operation fetches the current state through the repository,
//! validates the request against it and only then writes. A rejected request
//! never leaves a partial write behind.
//!
//! Two callers updating different hives to the same code at the same time can
//! both pass [`ensure_code_available`] before either writes. The SQLite schema
//! carries a partial unique index on live codes for that case, and its
//! violation is reported as [`HiveConflict::CodeTaken`] with no holder.

use crate::domain::hive::{Hive, StatusChange};
use crate::domain::types::{HiveCode, HiveId, HiveStatus};
use crate::domain::user::CurrentUser;
use crate::dto::hives::HiveDto;
use crate::forms::hives::{SetHiveStatusPayload, UpdateHivePayload};
use crate::repository::{HiveListQuery, HiveReader, HiveWriter, RepositoryError};

use super::{HiveConflict, ServiceError, ServiceResult};

/// Return every hive the store knows about, deleted ones included, in store
/// order.
pub fn show_hives<R>(repo: &R) -> ServiceResult<Vec<HiveDto>>
where
    R: HiveReader,
{
    match repo.list_hives(HiveListQuery::default()) {
        Ok(hives) => Ok(hives.into_iter().map(HiveDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list hives: {e}");
            Err(e.into())
        }
    }
}

pub fn show_hive<R>(id: HiveId, repo: &R) -> ServiceResult<HiveDto>
where
    R: HiveReader,
{
    fetch_live_hive(id, repo).map(HiveDto::from)
}

/// Create an active hive on behalf of `user`. The code must not be held by
/// any live hive.
pub fn create_hive<R>(
    payload: UpdateHivePayload,
    user: &CurrentUser,
    repo: &R,
) -> ServiceResult<HiveDto>
where
    R: HiveReader + HiveWriter,
{
    ensure_code_available(&payload.code, None, repo)?;

    let code = payload.code.clone();
    let new_hive = payload.into_new_hive(user.id);
    match repo.create_hive(&new_hive) {
        Ok(hive) => {
            log::info!(
                "User {} created hive {} with code {}",
                user.id,
                hive.id,
                hive.code
            );
            Ok(hive.into())
        }
        Err(RepositoryError::UniqueViolation(message)) => {
            log::warn!("Hive code {code} was taken concurrently: {message}");
            Err(HiveConflict::CodeTaken { code, holder: None }.into())
        }
        Err(e) => {
            log::error!("Failed to create hive: {e}");
            Err(e.into())
        }
    }
}

/// Overwrite the name and code of hive `id`.
///
/// A hive may keep its own code; the request is rejected only when a
/// different live hive currently holds it.
pub fn update_hive<R>(
    id: HiveId,
    payload: UpdateHivePayload,
    user: &CurrentUser,
    repo: &R,
) -> ServiceResult<HiveDto>
where
    R: HiveReader + HiveWriter,
{
    fetch_live_hive(id, repo)?;
    ensure_code_available(&payload.code, Some(id), repo)?;

    let code = payload.code.clone();
    match repo.update_hive(id, &payload.into_update(user.id)) {
        Ok(hive) => Ok(hive.into()),
        Err(RepositoryError::UniqueViolation(message)) => {
            log::warn!("Hive code {code} was taken concurrently: {message}");
            Err(HiveConflict::CodeTaken { code, holder: None }.into())
        }
        Err(e) => {
            log::error!("Failed to update hive {id}: {e}");
            Err(e.into())
        }
    }
}

/// Move hive `id` between [`HiveStatus::Active`] and
/// [`HiveStatus::PendingDeletion`]. Asking for the current status is a no-op.
pub fn set_hive_status<R>(
    id: HiveId,
    payload: SetHiveStatusPayload,
    user: &CurrentUser,
    repo: &R,
) -> ServiceResult<HiveDto>
where
    R: HiveReader + HiveWriter,
{
    let hive = fetch_live_hive(id, repo)?;

    if payload.status == HiveStatus::Deleted {
        return Err(HiveConflict::InvalidTransition {
            id,
            status: payload.status,
        }
        .into());
    }

    if hive.status == payload.status {
        return Ok(hive.into());
    }

    match repo.set_hive_status(id, &StatusChange::now(payload.status, user.id)) {
        Ok(hive) => {
            log::info!("User {} moved hive {id} to {}", user.id, hive.status);
            Ok(hive.into())
        }
        Err(e) => {
            log::error!("Failed to change status of hive {id}: {e}");
            Err(e.into())
        }
    }
}

/// Soft-delete hive `id`. Only hives pending deletion can be deleted.
pub fn delete_hive<R>(id: HiveId, user: &CurrentUser, repo: &R) -> ServiceResult<()>
where
    R: HiveReader + HiveWriter,
{
    let hive = fetch_live_hive(id, repo)?;

    if hive.status != HiveStatus::PendingDeletion {
        return Err(HiveConflict::NotPendingDeletion {
            id,
            status: hive.status,
        }
        .into());
    }

    match repo.set_hive_status(id, &StatusChange::now(HiveStatus::Deleted, user.id)) {
        Ok(_) => {
            log::info!("User {} deleted hive {id}", user.id);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete hive {id}: {e}");
            Err(e.into())
        }
    }
}

/// Deleted hives are terminal and answer as missing.
pub(super) fn fetch_live_hive<R>(id: HiveId, repo: &R) -> ServiceResult<Hive>
where
    R: HiveReader,
{
    match repo.get_hive_by_id(id) {
        Ok(Some(hive)) if hive.status.is_live() => Ok(hive),
        Ok(_) => Err(ServiceError::NotFound(id)),
        Err(e) => {
            log::error!("Failed to get hive {id}: {e}");
            Err(e.into())
        }
    }
}

/// Fail when a live hive other than `owner` holds `code`.
fn ensure_code_available<R>(code: &HiveCode, owner: Option<HiveId>, repo: &R) -> ServiceResult<()>
where
    R: HiveReader,
{
    let holders = match repo.find_hives_by_code(code) {
        Ok(holders) => holders,
        Err(e) => {
            log::error!("Failed to look up hives by code {code}: {e}");
            return Err(e.into());
        }
    };

    match holders
        .iter()
        .find(|h| h.holds_code(code) && Some(h.id) != owner)
    {
        Some(holder) => Err(HiveConflict::CodeTaken {
            code: code.clone(),
            holder: Some(holder.id),
        }
        .into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hive::{HiveUpdate, NewHive};
    use crate::domain::types::{HiveName, UserId};
    use crate::repository::RepositoryResult;
    use crate::repository::test::TestRepository;
    use chrono::DateTime;
    use diesel::result::Error as DieselError;

    fn sample_hive(id: i32, code: &str, status: HiveStatus) -> Hive {
        Hive {
            id: HiveId::new(id).unwrap(),
            name: HiveName::new(format!("Hive {id}")).unwrap(),
            code: HiveCode::new(code).unwrap(),
            status,
            created_by: UserId::new(1).unwrap(),
            last_updated_by: UserId::new(1).unwrap(),
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
            updated_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    fn payload(name: &str, code: &str) -> UpdateHivePayload {
        UpdateHivePayload {
            name: HiveName::new(name).unwrap(),
            code: HiveCode::new(code).unwrap(),
        }
    }

    fn id(value: i32) -> HiveId {
        HiveId::new(value).unwrap()
    }

    fn user() -> CurrentUser {
        CurrentUser::new(UserId::new(7).unwrap())
    }

    /// Reads from an in-memory store; every write hits the unique index.
    struct RacingRepository(TestRepository);

    impl HiveReader for RacingRepository {
        fn list_hives(&self, query: HiveListQuery) -> RepositoryResult<Vec<Hive>> {
            self.0.list_hives(query)
        }

        fn get_hive_by_id(&self, id: HiveId) -> RepositoryResult<Option<Hive>> {
            self.0.get_hive_by_id(id)
        }

        fn find_hives_by_code(&self, code: &HiveCode) -> RepositoryResult<Vec<Hive>> {
            self.0.find_hives_by_code(code)
        }
    }

    impl HiveWriter for RacingRepository {
        fn create_hive(&self, _hive: &NewHive) -> RepositoryResult<Hive> {
            Err(RepositoryError::UniqueViolation(
                "UNIQUE constraint failed: hives.code".to_string(),
            ))
        }

        fn update_hive(&self, _id: HiveId, _update: &HiveUpdate) -> RepositoryResult<Hive> {
            Err(RepositoryError::UniqueViolation(
                "UNIQUE constraint failed: hives.code".to_string(),
            ))
        }

        fn set_hive_status(&self, id: HiveId, change: &StatusChange) -> RepositoryResult<Hive> {
            self.0.set_hive_status(id, change)
        }
    }

    /// A store whose every call fails.
    struct BrokenRepository;

    impl BrokenRepository {
        fn failure() -> RepositoryError {
            RepositoryError::Database(DieselError::BrokenTransactionManager)
        }
    }

    impl HiveReader for BrokenRepository {
        fn list_hives(&self, _query: HiveListQuery) -> RepositoryResult<Vec<Hive>> {
            Err(Self::failure())
        }

        fn get_hive_by_id(&self, _id: HiveId) -> RepositoryResult<Option<Hive>> {
            Err(Self::failure())
        }

        fn find_hives_by_code(&self, _code: &HiveCode) -> RepositoryResult<Vec<Hive>> {
            Err(Self::failure())
        }
    }

    impl HiveWriter for BrokenRepository {
        fn create_hive(&self, _hive: &NewHive) -> RepositoryResult<Hive> {
            Err(Self::failure())
        }

        fn update_hive(&self, _id: HiveId, _update: &HiveUpdate) -> RepositoryResult<Hive> {
            Err(Self::failure())
        }

        fn set_hive_status(&self, _id: HiveId, _change: &StatusChange) -> RepositoryResult<Hive> {
            Err(Self::failure())
        }
    }

    fn two_hives() -> TestRepository {
        TestRepository::new(vec![
            sample_hive(1, "A", HiveStatus::Active),
            sample_hive(2, "B", HiveStatus::Active),
        ])
    }

    #[test]
    fn lists_every_stored_hive_in_order() {
        let repo = TestRepository::new(vec![
            sample_hive(1, "A", HiveStatus::Active),
            sample_hive(2, "B", HiveStatus::PendingDeletion),
            sample_hive(3, "C", HiveStatus::Deleted),
        ]);

        let hives = show_hives(&repo).unwrap();

        assert_eq!(hives.len(), 3);
        assert_eq!(
            hives.iter().map(|h| h.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(!hives[0].is_deleted);
        assert!(hives[1].is_deleted);
        assert_eq!(hives[2].status, "deleted");
    }

    #[test]
    fn lists_nothing_from_an_empty_store() {
        let repo = TestRepository::default();
        assert!(show_hives(&repo).unwrap().is_empty());
    }

    #[test]
    fn show_hive_hides_deleted_hives() {
        let repo = TestRepository::new(vec![sample_hive(1, "A", HiveStatus::Deleted)]);

        let err = show_hive(id(1), &repo).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn create_assigns_id_and_starts_active() {
        let repo = two_hives();

        let hive = create_hive(payload("Cellar", "C"), &user(), &repo).unwrap();

        assert_eq!(hive.id, 3);
        assert_eq!(hive.name, "Cellar");
        assert_eq!(hive.code, "C");
        assert_eq!(hive.status, "active");
        assert!(!hive.is_deleted);
        assert_eq!(repo.snapshot().len(), 3);
    }

    #[test]
    fn create_rejects_code_held_by_live_hive() {
        let repo = two_hives();

        let err = create_hive(payload("Cellar", "B"), &user(), &repo).unwrap_err();

        match err {
            ServiceError::Conflict(HiveConflict::CodeTaken { code, holder }) => {
                assert_eq!(code, "B");
                assert_eq!(holder, Some(id(2)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(repo.writes(), 0);
    }

    #[test]
    fn create_rejects_code_held_by_hive_pending_deletion() {
        let repo = TestRepository::new(vec![sample_hive(1, "A", HiveStatus::PendingDeletion)]);

        let err = create_hive(payload("Cellar", "A"), &user(), &repo).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn create_reuses_code_of_deleted_hive() {
        let repo = TestRepository::new(vec![sample_hive(1, "A", HiveStatus::Deleted)]);

        let hive = create_hive(payload("Cellar", "A"), &user(), &repo).unwrap();
        assert_eq!(hive.id, 2);
        assert_eq!(hive.code, "A");
    }

    #[test]
    fn update_unknown_hive_is_not_found() {
        let repo = two_hives();

        let err = update_hive(id(42), payload("X", "Z"), &user(), &repo).unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(missing) if missing == 42));
        assert_eq!(repo.writes(), 0);
    }

    #[test]
    fn update_deleted_hive_is_not_found() {
        let repo = TestRepository::new(vec![sample_hive(1, "A", HiveStatus::Deleted)]);

        let err = update_hive(id(1), payload("X", "Z"), &user(), &repo).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn update_rejects_code_of_another_hive() {
        let repo = two_hives();

        let err = update_hive(id(1), payload("X", "B"), &user(), &repo).unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Conflict(HiveConflict::CodeTaken { holder: Some(holder), .. })
                if holder == 2
        ));
        assert_eq!(repo.snapshot(), two_hives().snapshot());
    }

    #[test]
    fn update_with_free_code_overwrites_name_and_code() {
        let repo = two_hives();

        let hive = update_hive(id(1), payload("X", "C"), &user(), &repo).unwrap();

        assert_eq!(hive.id, 1);
        assert_eq!(hive.name, "X");
        assert_eq!(hive.code, "C");
        let stored = repo.snapshot();
        assert_eq!(stored[0].name, "X");
        assert_eq!(stored[0].code, "C");
        assert_eq!(stored[1].code, "B");
    }

    #[test]
    fn update_keeps_own_code() {
        let repo = two_hives();

        let hive = update_hive(id(1), payload("Renamed", "A"), &user(), &repo).unwrap();

        assert_eq!(hive.name, "Renamed");
        assert_eq!(hive.code, "A");
    }

    #[test]
    fn update_may_take_code_of_deleted_hive() {
        let repo = TestRepository::new(vec![
            sample_hive(1, "A", HiveStatus::Active),
            sample_hive(2, "B", HiveStatus::Deleted),
        ]);

        let hive = update_hive(id(1), payload("X", "B"), &user(), &repo).unwrap();
        assert_eq!(hive.code, "B");
    }

    #[test]
    fn repeated_update_yields_same_hive() {
        let repo = two_hives();

        let first = update_hive(id(1), payload("X", "C"), &user(), &repo).unwrap();
        let second = update_hive(id(1), payload("X", "C"), &user(), &repo).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.name, second.name);
        assert_eq!(first.code, second.code);
        assert_eq!(first.status, second.status);
        assert_eq!(repo.snapshot().len(), 2);
    }

    #[test]
    fn delete_unknown_hive_is_not_found() {
        let repo = two_hives();

        let err = delete_hive(id(7), &user(), &repo).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn delete_active_hive_is_conflict() {
        let repo = two_hives();

        let err = delete_hive(id(1), &user(), &repo).unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Conflict(HiveConflict::NotPendingDeletion {
                status: HiveStatus::Active,
                ..
            })
        ));
        assert_eq!(repo.writes(), 0);
    }

    #[test]
    fn delete_succeeds_once_hive_is_pending_deletion() {
        let repo = TestRepository::new(vec![sample_hive(1, "A", HiveStatus::Active)]);

        assert!(delete_hive(id(1), &user(), &repo).unwrap_err().is_conflict());

        repo.force_status(id(1), HiveStatus::PendingDeletion);
        delete_hive(id(1), &user(), &repo).unwrap();

        let stored = repo.snapshot();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].status, HiveStatus::Deleted);
        assert!(delete_hive(id(1), &user(), &repo).unwrap_err().is_not_found());
    }

    #[test]
    fn status_change_then_delete() {
        let repo = TestRepository::new(vec![sample_hive(1, "A", HiveStatus::Active)]);

        let hive = set_hive_status(
            id(1),
            SetHiveStatusPayload {
                status: HiveStatus::PendingDeletion,
            },
            &user(),
            &repo,
        )
        .unwrap();
        assert_eq!(hive.status, "pending_deletion");
        assert!(hive.is_deleted);

        delete_hive(id(1), &user(), &repo).unwrap();
        assert!(show_hive(id(1), &repo).unwrap_err().is_not_found());
    }

    #[test]
    fn status_change_can_reactivate() {
        let repo = TestRepository::new(vec![sample_hive(1, "A", HiveStatus::PendingDeletion)]);

        let hive = set_hive_status(
            id(1),
            SetHiveStatusPayload {
                status: HiveStatus::Active,
            },
            &user(),
            &repo,
        )
        .unwrap();

        assert_eq!(hive.status, "active");
        assert!(delete_hive(id(1), &user(), &repo).unwrap_err().is_conflict());
    }

    #[test]
    fn status_change_to_current_status_does_not_write() {
        let repo = two_hives();

        set_hive_status(
            id(1),
            SetHiveStatusPayload {
                status: HiveStatus::Active,
            },
            &user(),
            &repo,
        )
        .unwrap();

        assert_eq!(repo.writes(), 0);
    }

    #[test]
    fn status_change_refuses_deleted() {
        let repo = two_hives();

        let err = set_hive_status(
            id(1),
            SetHiveStatusPayload {
                status: HiveStatus::Deleted,
            },
            &user(),
            &repo,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Conflict(HiveConflict::InvalidTransition { .. })
        ));
    }

    #[test]
    fn create_records_the_acting_user() {
        let repo = two_hives();

        let hive = create_hive(payload("Cellar", "C"), &user(), &repo).unwrap();

        assert_eq!(hive.created_by, 7);
        assert_eq!(hive.last_updated_by, 7);
    }

    #[test]
    fn update_and_status_change_record_the_acting_user() {
        let repo = two_hives();
        let editor = CurrentUser::new(UserId::new(9).unwrap());

        let hive = update_hive(id(1), payload("X", "C"), &editor, &repo).unwrap();
        assert_eq!(hive.created_by, 1);
        assert_eq!(hive.last_updated_by, 9);

        let hive = set_hive_status(
            id(2),
            SetHiveStatusPayload {
                status: HiveStatus::PendingDeletion,
            },
            &editor,
            &repo,
        )
        .unwrap();
        assert_eq!(hive.last_updated_by, 9);
    }

    #[test]
    fn create_reports_index_collision_without_holder() {
        let repo = RacingRepository(two_hives());

        let err = create_hive(payload("Cellar", "C"), &user(), &repo).unwrap_err();

        match err {
            ServiceError::Conflict(HiveConflict::CodeTaken { code, holder }) => {
                assert_eq!(code, "C");
                assert_eq!(holder, None);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn update_reports_index_collision_without_holder() {
        let repo = RacingRepository(two_hives());

        let err = update_hive(id(1), payload("X", "C"), &user(), &repo).unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Conflict(HiveConflict::CodeTaken { holder: None, .. })
        ));
        assert_eq!(repo.0.snapshot(), two_hives().snapshot());
    }

    #[test]
    fn store_failures_pass_through_as_repository_errors() {
        let repo = BrokenRepository;

        assert!(matches!(
            show_hives(&repo),
            Err(ServiceError::Repository(RepositoryError::Database(_)))
        ));
        assert!(matches!(
            show_hive(id(1), &repo),
            Err(ServiceError::Repository(_))
        ));
        assert!(matches!(
            create_hive(payload("Cellar", "C"), &user(), &repo),
            Err(ServiceError::Repository(_))
        ));
        assert!(matches!(
            delete_hive(id(1), &user(), &repo),
            Err(ServiceError::Repository(_))
        ));
    }
}
