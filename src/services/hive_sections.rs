//! Hive sections: the same code and lifecycle rules as hives, scoped to the
//! parent hive. A section code only has to be unique among the live sections
//! of its own hive.

use crate::domain::hive::StatusChange;
use crate::domain::hive_section::HiveSection;
use crate::domain::types::{HiveId, HiveSectionCode, HiveSectionId, HiveStatus};
use crate::domain::user::CurrentUser;
use crate::dto::hive_sections::HiveSectionDto;
use crate::forms::hive_sections::UpdateHiveSectionPayload;
use crate::forms::hives::SetHiveStatusPayload;
use crate::repository::{
    HiveReader, HiveSectionListQuery, HiveSectionReader, HiveSectionWriter, RepositoryError,
};

use super::hives::fetch_live_hive;
use super::{HiveConflict, ServiceError, ServiceResult};

/// Return every section of live hive `hive_id`, deleted ones included, in
/// store order.
pub fn show_hive_sections<R>(hive_id: HiveId, repo: &R) -> ServiceResult<Vec<HiveSectionDto>>
where
    R: HiveReader + HiveSectionReader,
{
    fetch_live_hive(hive_id, repo)?;

    match repo.list_hive_sections(HiveSectionListQuery::new(hive_id)) {
        Ok(sections) => Ok(sections.into_iter().map(HiveSectionDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list sections of hive {hive_id}: {e}");
            Err(e.into())
        }
    }
}

pub fn show_hive_section<R>(id: HiveSectionId, repo: &R) -> ServiceResult<HiveSectionDto>
where
    R: HiveSectionReader,
{
    fetch_live_section(id, repo).map(HiveSectionDto::from)
}

/// Add an active section to live hive `hive_id`.
pub fn create_hive_section<R>(
    hive_id: HiveId,
    payload: UpdateHiveSectionPayload,
    user: &CurrentUser,
    repo: &R,
) -> ServiceResult<HiveSectionDto>
where
    R: HiveReader + HiveSectionReader + HiveSectionWriter,
{
    fetch_live_hive(hive_id, repo)?;
    ensure_section_code_available(hive_id, &payload.code, None, repo)?;

    let code = payload.code.clone();
    let new_section = payload.into_new_hive_section(hive_id, user.id);
    match repo.create_hive_section(&new_section) {
        Ok(section) => {
            log::info!(
                "User {} created section {} with code {} in hive {hive_id}",
                user.id,
                section.id,
                section.code
            );
            Ok(section.into())
        }
        Err(RepositoryError::UniqueViolation(message)) => {
            log::warn!("Section code {code} in hive {hive_id} was taken concurrently: {message}");
            Err(HiveConflict::SectionCodeTaken {
                hive_id,
                code,
                holder: None,
            }
            .into())
        }
        Err(e) => {
            log::error!("Failed to create section in hive {hive_id}: {e}");
            Err(e.into())
        }
    }
}

/// Overwrite the name and code of section `id`. The section stays in its
/// hive.
pub fn update_hive_section<R>(
    id: HiveSectionId,
    payload: UpdateHiveSectionPayload,
    user: &CurrentUser,
    repo: &R,
) -> ServiceResult<HiveSectionDto>
where
    R: HiveSectionReader + HiveSectionWriter,
{
    let section = fetch_live_section(id, repo)?;
    let hive_id = section.hive_id;
    ensure_section_code_available(hive_id, &payload.code, Some(id), repo)?;

    let code = payload.code.clone();
    match repo.update_hive_section(id, &payload.into_update(user.id)) {
        Ok(section) => Ok(section.into()),
        Err(RepositoryError::UniqueViolation(message)) => {
            log::warn!("Section code {code} in hive {hive_id} was taken concurrently: {message}");
            Err(HiveConflict::SectionCodeTaken {
                hive_id,
                code,
                holder: None,
            }
            .into())
        }
        Err(e) => {
            log::error!("Failed to update section {id}: {e}");
            Err(e.into())
        }
    }
}

/// Move section `id` between [`HiveStatus::Active`] and
/// [`HiveStatus::PendingDeletion`].
pub fn set_hive_section_status<R>(
    id: HiveSectionId,
    payload: SetHiveStatusPayload,
    user: &CurrentUser,
    repo: &R,
) -> ServiceResult<HiveSectionDto>
where
    R: HiveSectionReader + HiveSectionWriter,
{
    let section = fetch_live_section(id, repo)?;

    if payload.status == HiveStatus::Deleted {
        return Err(HiveConflict::SectionInvalidTransition {
            id,
            status: payload.status,
        }
        .into());
    }

    if section.status == payload.status {
        return Ok(section.into());
    }

    match repo.set_hive_section_status(id, &StatusChange::now(payload.status, user.id)) {
        Ok(section) => {
            log::info!("User {} moved section {id} to {}", user.id, section.status);
            Ok(section.into())
        }
        Err(e) => {
            log::error!("Failed to change status of section {id}: {e}");
            Err(e.into())
        }
    }
}

/// Soft-delete section `id`. Only sections pending deletion can be deleted.
pub fn delete_hive_section<R>(id: HiveSectionId, user: &CurrentUser, repo: &R) -> ServiceResult<()>
where
    R: HiveSectionReader + HiveSectionWriter,
{
    let section = fetch_live_section(id, repo)?;

    if section.status != HiveStatus::PendingDeletion {
        return Err(HiveConflict::SectionNotPendingDeletion {
            id,
            status: section.status,
        }
        .into());
    }

    match repo.set_hive_section_status(id, &StatusChange::now(HiveStatus::Deleted, user.id)) {
        Ok(_) => {
            log::info!("User {} deleted section {id}", user.id);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete section {id}: {e}");
            Err(e.into())
        }
    }
}

fn fetch_live_section<R>(id: HiveSectionId, repo: &R) -> ServiceResult<HiveSection>
where
    R: HiveSectionReader,
{
    match repo.get_hive_section_by_id(id) {
        Ok(Some(section)) if section.status.is_live() => Ok(section),
        Ok(_) => Err(ServiceError::SectionNotFound(id)),
        Err(e) => {
            log::error!("Failed to get section {id}: {e}");
            Err(e.into())
        }
    }
}

/// Fail when a live section of `hive_id` other than `owner` holds `code`.
fn ensure_section_code_available<R>(
    hive_id: HiveId,
    code: &HiveSectionCode,
    owner: Option<HiveSectionId>,
    repo: &R,
) -> ServiceResult<()>
where
    R: HiveSectionReader,
{
    let holders = match repo.find_hive_sections_by_code(hive_id, code) {
        Ok(holders) => holders,
        Err(e) => {
            log::error!("Failed to look up sections of hive {hive_id} by code {code}: {e}");
            return Err(e.into());
        }
    };

    match holders
        .iter()
        .find(|s| s.holds_code(code) && Some(s.id) != owner)
    {
        Some(holder) => Err(HiveConflict::SectionCodeTaken {
            hive_id,
            code: code.clone(),
            holder: Some(holder.id),
        }
        .into()),
        None => Ok(()),
    }
}
