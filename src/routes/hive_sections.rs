use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::types::HiveSectionId;
use crate::domain::user::CurrentUser;
use crate::forms::hive_sections::{UpdateHiveSectionForm, UpdateHiveSectionPayload};
use crate::forms::hives::{SetHiveStatusForm, SetHiveStatusPayload};
use crate::repository::DieselRepository;
use crate::routes::hives::parse_hive_id;
use crate::routes::{ErrorBody, service_error_response};
use crate::services::hive_sections::{
    create_hive_section as create_hive_section_service,
    delete_hive_section as delete_hive_section_service,
    set_hive_section_status as set_hive_section_status_service,
    show_hive_section as show_hive_section_service,
    show_hive_sections as show_hive_sections_service,
    update_hive_section as update_hive_section_service,
};

/// Register the hive section endpoints on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_hive_sections)
        .service(create_hive_section)
        .service(show_hive_section)
        .service(update_hive_section)
        .service(set_hive_section_status)
        .service(delete_hive_section);
}

fn parse_section_id(raw: i32) -> Result<HiveSectionId, HttpResponse> {
    HiveSectionId::new(raw).map_err(|_| {
        HttpResponse::NotFound().json(ErrorBody::new(format!("hive section {raw} not found")))
    })
}

#[get("/hives/{hive_id}/sections")]
pub async fn list_hive_sections(
    hive_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let hive_id = match parse_hive_id(hive_id.into_inner()) {
        Ok(hive_id) => hive_id,
        Err(response) => return response,
    };

    match show_hive_sections_service(hive_id, repo.get_ref()) {
        Ok(sections) => HttpResponse::Ok().json(sections),
        Err(err) => service_error_response(err),
    }
}

#[post("/hives/{hive_id}/sections")]
pub async fn create_hive_section(
    hive_id: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateHiveSectionForm>,
) -> impl Responder {
    let hive_id = match parse_hive_id(hive_id.into_inner()) {
        Ok(hive_id) => hive_id,
        Err(response) => return response,
    };

    let payload: UpdateHiveSectionPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(e.into()),
    };

    match create_hive_section_service(hive_id, payload, &user, repo.get_ref()) {
        Ok(section) => HttpResponse::Created().json(section),
        Err(err) => service_error_response(err),
    }
}

#[get("/sections/{section_id}")]
pub async fn show_hive_section(
    section_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let section_id = match parse_section_id(section_id.into_inner()) {
        Ok(section_id) => section_id,
        Err(response) => return response,
    };

    match show_hive_section_service(section_id, repo.get_ref()) {
        Ok(section) => HttpResponse::Ok().json(section),
        Err(err) => service_error_response(err),
    }
}

#[put("/sections/{section_id}")]
pub async fn update_hive_section(
    section_id: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateHiveSectionForm>,
) -> impl Responder {
    let section_id = match parse_section_id(section_id.into_inner()) {
        Ok(section_id) => section_id,
        Err(response) => return response,
    };

    let payload: UpdateHiveSectionPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(e.into()),
    };

    match update_hive_section_service(section_id, payload, &user, repo.get_ref()) {
        Ok(section) => HttpResponse::Ok().json(section),
        Err(err) => service_error_response(err),
    }
}

#[put("/sections/{section_id}/status")]
pub async fn set_hive_section_status(
    section_id: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SetHiveStatusForm>,
) -> impl Responder {
    let section_id = match parse_section_id(section_id.into_inner()) {
        Ok(section_id) => section_id,
        Err(response) => return response,
    };

    let payload: SetHiveStatusPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(e.into()),
    };

    match set_hive_section_status_service(section_id, payload, &user, repo.get_ref()) {
        Ok(section) => HttpResponse::Ok().json(section),
        Err(err) => service_error_response(err),
    }
}

#[delete("/sections/{section_id}")]
pub async fn delete_hive_section(
    section_id: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let section_id = match parse_section_id(section_id.into_inner()) {
        Ok(section_id) => section_id,
        Err(response) => return response,
    };

    match delete_hive_section_service(section_id, &user, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => service_error_response(err),
    }
}
