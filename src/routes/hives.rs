use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::types::HiveId;
use crate::domain::user::CurrentUser;
use crate::forms::hives::{
    SetHiveStatusForm, SetHiveStatusPayload, UpdateHiveForm, UpdateHivePayload,
};
use crate::repository::DieselRepository;
use crate::routes::{ErrorBody, service_error_response};
use crate::services::hives::{
    create_hive as create_hive_service, delete_hive as delete_hive_service,
    set_hive_status as set_hive_status_service, show_hive as show_hive_service,
    show_hives as show_hives_service, update_hive as update_hive_service,
};

/// Register the hive endpoints on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_hives)
        .service(create_hive)
        .service(show_hive)
        .service(update_hive)
        .service(set_hive_status)
        .service(delete_hive);
}

/// Ids that cannot exist are answered like missing hives.
pub(crate) fn parse_hive_id(raw: i32) -> Result<HiveId, HttpResponse> {
    HiveId::new(raw).map_err(|_| {
        HttpResponse::NotFound().json(ErrorBody::new(format!("hive {raw} not found")))
    })
}

#[get("/hives")]
pub async fn list_hives(repo: web::Data<DieselRepository>) -> impl Responder {
    match show_hives_service(repo.get_ref()) {
        Ok(hives) => HttpResponse::Ok().json(hives),
        Err(err) => service_error_response(err),
    }
}

#[post("/hives")]
pub async fn create_hive(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateHiveForm>,
) -> impl Responder {
    let payload: UpdateHivePayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(e.into()),
    };

    match create_hive_service(payload, &user, repo.get_ref()) {
        Ok(hive) => HttpResponse::Created().json(hive),
        Err(err) => service_error_response(err),
    }
}

#[get("/hives/{hive_id}")]
pub async fn show_hive(
    hive_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let hive_id = match parse_hive_id(hive_id.into_inner()) {
        Ok(hive_id) => hive_id,
        Err(response) => return response,
    };

    match show_hive_service(hive_id, repo.get_ref()) {
        Ok(hive) => HttpResponse::Ok().json(hive),
        Err(err) => service_error_response(err),
    }
}

#[put("/hives/{hive_id}")]
pub async fn update_hive(
    hive_id: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateHiveForm>,
) -> impl Responder {
    let hive_id = match parse_hive_id(hive_id.into_inner()) {
        Ok(hive_id) => hive_id,
        Err(response) => return response,
    };

    let payload: UpdateHivePayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(e.into()),
    };

    match update_hive_service(hive_id, payload, &user, repo.get_ref()) {
        Ok(hive) => HttpResponse::Ok().json(hive),
        Err(err) => service_error_response(err),
    }
}

#[put("/hives/{hive_id}/status")]
pub async fn set_hive_status(
    hive_id: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SetHiveStatusForm>,
) -> impl Responder {
    let hive_id = match parse_hive_id(hive_id.into_inner()) {
        Ok(hive_id) => hive_id,
        Err(response) => return response,
    };

    let payload: SetHiveStatusPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(e.into()),
    };

    match set_hive_status_service(hive_id, payload, &user, repo.get_ref()) {
        Ok(hive) => HttpResponse::Ok().json(hive),
        Err(err) => service_error_response(err),
    }
}

#[delete("/hives/{hive_id}")]
pub async fn delete_hive(
    hive_id: web::Path<i32>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let hive_id = match parse_hive_id(hive_id.into_inner()) {
        Ok(hive_id) => hive_id,
        Err(response) => return response,
    };

    match delete_hive_service(hive_id, &user, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => service_error_response(err),
    }
}
