use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use serde::Serialize;

use crate::domain::types::UserId;
use crate::domain::user::CurrentUser;
use crate::services::ServiceError;

pub mod hive_sections;
pub mod hives;

/// Header carrying the id of the user a request acts for.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Translate a service failure into the matching HTTP response.
pub fn service_error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound(_) | ServiceError::SectionNotFound(_) => {
            HttpResponse::NotFound().json(ErrorBody::new(err.to_string()))
        }
        ServiceError::Conflict(_) => {
            HttpResponse::Conflict().json(ErrorBody::new(err.to_string()))
        }
        ServiceError::TypeConstraint(_) | ServiceError::Form(_) => {
            HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()))
        }
        ServiceError::Repository(e) => {
            log::error!("Repository failure while serving request: {e}");
            HttpResponse::InternalServerError().json(ErrorBody::new("internal error"))
        }
    }
}

fn current_user(req: &HttpRequest) -> Result<CurrentUser, String> {
    let raw = req
        .headers()
        .get(USER_ID_HEADER)
        .ok_or_else(|| format!("missing {USER_ID_HEADER} header"))?;
    let id = raw
        .to_str()
        .ok()
        .and_then(|value| value.trim().parse::<i32>().ok())
        .ok_or_else(|| format!("{USER_ID_HEADER} must be a number"))?;
    let id = UserId::new(id).map_err(|e| e.to_string())?;
    Ok(CurrentUser::new(id))
}

/// Mutating endpoints take the acting user from the `X-User-Id` header.
impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(current_user(req).map_err(|message| {
            log::warn!("Rejected request to {}: {message}", req.path());
            let response = HttpResponse::Unauthorized().json(ErrorBody::new(message.clone()));
            InternalError::from_response(message, response).into()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{HiveCode, HiveId};
    use crate::repository::RepositoryError;
    use crate::services::HiveConflict;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    #[test]
    fn store_failures_answer_internal_server_error() {
        let err = ServiceError::Repository(RepositoryError::ValidationError(
            "hive code cannot be empty".to_string(),
        ));

        let response = service_error_response(err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn service_errors_map_to_status_codes() {
        let id = HiveId::new(1).unwrap();
        let conflict = HiveConflict::CodeTaken {
            code: HiveCode::new("A").unwrap(),
            holder: None,
        };

        assert_eq!(
            service_error_response(ServiceError::NotFound(id)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            service_error_response(conflict.into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            service_error_response(ServiceError::Form("bad".to_string())).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn reads_acting_user_from_header() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, " 7 "))
            .to_http_request();
        assert_eq!(current_user(&req).unwrap().id, 7);

        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "0"))
            .to_http_request();
        assert!(current_user(&req).is_err());

        let req = TestRequest::default().to_http_request();
        assert!(current_user(&req).is_err());
    }
}
