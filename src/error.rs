use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use leptos::logging;
use thiserror::Error;

use crate::app::render_not_found;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl AppError {
    pub fn item_not_found(id: impl ToString) -> Self {
        AppError::NotFound {
            entity: "item",
            id: id.to_string(),
        }
    }

    pub fn page_not_found(path: impl ToString) -> Self {
        AppError::NotFound {
            entity: "page",
            id: path.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound { entity, id } => {
                logging::log!("[API] {} not found: {}", entity, id);
                HttpResponse::build(self.status_code())
                    .content_type(ContentType::html())
                    .body(render_not_found())
            }
            AppError::Database(err) => {
                logging::error!("[API] Database error: {:?}", err);
                HttpResponse::build(self.status_code()).body("Internal server error")
            }
        }
    }
}
