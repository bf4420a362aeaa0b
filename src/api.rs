use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use leptos::logging::log;
use serde::Deserialize;

use crate::app::{render_index, render_item_page};
use crate::components::review_form::ReviewDraft;
use crate::db::Database;
use crate::error::AppError;
use crate::flash::{FlashStore, SessionId, THANKS, THANKS_MESSAGE};
use crate::models::item::{item_path, parse_item_id, ItemId};
use crate::models::review::Review;

/// Fields accepted from the review form. Anything else in the body,
/// `status` included, is ignored: new reviews always start as drafts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewSubmission {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub review: String,
}

impl ReviewSubmission {
    pub fn to_review(&self) -> Review {
        Review::new(self.author.trim(), self.review.clone())
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/item/{id}", web::get().to(show_item))
        .route("/item/{id}/review", web::post().to(submit_review));
}

fn resolve_item_id(raw: &str) -> Result<ItemId, AppError> {
    parse_item_id(raw).ok_or_else(|| AppError::item_not_found(raw))
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}

async fn published_reviews(db: &Database, item_id: ItemId) -> Result<Vec<Review>, AppError> {
    let reviews = db.reviews_of(item_id).await?;
    Ok(reviews.into_iter().filter(Review::is_published).collect())
}

pub async fn index(db: web::Data<Database>) -> Result<HttpResponse, AppError> {
    let items = db.list_items().await?;
    Ok(html(StatusCode::OK, render_index(items)))
}

pub async fn show_item(
    req: HttpRequest,
    db: web::Data<Database>,
    flash: web::Data<FlashStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let item_id = resolve_item_id(&path)?;
    let item = db.find_item(item_id).await?;

    let reviews = published_reviews(&db, item_id).await?;

    // Must stay after every fallible step above
    let notice = match SessionId::from_request(&req) {
        Some(session) => flash.take(session, THANKS).await,
        None => None,
    };
    log!("[API] Showing item {} with {} published reviews", item_id, reviews.len());

    Ok(html(
        StatusCode::OK,
        render_item_page(item_id, item, reviews, notice, ReviewDraft::default()),
    ))
}

pub async fn submit_review(
    req: HttpRequest,
    db: web::Data<Database>,
    flash: web::Data<FlashStore>,
    path: web::Path<String>,
    form: web::Form<ReviewSubmission>,
) -> Result<HttpResponse, AppError> {
    let item_id = resolve_item_id(&path)?;
    let item = db.find_item(item_id).await?;
    let submission = form.into_inner();

    let mut review = submission.to_review();
    if !db.add_review(item_id, &mut review).await? {
        log!("[API] Rejected review for item {}", item_id);
        let draft = ReviewDraft {
            author: submission.author,
            review: submission.review,
            error: review.validate().err().map(|e| e.to_string()),
        };
        let reviews = published_reviews(&db, item_id).await?;
        return Ok(html(
            StatusCode::UNPROCESSABLE_ENTITY,
            render_item_page(item_id, item, reviews, None, draft),
        ));
    }
    log!("[API] Saved review {:?} for item {}", review.id, item_id);

    let existing = SessionId::from_request(&req);
    let session = existing.unwrap_or_else(SessionId::generate);
    flash.put(session, THANKS, THANKS_MESSAGE).await;

    let mut response = HttpResponse::SeeOther();
    response.insert_header((header::LOCATION, item_path(item_id)));
    if existing.is_none() {
        response.cookie(session.cookie());
    }
    Ok(response.finish())
}

pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::page_not_found(req.path()))
}
