//! Server-rendered pages of the storefront.
//! Every page is rendered to a string with leptos, which escapes all text and attribute values.
use leptos::ssr::render_to_string;
use leptos::*;

use crate::components::{
    flash_notice::FlashNotice,
    items_list::ItemsList,
    review_form::{ReviewDraft, ReviewForm},
    reviews_list::ReviewsList,
};
use crate::models::item::{Item, ItemId};
use crate::models::review::Review;

pub const STYLESHEET: &str = "/assets/main.css";

#[component]
pub fn ItemPage(
    item_id: ItemId,
    item: Item,
    reviews: Vec<Review>,
    notice: Option<String>,
    draft: ReviewDraft,
) -> impl IntoView {
    view! {
        <main class="item-page">
            <nav><a href="/">{ "← Все товары" }</a></nav>
            <h1>{ item.title }</h1>
            <FlashNotice message=notice />
            <ReviewsList reviews=reviews />
            <ReviewForm item_id=item_id draft=draft />
        </main>
    }
}

#[component]
pub fn IndexPage(items: Vec<Item>) -> impl IntoView {
    view! {
        <main class="index-page">
            <h1>{ "Каталог" }</h1>
            <ItemsList items=items />
        </main>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <main class="not-found">
            <h1>{ "Страница не найдена" }</h1>
            <p>{ "Такого товара нет. " }<a href="/">{ "Вернуться в каталог" }</a></p>
        </main>
    }
}

/// Wraps a rendered body into a complete HTML document.
pub fn render_document<F, N>(title: String, body: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView,
{
    let head = render_to_string(move || view! { <title>{ title }</title> }).to_string();
    let body = render_to_string(body).to_string();
    format!(
        "<!DOCTYPE html><html lang=\"ru\"><head><meta charset=\"utf-8\"/>\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>\
         {head}<link rel=\"stylesheet\" href=\"{STYLESHEET}\"/></head><body>{body}</body></html>"
    )
}

/// `reviews` are rendered as given; pass only the ones that may be shown.
pub fn render_item_page(
    item_id: ItemId,
    item: Item,
    reviews: Vec<Review>,
    notice: Option<String>,
    draft: ReviewDraft,
) -> String {
    let title = item.title.clone();
    render_document(title, move || {
        view! {
            <ItemPage item_id=item_id item=item reviews=reviews notice=notice draft=draft />
        }
    })
}

pub fn render_index(items: Vec<Item>) -> String {
    render_document("Каталог".to_string(), move || view! { <IndexPage items=items /> })
}

pub fn render_not_found() -> String {
    render_document("Страница не найдена".to_string(), || view! { <NotFoundPage /> })
}
