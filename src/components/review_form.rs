use leptos::*;
use crate::models::item::{review_action_path, ItemId};

/// Values shown in the review form. Empty for a fresh page, filled with the
/// rejected submission when validation failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewDraft {
    pub author: String,
    pub review: String,
    pub error: Option<String>,
}

#[component]
pub fn ReviewForm(item_id: ItemId, draft: ReviewDraft) -> impl IntoView {
    let ReviewDraft { author, review, error } = draft;

    view! {
        <form class="review-form" action=review_action_path(item_id) method="POST">
            <h3>{ "Оставить отзыв" }</h3>
            { error.map(|message| view! { <p class="form-error">{ message }</p> }) }
            <label>
                { "Ваше имя" }
                <input type="text" name="author" value=author />
            </label>
            <label>
                { "Отзыв" }
                <textarea name="review" rows="5">{ review }</textarea>
            </label>
            <button type="submit">{ "Отправить" }</button>
        </form>
    }
}
