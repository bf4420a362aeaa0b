use leptos::*;
use crate::models::review::Review;

/// Renders the given reviews as they are. Choosing which reviews are
/// visible is up to the caller.
#[component]
pub fn ReviewsList(reviews: Vec<Review>) -> impl IntoView {
    let empty = reviews.is_empty();

    view! {
        <section class="reviews">
            <h3>{ "Отзывы" }</h3>
            { empty.then(|| view! { <p class="no-reviews">{ "Отзывов пока нет" }</p> }) }
            <ul>
                {
                    reviews.into_iter().map(|review| {
                        view! {
                            <li class="item-review">
                                <div class="author">{ review.author }</div>
                                <div class="review">{ review.review }</div>
                            </li>
                        }
                    }).collect::<Vec<_>>()
                }
            </ul>
        </section>
    }
}
