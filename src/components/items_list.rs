//! Component to display the catalogue.
//! Each saved item links to its own page.
use leptos::*;
use crate::models::item::Item;

#[component]
pub fn ItemsList(items: Vec<Item>) -> impl IntoView {
    let links = items
        .into_iter()
        .filter_map(|item| {
            let path = item.path()?;
            Some(view! {
                <li class="catalogue-item">
                    <a href=path>{ item.title }</a>
                </li>
            })
        })
        .collect::<Vec<_>>();
    let empty = links.is_empty();

    view! {
        <section class="catalogue">
            { empty.then(|| view! { <p class="no-items">{ "Товаров пока нет" }</p> }) }
            <ul>{ links }</ul>
        </section>
    }
}
