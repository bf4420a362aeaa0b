use leptos::*;

#[component]
pub fn FlashNotice(message: Option<String>) -> impl IntoView {
    message.map(|message| {
        view! { <div class="flash" role="status">{ message }</div> }
    })
}
