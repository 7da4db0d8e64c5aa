use leptos::prelude::*;

use super::board::NoticeList;
use crate::menu::MenuIndex;
use crate::web::router::Link;

/// 移动端首页：快捷入口来自静态菜单
#[component]
pub fn MobileMainPage() -> impl IntoView {
    let index = expect_context::<StoredValue<MenuIndex>>();
    let tiles = index.with_value(|i| i.mobile().to_vec());

    view! {
        <div class="grid grid-cols-2 gap-3">
            {tiles
                .into_iter()
                .filter_map(|tile| {
                    let url = tile.url?;
                    let name = tile.name;
                    Some(view! {
                        <Link to=url class="card bg-base-100 shadow p-4 text-center font-semibold">
                            {name}
                        </Link>
                    })
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn CarReservationPage() -> impl IntoView {
    let date = RwSignal::new(String::new());
    let (submitted, set_submitted) = signal(false);

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">"Car reservation"</h2>
                <input type="date" class="input input-bordered"
                    on:input=move |ev| date.set(event_target_value(&ev)) prop:value=date />
                <button class="btn btn-primary"
                    disabled=move || date.get().is_empty()
                    on:click=move |_| set_submitted.set(true)>
                    "Request"
                </button>
                <Show when=move || submitted.get()>
                    <p class="text-success text-sm">{move || format!("Requested for {}", date.get())}</p>
                </Show>
            </div>
        </div>
    }
}

#[component]
pub fn MobileNoticePage() -> impl IntoView {
    view! { <NoticeList /> }
}
