use leptos::prelude::*;

use super::board::NoticeList;
use crate::auth::use_session;
use crate::web::router::Link;

#[component]
pub fn MainHomePage() -> impl IntoView {
    let session = use_session();
    let greeting = move || {
        session
            .user()
            .map(|u| format!("Welcome back, {}", u.name))
            .unwrap_or_default()
    };

    view! {
        <div class="grid gap-4 md:grid-cols-3">
            <div class="card bg-base-100 shadow md:col-span-2">
                <div class="card-body">
                    <h2 class="card-title">{greeting}</h2>
                    <div class="flex justify-between items-center">
                        <h3 class="font-semibold">"Latest notices"</h3>
                        <Link to="/main/notice" class="link link-hover text-sm">"More"</Link>
                    </div>
                    <NoticeList detail_path="/main/boardview" limit=5 />
                </div>
            </div>
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="font-semibold">"Quick links"</h3>
                    <Link to="/main/board" class="btn btn-outline btn-sm">"Board"</Link>
                    <Link to="/main/meetingroom" class="btn btn-outline btn-sm">"Meeting rooms"</Link>
                </div>
            </div>
        </div>
    }
}
