use leptos::prelude::*;
use leptos::task::spawn_local;
use officehub_shared::Notice;
use officehub_shared::protocol::CreateNoticeRequest;

use crate::api::PortalBackend;
use crate::auth::use_session;
use crate::components::feedback::{ErrorBanner, Loading};
use crate::config::AppConfig;
use crate::web::router::{Link, use_router};

/// 加载公告列表；失败时以错误消息代替列表
pub(super) fn notices_resource() -> LocalResource<Result<Vec<Notice>, String>> {
    let session = use_session();
    let config = expect_context::<AppConfig>();
    LocalResource::new(move || {
        let api = session.api(&config);
        async move {
            api.notices().await.map_err(|e| {
                tracing::warn!("[Board] Failed to load notices: {}", e);
                e.to_string()
            })
        }
    })
}

/// 公告列表
#[component]
pub(super) fn NoticeList(
    /// 详情页路径前缀，为空时不生成链接
    #[prop(optional)]
    detail_path: Option<&'static str>,
    #[prop(optional)] limit: Option<usize>,
) -> impl IntoView {
    let notices = notices_resource();

    view! {
        <Suspense fallback=|| view! { <Loading /> }>
            {move || notices.get().map(|result| match result {
                Err(message) => view! { <div class="alert alert-warning">{message}</div> }.into_any(),
                Ok(list) if list.is_empty() => view! {
                    <p class="text-center py-8 text-base-content/50">"No notices yet."</p>
                }.into_any(),
                Ok(list) => view! {
                    <ul class="divide-y divide-base-300">
                        {list.into_iter().take(limit.unwrap_or(usize::MAX)).map(|notice| {
                            let title = notice.title.clone();
                            let entry = match detail_path {
                                Some(base) => view! {
                                    <Link to=format!("{}?id={}", base, notice.id)>{title}</Link>
                                }.into_any(),
                                None => view! { <span>{title}</span> }.into_any(),
                            };
                            view! {
                                <li class="flex justify-between py-2">
                                    {entry}
                                    <span class="text-sm opacity-60">
                                        {notice.author} " · " {notice.created_at.format("%Y-%m-%d").to_string()}
                                    </span>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                }.into_any(),
            })}
        </Suspense>
    }
}

#[component]
pub fn BoardPage() -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <div class="flex justify-between items-center">
                    <h2 class="card-title">"Board"</h2>
                    <Link to="/main/boardwrite" class="btn btn-primary btn-sm">"Write"</Link>
                </div>
                <NoticeList detail_path="/main/boardview" />
            </div>
        </div>
    }
}

#[component]
pub fn BoardViewPage() -> impl IntoView {
    let router = use_router();
    let notices = notices_resource();
    let wanted = move || router.query_param("id").and_then(|id| id.parse::<u64>().ok());

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <Suspense fallback=|| view! { <Loading /> }>
                    {move || notices.get().map(|result| {
                        let found = result
                            .ok()
                            .and_then(|list| list.into_iter().find(|n| Some(n.id) == wanted()));
                        match found {
                            Some(notice) => view! {
                                <h2 class="card-title">{notice.title}</h2>
                                <p class="text-sm opacity-60">
                                    {notice.author} " · " {notice.created_at.format("%Y-%m-%d").to_string()}
                                </p>
                                <p class="whitespace-pre-wrap">{notice.body}</p>
                            }.into_any(),
                            None => view! { <p>"The post could not be found."</p> }.into_any(),
                        }
                    })}
                </Suspense>
                <Link to="/main/board" class="btn btn-ghost btn-sm">"Back to list"</Link>
            </div>
        </div>
    }
}

#[component]
pub fn BoardWritePage() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let config = expect_context::<AppConfig>();

    let title = RwSignal::new(String::new());
    let body = RwSignal::new(String::new());
    let error_msg = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = CreateNoticeRequest {
            title: title.get_untracked().trim().to_string(),
            body: body.get_untracked(),
        };
        if request.title.is_empty() {
            error_msg.set(Some("Title is required".to_string()));
            return;
        }

        let api = session.api(&config);
        spawn_local(async move {
            match api.create_notice(request).await {
                Ok(notice) => router.navigate(&format!("/main/boardview?id={}", notice.id)),
                Err(e) => {
                    error_msg.try_set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <form class="card bg-base-100 shadow card-body" on:submit=on_submit>
            <h2 class="card-title">"New post"</h2>
            <ErrorBanner message=error_msg.into() />
            <input type="text" placeholder="Title" class="input input-bordered"
                on:input=move |ev| title.set(event_target_value(&ev)) prop:value=title />
            <textarea class="textarea textarea-bordered min-h-48"
                on:input=move |ev| body.set(event_target_value(&ev)) prop:value=body></textarea>
            <div class="flex gap-2 justify-end">
                <Link to="/main/board" class="btn btn-ghost">"Cancel"</Link>
                <button class="btn btn-primary">"Publish"</button>
            </div>
        </form>
    }
}

#[component]
pub fn NoticePage() -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">"Notices"</h2>
                <NoticeList detail_path="/main/boardview" />
            </div>
        </div>
    }
}
