use leptos::prelude::*;

/// 加载占位
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[40vh]">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

/// 页面加载失败时的内联提示，只占据该路由的位置
#[component]
pub fn PageLoadFailed(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div role="alert" class="alert alert-error m-4">
            <span>"页面加载失败"</span>
            <span class="text-sm opacity-70">{message}</span>
        </div>
    }
}

/// 表单错误提示
#[component]
pub fn ErrorBanner(message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div role="alert" class="alert alert-error text-sm py-2">
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}
