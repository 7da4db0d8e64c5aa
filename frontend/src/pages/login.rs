use leptos::prelude::*;
use leptos::task::spawn_local;
use officehub_shared::protocol::JoinRequest;

use crate::api::{PortalApi, PortalBackend};
use crate::auth::{sign_in, use_session};
use crate::components::feedback::ErrorBanner;
use crate::config::AppConfig;
use crate::web::guard::{HOME_PATH, LOGIN_PATH, MOBILE_HOME_PATH};
use crate::web::router::{Link, use_router};

#[component]
fn LoginForm(
    /// 登录成功后的落地页
    home: &'static str,
    #[prop(optional)] show_join: bool,
) -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let config = expect_context::<AppConfig>();

    let (id, set_id) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let error_msg = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        error_msg.set(None);

        let config = config.clone();
        spawn_local(async move {
            let api = PortalApi::new(&config);
            match sign_in(&api, &id.get_untracked(), &password.get_untracked()).await {
                Ok(user) => {
                    session.set_user(user);
                    session.refresh_menu(&config);
                    router.redirect(home);
                }
                Err(e) => {
                    error_msg.try_set(Some(e.to_string()));
                }
            }
            set_is_submitting.try_set(false);
        });
    };

    view! {
        <form class="card-body" on:submit=on_submit>
            <ErrorBanner message=error_msg.into() />
            <div class="form-control">
                <label class="label" for="id">
                    <span class="label-text">"ID"</span>
                </label>
                <input
                    id="id"
                    type="text"
                    on:input=move |ev| set_id.set(event_target_value(&ev))
                    prop:value=id
                    class="input input-bordered"
                    required
                />
            </div>
            <div class="form-control">
                <label class="label" for="password">
                    <span class="label-text">"Password"</span>
                </label>
                <input
                    id="password"
                    type="password"
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    prop:value=password
                    class="input input-bordered"
                    required
                />
            </div>
            <div class="form-control mt-6">
                <button class="btn btn-primary" disabled=move || is_submitting.get()>
                    {move || if is_submitting.get() {
                        view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                    } else {
                        "Sign in".into_any()
                    }}
                </button>
            </div>
            <Show when=move || show_join>
                <Link to="/join" class="link link-hover text-sm text-center">"Create an account"</Link>
            </Show>
        </form>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"OfficeHub Portal"</h1>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <LoginForm home=HOME_PATH show_join=true />
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn MobileLoginPage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-base-100 flex flex-col justify-center p-4">
            <h1 class="text-2xl font-bold text-center">"OfficeHub"</h1>
            <LoginForm home=MOBILE_HOME_PATH />
        </div>
    }
}

#[component]
pub fn JoinPage() -> impl IntoView {
    let router = use_router();
    let config = expect_context::<AppConfig>();

    let id = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error_msg = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        error_msg.set(None);
        let request = JoinRequest {
            id: id.get_untracked().trim().to_string(),
            name: name.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if request.id.is_empty() || request.name.is_empty() || request.password.is_empty() {
            error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        let config = config.clone();
        spawn_local(async move {
            match PortalApi::new(&config).join(request).await {
                Ok(()) => router.redirect(LOGIN_PATH),
                Err(e) => {
                    error_msg.try_set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Join OfficeHub"</h1>
                <form class="card-body card w-full shadow-2xl bg-base-100" on:submit=on_submit>
                    <ErrorBanner message=error_msg.into() />
                    <input type="text" placeholder="ID" class="input input-bordered"
                        on:input=move |ev| id.set(event_target_value(&ev)) prop:value=id />
                    <input type="text" placeholder="Name" class="input input-bordered"
                        on:input=move |ev| name.set(event_target_value(&ev)) prop:value=name />
                    <input type="password" placeholder="Password" class="input input-bordered"
                        on:input=move |ev| password.set(event_target_value(&ev)) prop:value=password />
                    <button class="btn btn-primary mt-4">"Create account"</button>
                    <Link to=LOGIN_PATH class="link link-hover text-sm text-center">"Back to sign in"</Link>
                </form>
            </div>
        </div>
    }
}
