use crate::domain::a001_material::ui::scanner::MaterialScanner;
use crate::system::pages::login::LoginPage;
use crate::system::session::use_session;
use leptos::prelude::*;

#[component]
fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <h1>"메인 페이지"</h1>
            <p>"소재 QR 조회 시스템에 오신 것을 환영합니다."</p>
            <MaterialScanner />
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.is_signed_in()
            fallback=|| view! { <LoginPage /> }
        >
            <HomePage />
        </Show>
    }
}
