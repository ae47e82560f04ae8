use leptos::prelude::*;

use crate::system::session::use_session;

/// Экран входа
///
/// Провайдер идентификации внешний; его успешный ответ передаётся в
/// `Session::sign_in`.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"로그인"</h1>
                <p>"소재 QR 조회 시스템에 오신 것을 환영합니다."</p>
                <button type="button" class="btn-primary" on:click=move |_| session.sign_in()>
                    "로그인"
                </button>
            </div>
        </div>
    }
}
