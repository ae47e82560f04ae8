use crate::routes::routes::AppRoutes;
use crate::system::session::SessionProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <SessionProvider>
            <AppRoutes />
        </SessionProvider>
    }
}
