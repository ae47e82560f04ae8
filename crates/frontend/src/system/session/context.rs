use leptos::prelude::*;

use super::storage;

/// Сессия пользователя
///
/// Создаётся один раз при монтировании приложения и передаётся через контекст.
#[derive(Clone, Copy)]
pub struct Session {
    signed_in: RwSignal<bool>,
}

impl Session {
    /// Восстановить сессию из localStorage
    pub fn restore() -> Self {
        let signed_in = storage::load_signed_in();
        log::info!("session restored, signed_in={}", signed_in);
        Self {
            signed_in: RwSignal::new(signed_in),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.signed_in.get()
    }

    pub fn sign_in(&self) {
        storage::save_signed_in(true);
        self.signed_in.set(true);
        log::info!("signed in");
    }

    /// Выход размонтирует сканер, камера освобождается в его on_cleanup
    pub fn sign_out(&self) {
        storage::save_signed_in(false);
        self.signed_in.set(false);
        log::info!("signed out");
    }
}

/// Session context provider component
#[component]
pub fn SessionProvider(children: ChildrenFn) -> impl IntoView {
    provide_context(Session::restore());
    children()
}

/// Hook to access the session
pub fn use_session() -> Session {
    use_context::<Session>().expect("SessionProvider not found in component tree")
}
