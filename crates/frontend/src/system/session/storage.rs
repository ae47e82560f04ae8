use web_sys::window;

const SIGNED_IN_KEY: &str = "fabric_signed_in";
const SIGNED_IN_VALUE: &str = "true";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn is_signed_in_value(value: Option<&str>) -> bool {
    value == Some(SIGNED_IN_VALUE)
}

/// Флаг входа из localStorage
pub fn load_signed_in() -> bool {
    let value = get_local_storage().and_then(|s| s.get_item(SIGNED_IN_KEY).ok().flatten());
    is_signed_in_value(value.as_deref())
}

/// Записать флаг входа
pub fn save_signed_in(signed_in: bool) {
    if let Some(storage) = get_local_storage() {
        let result = if signed_in {
            storage.set_item(SIGNED_IN_KEY, SIGNED_IN_VALUE)
        } else {
            storage.remove_item(SIGNED_IN_KEY)
        };
        if let Err(e) = result {
            log::warn!("failed to persist session flag: {e:?}");
        }
    }
}
