/// Размер ответа в человекочитаемом виде для логов
///
/// # Примеры
/// ```text
/// format_size(532)  -> "532 B"
/// format_size(2048) -> "2.0 KB"
/// ```
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let value = bytes as f64;
    if value >= MB {
        format!("{:.1} MB", value / MB)
    } else if value >= KB {
        format!("{:.1} KB", value / KB)
    } else {
        format!("{} B", bytes)
    }
}
