/// Нормализация QR кода перед поиском
///
/// Обрезает пробелы по краям; регистр не меняется. Пустой результат
/// означает, что искать нечего.
pub fn normalize_code(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_code() {
        assert_eq!(
            normalize_code("  FABRIC-ABC-001\n").as_deref(),
            Some("FABRIC-ABC-001")
        );
        assert_eq!(normalize_code("fabric-abc-001").as_deref(), Some("fabric-abc-001"));
        assert_eq!(normalize_code(""), None);
        assert_eq!(normalize_code(" \t "), None);
    }
}
