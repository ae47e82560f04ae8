use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Материал (ткань), найденный по QR коду
///
/// JSON-представление совпадает с документом в хранилище: camelCase ключи,
/// незаполненные необязательные поля не сериализуются.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRecord {
    /// Уникальный ключ поиска
    pub qr_code_id: String,

    pub material_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub care_instructions: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl MaterialRecord {
    /// Создать запись с обязательными полями
    pub fn new(qr_code_id: impl Into<String>, material_name: impl Into<String>) -> Self {
        Self {
            qr_code_id: qr_code_id.into(),
            material_name: material_name.into(),
            ..Default::default()
        }
    }

    /// Валидация обязательных полей
    pub fn validate(&self) -> Result<(), String> {
        if self.qr_code_id.trim().is_empty() {
            return Err("qrCodeId не может быть пустым".into());
        }
        // Ключ хранится уже обрезанным
        if self.qr_code_id != self.qr_code_id.trim() {
            return Err("qrCodeId не должен начинаться или заканчиваться пробелом".into());
        }
        if self.material_name.trim().is_empty() {
            return Err("materialName не может быть пустым".into());
        }
        Ok(())
    }

    /// Особенности через запятую, как их показывает карточка
    pub fn features_display(&self) -> Option<String> {
        self.features
            .as_ref()
            .filter(|f| !f.is_empty())
            .map(|f| f.join(", "))
    }
}
