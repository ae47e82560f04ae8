use contracts::domain::a001_material::aggregate::MaterialRecord;
use contracts::domain::a001_material::code::normalize_code;
use thiserror::Error;

use super::store::MaterialStore;

/// Исход поиска материала, кроме успешного
#[derive(Debug, Error)]
pub enum MaterialLookupError {
    /// Штатный промах: документа с таким кодом нет
    #[error("material '{qr_code_id}' not found")]
    NotFound { qr_code_id: String },

    /// Хранилище недоступно или вернуло ошибку
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Получение материала по QR коду
///
/// Код обрезается по краям; дальше точное совпадение с учётом регистра.
pub async fn get_material(
    store: &dyn MaterialStore,
    raw_code: &str,
) -> Result<MaterialRecord, MaterialLookupError> {
    tracing::info!("Material lookup requested: {}", raw_code);

    let Some(qr_code_id) = normalize_code(raw_code) else {
        tracing::warn!("Blank QR code in lookup request");
        return Err(MaterialLookupError::NotFound {
            qr_code_id: raw_code.to_string(),
        });
    };

    match store.find_one(&qr_code_id).await {
        Ok(Some(record)) => {
            tracing::debug!("Material found: {:?}", record);
            Ok(record)
        }
        Ok(None) => {
            tracing::info!("No material for QR code '{}'", qr_code_id);
            Err(MaterialLookupError::NotFound { qr_code_id })
        }
        Err(e) => {
            tracing::error!("Material lookup for '{}' failed: {:#}", qr_code_id, e);
            Err(MaterialLookupError::Store(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_material::SeaOrmMaterialStore;
    use async_trait::async_trait;

    struct UnavailableStore;

    #[async_trait]
    impl MaterialStore for UnavailableStore {
        async fn find_one(&self, _qr_code_id: &str) -> anyhow::Result<Option<MaterialRecord>> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn insert(&self, _record: &MaterialRecord) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    async fn seeded_store() -> SeaOrmMaterialStore {
        let store = SeaOrmMaterialStore::in_memory().await.unwrap();
        let mut record = MaterialRecord::new("FABRIC-ABC-001", "Cotton Twill");
        record.material_type = Some("Woven".into());
        record.color = Some("Navy".into());
        store.insert(&record).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_present_code_resolves() {
        let store = seeded_store().await;
        let record = get_material(&store, "FABRIC-ABC-001").await.unwrap();
        assert_eq!(record.material_name, "Cotton Twill");
        assert_eq!(record.color.as_deref(), Some("Navy"));
    }

    #[tokio::test]
    async fn test_surrounding_whitespace_is_trimmed() {
        let store = seeded_store().await;
        assert!(get_material(&store, "  FABRIC-ABC-001 ").await.is_ok());
    }

    #[tokio::test]
    async fn test_absent_codes_are_not_found_never_store_errors() {
        let store = seeded_store().await;
        for code in ["UNKNOWN-999", "fabric-abc-001", "FABRIC-ABC", "", "   "] {
            match get_material(&store, code).await {
                Err(MaterialLookupError::NotFound { .. }) => {}
                other => panic!("expected NotFound for {code:?}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_store_error() {
        let err = get_material(&UnavailableStore, "FABRIC-ABC-001")
            .await
            .unwrap_err();
        assert!(matches!(err, MaterialLookupError::Store(_)));
        assert_eq!(err.to_string(), "connection refused");
    }
}
