use async_trait::async_trait;
use contracts::domain::a001_material::aggregate::MaterialRecord;

/// Хранилище материалов (документная коллекция с уникальным qrCodeId)
#[async_trait]
pub trait MaterialStore: Send + Sync {
    /// Точный поиск по ключу; `None`, если документа нет
    async fn find_one(&self, qr_code_id: &str) -> anyhow::Result<Option<MaterialRecord>>;

    /// Вставка нового документа; повторный qrCodeId отклоняется хранилищем
    async fn insert(&self, record: &MaterialRecord) -> anyhow::Result<()>;
}
