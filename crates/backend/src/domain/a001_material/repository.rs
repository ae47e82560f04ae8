use async_trait::async_trait;
use chrono::Utc;
use contracts::domain::a001_material::aggregate::MaterialRecord;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};

use super::store::MaterialStore;
use crate::shared::data::db;

pub use entity::{ActiveModel, Column, Entity, Model};

mod entity {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "a001_material")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        #[sea_orm(unique)]
        pub qr_code_id: String,
        pub material_name: String,
        pub material_type: Option<String>,
        pub color: Option<String>,
        pub manufacturer: Option<String>,
        pub production_date: Option<String>,
        /// JSON массив строк
        pub features: Option<String>,
        pub care_instructions: Option<String>,
        pub image_url: Option<String>,
        pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl TryFrom<Model> for MaterialRecord {
    type Error = anyhow::Error;

    /// Битый JSON в `features` считается ошибкой хранилища
    fn try_from(m: Model) -> anyhow::Result<Self> {
        let features = m
            .features
            .as_deref()
            .map(serde_json::from_str::<Vec<String>>)
            .transpose()
            .map_err(|e| {
                anyhow::anyhow!(
                    "Corrupted features column for material '{}': {}",
                    m.qr_code_id,
                    e
                )
            })?;

        Ok(MaterialRecord {
            qr_code_id: m.qr_code_id,
            material_name: m.material_name,
            material_type: m.material_type,
            color: m.color,
            manufacturer: m.manufacturer,
            production_date: m.production_date,
            features,
            care_instructions: m.care_instructions,
            image_url: m.image_url,
        })
    }
}

/// Хранилище материалов поверх sea-orm (SQLite)
#[derive(Clone)]
pub struct SeaOrmMaterialStore {
    conn: DatabaseConnection,
}

impl SeaOrmMaterialStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Пустое in-memory хранилище со схемой
    pub async fn in_memory() -> anyhow::Result<Self> {
        Ok(Self::new(db::initialize_in_memory().await?))
    }
}

#[async_trait]
impl MaterialStore for SeaOrmMaterialStore {
    async fn find_one(&self, qr_code_id: &str) -> anyhow::Result<Option<MaterialRecord>> {
        let result = Entity::find()
            .filter(Column::QrCodeId.eq(qr_code_id))
            .one(&self.conn)
            .await?;
        result.map(MaterialRecord::try_from).transpose()
    }

    async fn insert(&self, record: &MaterialRecord) -> anyhow::Result<()> {
        record
            .validate()
            .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

        let features = record
            .features
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let active = ActiveModel {
            id: NotSet,
            qr_code_id: Set(record.qr_code_id.clone()),
            material_name: Set(record.material_name.clone()),
            material_type: Set(record.material_type.clone()),
            color: Set(record.color.clone()),
            manufacturer: Set(record.manufacturer.clone()),
            production_date: Set(record.production_date.clone()),
            features: Set(features),
            care_instructions: Set(record.care_instructions.clone()),
            image_url: Set(record.image_url.clone()),
            created_at: Set(Some(Utc::now())),
        };

        Entity::insert(active)
            .exec(&self.conn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => anyhow::anyhow!(
                    "Material with qrCodeId '{}' already exists",
                    record.qr_code_id
                ),
                _ => e.into(),
            })?;
        Ok(())
    }
}
