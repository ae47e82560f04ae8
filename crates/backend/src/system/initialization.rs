use anyhow::Result;
use contracts::domain::a001_material::aggregate::MaterialRecord;

use crate::domain::a001_material::MaterialStore;

/// Демонстрационные материалы
fn demo_materials() -> Vec<MaterialRecord> {
    vec![
        MaterialRecord {
            material_type: Some("Woven".into()),
            color: Some("Navy".into()),
            ..MaterialRecord::new("FABRIC-ABC-001", "Cotton Twill")
        },
        MaterialRecord {
            material_type: Some("Knit".into()),
            color: Some("Heather Grey".into()),
            manufacturer: Some("Daehan Textile".into()),
            production_date: Some("2024-02-20".into()),
            features: Some(vec![
                "4-way stretch".into(),
                "moisture wicking".into(),
            ]),
            care_instructions: Some("Machine wash cold, do not tumble dry".into()),
            ..MaterialRecord::new("FABRIC-KNT-014", "Modal Jersey")
        },
        MaterialRecord {
            material_type: Some("Woven".into()),
            color: Some("Oatmeal".into()),
            manufacturer: Some("Hanil Linen".into()),
            production_date: Some("2023-11-05".into()),
            features: Some(vec!["breathable".into(), "pre-shrunk".into()]),
            care_instructions: Some("Cold wash, line dry".into()),
            ..MaterialRecord::new("FABRIC-LIN-042", "Washed Linen")
        },
    ]
}

/// Заполнить хранилище демонстрационными материалами
///
/// Уже существующие qrCodeId пропускаются. Возвращает число вставленных записей.
pub async fn seed_demo_materials(store: &dyn MaterialStore) -> Result<usize> {
    let mut inserted = 0;
    for record in demo_materials() {
        if store.find_one(&record.qr_code_id).await?.is_some() {
            tracing::debug!("Demo material {} already present", record.qr_code_id);
            continue;
        }
        store.insert(&record).await?;
        inserted += 1;
    }

    tracing::info!("Demo materials seeded: {} inserted", inserted);
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_material::SeaOrmMaterialStore;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = SeaOrmMaterialStore::in_memory().await.unwrap();

        assert_eq!(seed_demo_materials(&store).await.unwrap(), 3);
        assert_eq!(seed_demo_materials(&store).await.unwrap(), 0);

        let cotton = store.find_one("FABRIC-ABC-001").await.unwrap().unwrap();
        assert_eq!(cotton.material_name, "Cotton Twill");
        assert_eq!(cotton.features, None);
    }

    #[test]
    fn test_demo_materials_are_valid_and_unique() {
        let materials = demo_materials();
        let mut ids: Vec<_> = materials.iter().map(|m| m.qr_code_id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), materials.len());
        assert!(materials.iter().all(|m| m.validate().is_ok()));
    }
}
