use retailmap_core::db::open_db_in_memory;
use retailmap_core::{
    Province, ProvinceRepository, ProvinceService, RegionDraft, RegionRepository, RepoError,
    SqliteLocationRepository, SqliteProvinceRepository, SqliteRegionRepository,
    SqliteSupermarketRepository, SupermarketDraft, SupermarketRepository,
};
use retailmap_core::{LocationDraft, LocationRepository};
use rusqlite::Connection;

#[test]
fn created_province_embeds_the_written_region() {
    let conn = open_db_in_memory().unwrap();
    let regions = SqliteRegionRepository::try_new(&conn).unwrap();
    let service = province_service(&conn);

    let region_id = regions.insert(&RegionDraft::new("AND", "Andalucía")).unwrap();
    let created = service.create_province("GR", "Granada", region_id).unwrap();

    assert_eq!(created.code, "GR");
    assert_eq!(created.region.id, region_id);
    assert_eq!(created.region.code, "AND");
    assert_eq!(created.region.name, "Andalucía");

    let fetched = service.get_province(created.id).unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn duplicate_code_with_different_case_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let regions = SqliteRegionRepository::try_new(&conn).unwrap();
    let service = province_service(&conn);

    let region_id = regions.insert(&RegionDraft::new("AND", "Andalucía")).unwrap();
    service.create_province("GR", "Granada", region_id).unwrap();

    let err = service
        .create_province("gr", "Granada bis", region_id)
        .unwrap_err();
    assert!(matches!(err, RepoError::CodeConflict { .. }));
}

#[test]
fn create_with_missing_region_is_rejected_before_writing() {
    let conn = open_db_in_memory().unwrap();
    let service = province_service(&conn);

    let err = service.create_province("GR", "Granada", 77).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { id: 77, .. }));
    assert!(service.list_provinces().unwrap().is_empty());
}

#[test]
fn update_can_move_province_to_another_region() {
    let conn = open_db_in_memory().unwrap();
    let regions = SqliteRegionRepository::try_new(&conn).unwrap();
    let service = province_service(&conn);

    let and_id = regions.insert(&RegionDraft::new("AND", "Andalucía")).unwrap();
    let cat_id = regions.insert(&RegionDraft::new("CAT", "Cataluña")).unwrap();

    let created = service.create_province("GR", "Granada", and_id).unwrap();
    let updated = service
        .update_province(created.id, "GR", "Granada", cat_id)
        .unwrap();

    assert_eq!(updated.region.id, cat_id);
    assert_eq!(updated.region.code, "CAT");
}

#[test]
fn update_keeping_own_code_is_not_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let regions = SqliteRegionRepository::try_new(&conn).unwrap();
    let service = province_service(&conn);

    let region_id = regions.insert(&RegionDraft::new("AND", "Andalucía")).unwrap();
    let created = service.create_province("GR", "Granada", region_id).unwrap();

    let updated = service
        .update_province(created.id, "gr", "Granada capital", region_id)
        .unwrap();
    assert_eq!(updated.code, "GR");
    assert_eq!(updated.name, "Granada capital");
}

#[test]
fn list_provinces_twice_without_writes_is_identical() {
    let conn = open_db_in_memory().unwrap();
    let regions = SqliteRegionRepository::try_new(&conn).unwrap();
    let service = province_service(&conn);

    let region_id = regions.insert(&RegionDraft::new("AND", "Andalucía")).unwrap();
    service.create_province("GR", "Granada", region_id).unwrap();
    service.create_province("SE", "Sevilla", region_id).unwrap();

    let first = service.list_provinces().unwrap();
    let second = service.list_provinces().unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    assert!(first.iter().all(|province| province.region.code == "AND"));
}

#[test]
fn delete_province_referenced_by_location_fails() {
    let conn = open_db_in_memory().unwrap();
    let regions = SqliteRegionRepository::try_new(&conn).unwrap();
    let supermarkets = SqliteSupermarketRepository::try_new(&conn).unwrap();
    let locations = SqliteLocationRepository::try_new(&conn).unwrap();
    let service = province_service(&conn);

    let region_id = regions.insert(&RegionDraft::new("AND", "Andalucía")).unwrap();
    let province = service.create_province("GR", "Granada", region_id).unwrap();
    let supermarket_id = supermarkets
        .insert(&SupermarketDraft::new("Mercadona"))
        .unwrap();
    locations
        .insert(&LocationDraft::new(
            "Calle Recogidas 2",
            "Granada",
            supermarket_id,
            province.id,
        ))
        .unwrap();

    let err = service.delete_province(province.id).unwrap_err();
    assert!(matches!(err, RepoError::ReferentialConflict { .. }));
    assert!(service.get_province(province.id).unwrap().is_some());
}

#[test]
fn delete_unreferenced_province_succeeds() {
    let conn = open_db_in_memory().unwrap();
    let regions = SqliteRegionRepository::try_new(&conn).unwrap();
    let service = province_service(&conn);

    let region_id = regions.insert(&RegionDraft::new("AND", "Andalucía")).unwrap();
    let province = service.create_province("GR", "Granada", region_id).unwrap();

    service.delete_province(province.id).unwrap();
    assert!(service.get_province(province.id).unwrap().is_none());
}

#[test]
fn province_serializes_with_its_embedded_region() {
    let conn = open_db_in_memory().unwrap();
    let regions = SqliteRegionRepository::try_new(&conn).unwrap();
    let service = province_service(&conn);

    let region_id = regions.insert(&RegionDraft::new("AND", "Andalucía")).unwrap();
    let created = service.create_province("GR", "Granada", region_id).unwrap();

    let json = serde_json::to_string(&created).unwrap();
    let parsed: Province = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, created);
}

fn province_service(
    conn: &Connection,
) -> ProvinceService<
    SqliteProvinceRepository<'_>,
    SqliteRegionRepository<'_>,
    SqliteLocationRepository<'_>,
> {
    ProvinceService::new(
        SqliteProvinceRepository::try_new(conn).unwrap(),
        SqliteRegionRepository::try_new(conn).unwrap(),
        SqliteLocationRepository::try_new(conn).unwrap(),
    )
}
