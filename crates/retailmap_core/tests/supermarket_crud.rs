use retailmap_core::db::open_db_in_memory;
use retailmap_core::{
    LocationDraft, LocationRepository, ProvinceDraft, ProvinceRepository, RegionDraft,
    RegionRepository, RepoError, SqliteLocationRepository, SqliteProvinceRepository,
    SqliteRegionRepository, SqliteSupermarketRepository, SupermarketService, ValidationError,
};
use rusqlite::Connection;

#[test]
fn mercadona_roundtrip_by_assigned_identifier() {
    let conn = open_db_in_memory().unwrap();
    let service = supermarket_service(&conn);

    let created = service.create_supermarket("Mercadona").unwrap();
    let fetched = service.get_supermarket(created.id).unwrap().unwrap();

    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, "Mercadona");
}

#[test]
fn blank_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = supermarket_service(&conn);

    let err = service.create_supermarket("   ").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyName)
    ));
}

#[test]
fn update_overwrites_name_and_missing_id_is_reported() {
    let conn = open_db_in_memory().unwrap();
    let service = supermarket_service(&conn);

    let created = service.create_supermarket("Dia").unwrap();
    let updated = service.update_supermarket(created.id, "Dia Market").unwrap();
    assert_eq!(updated.name, "Dia Market");

    let err = service.update_supermarket(404, "Lidl").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { id: 404, .. }));
}

#[test]
fn list_supermarkets_is_ordered_and_stable() {
    let conn = open_db_in_memory().unwrap();
    let service = supermarket_service(&conn);

    service.create_supermarket("Mercadona").unwrap();
    service.create_supermarket("Dia").unwrap();

    let first = service.list_supermarkets().unwrap();
    let second = service.list_supermarkets().unwrap();
    assert_eq!(first, second);
    let names: Vec<_> = first.iter().map(|market| market.name.as_str()).collect();
    assert_eq!(names, ["Mercadona", "Dia"]);
}

#[test]
fn delete_supermarket_referenced_by_location_fails_and_keeps_row() {
    let conn = open_db_in_memory().unwrap();
    let service = supermarket_service(&conn);
    let regions = SqliteRegionRepository::try_new(&conn).unwrap();
    let provinces = SqliteProvinceRepository::try_new(&conn).unwrap();
    let locations = SqliteLocationRepository::try_new(&conn).unwrap();

    let supermarket = service.create_supermarket("Mercadona").unwrap();
    let region_id = regions.insert(&RegionDraft::new("AND", "Andalucía")).unwrap();
    let province_id = provinces
        .insert(&ProvinceDraft::new("GR", "Granada", region_id))
        .unwrap();
    locations
        .insert(&LocationDraft::new(
            "Calle X",
            "Granada",
            supermarket.id,
            province_id,
        ))
        .unwrap();

    let err = service.delete_supermarket(supermarket.id).unwrap_err();
    assert!(matches!(err, RepoError::ReferentialConflict { .. }));

    let still_there = service.get_supermarket(supermarket.id).unwrap().unwrap();
    assert_eq!(still_there, supermarket);
}

#[test]
fn delete_unreferenced_supermarket_succeeds() {
    let conn = open_db_in_memory().unwrap();
    let service = supermarket_service(&conn);

    let supermarket = service.create_supermarket("Lidl").unwrap();
    service.delete_supermarket(supermarket.id).unwrap();

    assert!(service.get_supermarket(supermarket.id).unwrap().is_none());
}

fn supermarket_service(
    conn: &Connection,
) -> SupermarketService<SqliteSupermarketRepository<'_>, SqliteLocationRepository<'_>> {
    SupermarketService::new(
        SqliteSupermarketRepository::try_new(conn).unwrap(),
        SqliteLocationRepository::try_new(conn).unwrap(),
    )
}
