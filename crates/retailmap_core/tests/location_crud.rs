use retailmap_core::db::open_db_in_memory;
use retailmap_core::{
    LocationDraft, LocationRepository, LocationService, ProvinceDraft, ProvinceRepository,
    RegionDraft, RegionRepository, RepoError, SqliteLocationRepository, SqliteProvinceRepository,
    SqliteRegionRepository, SqliteSupermarketRepository, SupermarketDraft, SupermarketRepository,
    ValidationError,
};
use rusqlite::Connection;

struct Fixture {
    region_id: i64,
    province_id: i64,
    supermarket_id: i64,
}

/// Seeds region "AND", province "GR" and supermarket "Mercadona".
fn seed_hierarchy(conn: &Connection) -> Fixture {
    let regions = SqliteRegionRepository::try_new(conn).unwrap();
    let provinces = SqliteProvinceRepository::try_new(conn).unwrap();
    let supermarkets = SqliteSupermarketRepository::try_new(conn).unwrap();

    let region_id = regions.insert(&RegionDraft::new("AND", "Andalucía")).unwrap();
    let province_id = provinces
        .insert(&ProvinceDraft::new("GR", "Granada", region_id))
        .unwrap();
    let supermarket_id = supermarkets
        .insert(&SupermarketDraft::new("Mercadona"))
        .unwrap();

    Fixture {
        region_id,
        province_id,
        supermarket_id,
    }
}

#[test]
fn detail_fetch_resolves_the_full_parent_chain() {
    let conn = open_db_in_memory().unwrap();
    let fixture = seed_hierarchy(&conn);
    let service = location_service(&conn);

    let created = service
        .create_location(
            "Calle X",
            "Granada",
            fixture.supermarket_id,
            fixture.province_id,
        )
        .unwrap();

    let fetched = service.get_location(created.id).unwrap().unwrap();
    assert_eq!(fetched.address, "Calle X");
    assert_eq!(fetched.city, "Granada");
    assert_eq!(fetched.supermarket.name, "Mercadona");
    assert_eq!(fetched.province.code, "GR");
    assert_eq!(fetched.province.region.id, fixture.region_id);
    assert_eq!(fetched.province.region.code, "AND");
}

#[test]
fn listing_keeps_the_region_as_a_bare_identifier() {
    let conn = open_db_in_memory().unwrap();
    let fixture = seed_hierarchy(&conn);
    let service = location_service(&conn);

    service
        .create_location(
            "Calle X",
            "Granada",
            fixture.supermarket_id,
            fixture.province_id,
        )
        .unwrap();

    let listed = service.list_locations().unwrap();
    assert_eq!(listed.len(), 1);

    let summary = &listed[0];
    assert_eq!(summary.supermarket.id, fixture.supermarket_id);
    assert_eq!(summary.supermarket.name, "Mercadona");
    assert_eq!(summary.province.id, fixture.province_id);
    assert_eq!(summary.province.code, "GR");
    assert_eq!(summary.province.region_id, fixture.region_id);
}

#[test]
fn create_with_missing_parents_is_rejected_before_writing() {
    let conn = open_db_in_memory().unwrap();
    let fixture = seed_hierarchy(&conn);
    let service = location_service(&conn);

    let err = service
        .create_location("Calle X", "Granada", 404, fixture.province_id)
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { id: 404, .. }));

    let err = service
        .create_location("Calle X", "Granada", fixture.supermarket_id, 405)
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { id: 405, .. }));

    assert!(service.list_locations().unwrap().is_empty());
}

#[test]
fn insert_with_dangling_parent_hits_the_store_backstop() {
    let conn = open_db_in_memory().unwrap();
    seed_hierarchy(&conn);
    let locations = SqliteLocationRepository::try_new(&conn).unwrap();

    // Bypasses the service pre-check on purpose: the foreign keys must still
    // reject the dangling references.
    let err = locations
        .insert(&LocationDraft::new("Calle X", "Granada", 404, 405))
        .unwrap_err();
    assert!(matches!(err, RepoError::ReferentialConflict { .. }));
}

#[test]
fn blank_address_or_city_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let fixture = seed_hierarchy(&conn);
    let service = location_service(&conn);

    let err = service
        .create_location("  ", "Granada", fixture.supermarket_id, fixture.province_id)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyAddress)
    ));

    let err = service
        .create_location("Calle X", "", fixture.supermarket_id, fixture.province_id)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyCity)
    ));
}

#[test]
fn update_moves_location_between_parents() {
    let conn = open_db_in_memory().unwrap();
    let fixture = seed_hierarchy(&conn);
    let provinces = SqliteProvinceRepository::try_new(&conn).unwrap();
    let supermarkets = SqliteSupermarketRepository::try_new(&conn).unwrap();
    let service = location_service(&conn);

    let other_province_id = provinces
        .insert(&ProvinceDraft::new("SE", "Sevilla", fixture.region_id))
        .unwrap();
    let other_supermarket_id = supermarkets.insert(&SupermarketDraft::new("Dia")).unwrap();

    let created = service
        .create_location(
            "Calle X",
            "Granada",
            fixture.supermarket_id,
            fixture.province_id,
        )
        .unwrap();

    let updated = service
        .update_location(
            created.id,
            "Avenida Y",
            "Sevilla",
            other_supermarket_id,
            other_province_id,
        )
        .unwrap();

    assert_eq!(updated.address, "Avenida Y");
    assert_eq!(updated.supermarket.name, "Dia");
    assert_eq!(updated.province.code, "SE");
    assert_eq!(updated.province.region.code, "AND");
}

#[test]
fn delete_location_is_unblocked_and_missing_id_is_reported() {
    let conn = open_db_in_memory().unwrap();
    let fixture = seed_hierarchy(&conn);
    let service = location_service(&conn);

    let created = service
        .create_location(
            "Calle X",
            "Granada",
            fixture.supermarket_id,
            fixture.province_id,
        )
        .unwrap();

    service.delete_location(created.id).unwrap();
    assert!(service.get_location(created.id).unwrap().is_none());

    let err = service.delete_location(created.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

fn location_service(
    conn: &Connection,
) -> LocationService<
    SqliteLocationRepository<'_>,
    SqliteSupermarketRepository<'_>,
    SqliteProvinceRepository<'_>,
> {
    LocationService::new(
        SqliteLocationRepository::try_new(conn).unwrap(),
        SqliteSupermarketRepository::try_new(conn).unwrap(),
        SqliteProvinceRepository::try_new(conn).unwrap(),
    )
}
