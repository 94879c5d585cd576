use super::*;
use foodshare_model::{
    FoodId, FoodType, ListingFilter, MealType, NewListing, NewProvider, ProviderFilter,
    ProviderId, QuantityUpdate, ReceiverFilter,
};
use foodshare_store::Store;
use rusqlite::types::Value;
use tempfile::TempDir;

fn fixture_store() -> (TempDir, Store) {
    let dir = TempDir::new().expect("tempdir");
    let store = Store::open(dir.path().join("foodshare.db"));
    store
        .execute_batch(
            "
            CREATE TABLE Providers (
              Provider_ID INTEGER PRIMARY KEY,
              Name TEXT NOT NULL,
              Type TEXT NOT NULL,
              Address TEXT NOT NULL,
              City TEXT NOT NULL,
              Contact TEXT NOT NULL
            );
            CREATE TABLE Receivers (
              Receiver_ID INTEGER PRIMARY KEY,
              Name TEXT NOT NULL,
              Type TEXT NOT NULL,
              City TEXT NOT NULL,
              Contact TEXT NOT NULL
            );
            CREATE TABLE Food_Listings (
              Food_ID INTEGER PRIMARY KEY,
              Food_Name TEXT NOT NULL,
              Quantity INTEGER NOT NULL,
              Expiry_Date TEXT NOT NULL,
              Provider_ID INTEGER NOT NULL,
              Provider_Type TEXT NOT NULL,
              Location TEXT NOT NULL,
              Food_Type TEXT NOT NULL,
              Meal_Type TEXT NOT NULL
            );
            CREATE TABLE Claims (
              Claim_ID INTEGER PRIMARY KEY,
              Food_ID INTEGER NOT NULL,
              Receiver_ID INTEGER NOT NULL,
              Status TEXT NOT NULL
            );

            INSERT INTO Providers VALUES
              (1, 'Fresh Kitchen', 'Restaurant', '12 Main St', 'Chennai', '555-0101'),
              (2, 'Green Grocer', 'Grocery Store', '8 Market Rd', 'Chennai', '555-0102'),
              (3, 'Daily Mart', 'Supermarket', '3 Lake View', 'Delhi', '555-0103');

            INSERT INTO Receivers VALUES
              (1, 'Hope Shelter', 'Shelter', 'Chennai', '555-0201'),
              (2, 'Care NGO', 'NGO', 'Delhi', '555-0202');

            INSERT INTO Food_Listings VALUES
              (1, 'Rice', 10, '2026-09-10', 1, 'Restaurant', 'Chennai', 'Vegetarian', 'Lunch'),
              (2, 'Bread', 6, '2026-09-05', 2, 'Grocery Store', 'Chennai', 'Vegan', 'Breakfast'),
              (3, 'Chicken Curry', 4, '2026-09-07', 1, 'Restaurant', 'Chennai', 'Non-Vegetarian', 'Dinner'),
              (4, 'Fruit Box', 8, '2026-09-12', 3, 'Supermarket', 'Delhi', 'Vegan', 'Snacks'),
              (5, 'Veg Meals', 12, '2026-09-08', 3, 'Supermarket', 'Delhi', 'Vegetarian', 'Lunch');

            INSERT INTO Claims VALUES
              (1, 1, 1, 'Completed'),
              (2, 1, 2, 'Completed'),
              (3, 2, 1, 'Completed'),
              (4, 2, 2, 'Completed'),
              (5, 3, 1, 'Completed'),
              (6, 3, 2, 'Completed'),
              (7, 1, 1, 'Completed'),
              (8, 2, 2, 'Pending'),
              (9, 3, 1, 'Pending'),
              (10, 1, 2, 'Cancelled');
            ",
        )
        .expect("fixture schema");
    (dir, store)
}

fn as_i64(fetched: &Fetched, row: usize, column: &str) -> i64 {
    match fetched.table().value(row, column) {
        Some(Value::Integer(v)) => *v,
        other => panic!("expected integer at ({row}, {column}), got {other:?}"),
    }
}

fn as_f64(fetched: &Fetched, row: usize, column: &str) -> f64 {
    match fetched.table().value(row, column) {
        Some(Value::Real(v)) => *v,
        Some(Value::Integer(v)) => *v as f64,
        other => panic!("expected number at ({row}, {column}), got {other:?}"),
    }
}

fn as_text(fetched: &Fetched, row: usize, column: &str) -> String {
    match fetched.table().value(row, column) {
        Some(Value::Text(v)) => v.clone(),
        other => panic!("expected text at ({row}, {column}), got {other:?}"),
    }
}

#[test]
fn listing_filters_narrow_by_conjunction() {
    let (_dir, store) = fixture_store();

    let all = fetch_listings(&store, &ListingFilter::default()).expect("unfiltered");
    assert_eq!(all.table().len(), 5);

    let chennai = fetch_listings(
        &store,
        &ListingFilter {
            city: Some("Chennai".to_string()),
            ..Default::default()
        },
    )
    .expect("city filter");
    assert_eq!(chennai.table().len(), 3);

    let delhi_vegan = fetch_listings(
        &store,
        &ListingFilter {
            city: Some("Delhi".to_string()),
            food_type: Some(FoodType::Vegan),
            ..Default::default()
        },
    )
    .expect("two filters");
    assert_eq!(delhi_vegan.table().len(), 1);
    assert_eq!(as_text(&delhi_vegan, 0, "Food_Name"), "Fruit Box");

    let lunch = fetch_listings(
        &store,
        &ListingFilter {
            meal_type: Some(MealType::Lunch),
            ..Default::default()
        },
    )
    .expect("meal filter");
    assert_eq!(lunch.table().len(), 2);
}

#[test]
fn zero_row_result_is_empty_not_error() {
    let (_dir, store) = fixture_store();
    let fetched = fetch_listings(
        &store,
        &ListingFilter {
            city: Some("Mumbai".to_string()),
            ..Default::default()
        },
    )
    .expect("query succeeds");
    assert!(fetched.is_empty());
    // Column names survive for rendering an empty grid.
    assert!(fetched.table().column_index("Food_ID").is_some());
    assert!(fetched.table().column_index("Meal_Type").is_some());
}

#[test]
fn directory_lookup_by_id_and_name() {
    let (_dir, store) = fixture_store();

    let by_id = fetch_providers(
        &store,
        &ProviderFilter {
            provider_id: Some(2),
            name: None,
        },
    )
    .expect("provider by id");
    assert_eq!(by_id.table().len(), 1);
    assert_eq!(as_text(&by_id, 0, "Name"), "Green Grocer");

    let by_name = fetch_receivers(
        &store,
        &ReceiverFilter {
            receiver_id: None,
            name: Some("Care NGO".to_string()),
        },
    )
    .expect("receiver by name");
    assert_eq!(by_name.table().len(), 1);
    assert_eq!(as_text(&by_name, 0, "City"), "Delhi");

    // Zero id is "not set", so everything comes back.
    let unset = fetch_receivers(
        &store,
        &ReceiverFilter {
            receiver_id: Some(0),
            name: None,
        },
    )
    .expect("unset id filter");
    assert_eq!(unset.table().len(), 2);
}

#[test]
fn claim_status_percentages_match_fixture() {
    let (_dir, store) = fixture_store();
    let fetched = run_report(&store, "claim_status_percentages", None).expect("report");
    let table = fetched.table();
    assert_eq!(table.len(), 3);

    let mut seen = Vec::new();
    for row in 0..table.len() {
        seen.push((
            as_text(&fetched, row, "Status"),
            as_i64(&fetched, row, "Claim_Count"),
            as_f64(&fetched, row, "Percentage"),
        ));
    }
    seen.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(
        seen,
        vec![
            ("Cancelled".to_string(), 1, 10.0),
            ("Completed".to_string(), 7, 70.0),
            ("Pending".to_string(), 2, 20.0),
        ]
    );
}

#[test]
fn aggregate_reports_match_fixture_totals() {
    let (_dir, store) = fixture_store();

    let total = run_report(&store, "total_food_quantity", None).expect("total");
    assert_eq!(as_i64(&total, 0, "Total_Food_Quantity"), 40);

    // Supermarket listings sum to 20, ahead of Restaurant (14) and
    // Grocery Store (6).
    let top = run_report(&store, "top_provider_type_by_quantity", None).expect("top type");
    assert_eq!(top.table().len(), 1);
    assert_eq!(as_text(&top, 0, "Provider_Type"), "Supermarket");
    assert_eq!(as_i64(&top, 0, "Total_Quantity"), 20);

    let city = run_report(&store, "city_with_most_listings", None).expect("top city");
    assert_eq!(as_text(&city, 0, "City"), "Chennai");
    assert_eq!(as_i64(&city, 0, "Total_Listings"), 3);
}

#[test]
fn wastage_report_counts_unclaimed_listings_only() {
    let (_dir, store) = fixture_store();
    let fetched = run_report(&store, "food_type_wastage", None).expect("wastage");
    let table = fetched.table();
    assert_eq!(table.len(), 2);

    let mut seen = Vec::new();
    for row in 0..table.len() {
        seen.push((
            as_text(&fetched, row, "Food_Type"),
            as_i64(&fetched, row, "Unclaimed_Listings"),
        ));
    }
    seen.sort();
    assert_eq!(
        seen,
        vec![("Vegan".to_string(), 1), ("Vegetarian".to_string(), 1)]
    );
}

#[test]
fn every_catalog_report_is_idempotent_against_fixture() {
    let (_dir, store) = fixture_store();
    for report in report_catalog().iter().chain(trend_reports()) {
        let city = match report.arity {
            ReportArity::City => Some("Chennai"),
            ReportArity::None => None,
        };
        let first = run_report(&store, report.key, city).expect(report.key);
        let second = run_report(&store, report.key, city).expect(report.key);
        assert_eq!(
            first.table(),
            second.table(),
            "report {} not idempotent",
            report.key
        );
    }
}

#[test]
fn city_contact_report_binds_the_city() {
    let (_dir, store) = fixture_store();

    let chennai = run_report(&store, "provider_contacts_by_city", Some("Chennai")).expect("report");
    assert_eq!(chennai.table().len(), 2);
    assert_eq!(chennai.table().columns(), &["Name", "Type", "Address", "Contact"]);

    let delhi = run_report(&store, "provider_contacts_by_city", Some("Delhi")).expect("report");
    assert_eq!(delhi.table().len(), 1);
    assert_eq!(as_text(&delhi, 0, "Name"), "Daily Mart");
}

#[test]
fn injected_city_argument_is_inert_data() {
    let (_dir, store) = fixture_store();

    let hostile = "Chennai'; DROP TABLE Providers; --";
    let fetched =
        run_report(&store, "provider_contacts_by_city", Some(hostile)).expect("bound, not spliced");
    assert!(fetched.is_empty());

    // The directory is untouched.
    let providers = fetch_providers(&store, &ProviderFilter::default()).expect("providers intact");
    assert_eq!(providers.table().len(), 3);
}

#[test]
fn city_report_requires_a_city_argument() {
    let (_dir, store) = fixture_store();
    for missing in [None, Some(""), Some("   ")] {
        let err = run_report(&store, "provider_contacts_by_city", missing)
            .expect_err("missing city must fail before storage");
        assert_eq!(err.code, QueryErrorCode::Validation);
        assert!(err.message.contains("city"));
    }
}

#[test]
fn unknown_report_key_is_a_validation_error() {
    let (_dir, store) = fixture_store();
    let err = run_report(&store, "no_such_report", None).expect_err("unknown key");
    assert_eq!(err.code, QueryErrorCode::Validation);
    assert!(err.message.contains("no_such_report"));
}

#[test]
fn insert_then_update_leaves_one_row_with_new_quantity() {
    let (_dir, store) = fixture_store();

    let outcome = add_listing(
        &store,
        &NewListing {
            food_name: "Soup".to_string(),
            quantity: 5,
            expiry_date: "2026-09-15".to_string(),
            provider_id: ProviderId::parse(2).expect("provider id"),
            provider_type: "Grocery Store".to_string(),
            location: "Chennai".to_string(),
            food_type: FoodType::Vegetarian,
            meal_type: MealType::Dinner,
        },
    )
    .expect("insert listing");
    assert_eq!(outcome.rows_affected, 1);

    let inserted = store
        .query(
            "SELECT Food_ID FROM Food_Listings WHERE Food_Name = ?1",
            &[Value::Text("Soup".to_string())],
        )
        .expect("lookup");
    assert_eq!(inserted.len(), 1);
    let Some(Value::Integer(food_id)) = inserted.value(0, "Food_ID") else {
        panic!("missing inserted id");
    };

    let update = QuantityUpdate {
        food_id: FoodId::parse(*food_id).expect("food id"),
        quantity: 3,
    };
    let outcome = update_listing_quantity(&store, update).expect("update");
    assert_eq!(outcome.rows_affected, 1);
    assert!(!outcome.matched_nothing());

    let after = store
        .query(
            "SELECT Quantity FROM Food_Listings WHERE Food_ID = ?1",
            &[Value::Integer(*food_id)],
        )
        .expect("requery");
    assert_eq!(after.len(), 1);
    assert_eq!(after.value(0, "Quantity"), Some(&Value::Integer(3)));
}

#[test]
fn update_and_delete_of_missing_id_report_zero_rows() {
    let (_dir, store) = fixture_store();
    let ghost = FoodId::parse(999).expect("id");

    let outcome = update_listing_quantity(
        &store,
        QuantityUpdate {
            food_id: ghost,
            quantity: 2,
        },
    )
    .expect("update succeeds with zero matches");
    assert!(outcome.matched_nothing());

    let outcome = delete_listing(&store, ghost).expect("delete succeeds with zero matches");
    assert_eq!(outcome.rows_affected, 0);
}

#[test]
fn delete_leaves_claims_in_place() {
    let (_dir, store) = fixture_store();

    let outcome =
        delete_listing(&store, FoodId::parse(1).expect("id")).expect("delete listing 1");
    assert_eq!(outcome.rows_affected, 1);

    // No cascade: the three claims on listing 1 are now orphans.
    let claims = store
        .query("SELECT COUNT(*) AS n FROM Claims", &[])
        .expect("claims count");
    assert_eq!(claims.value(0, "n"), Some(&Value::Integer(10)));
}

#[test]
fn non_positive_quantity_is_rejected_before_storage() {
    let (_dir, store) = fixture_store();

    let err = add_listing(
        &store,
        &NewListing {
            food_name: "Stale".to_string(),
            quantity: 0,
            expiry_date: "2026-09-01".to_string(),
            provider_id: ProviderId::parse(1).expect("id"),
            provider_type: "Restaurant".to_string(),
            location: "Chennai".to_string(),
            food_type: FoodType::Vegan,
            meal_type: MealType::Snacks,
        },
    )
    .expect_err("zero quantity");
    assert_eq!(err.code, QueryErrorCode::Validation);

    let err = update_listing_quantity(
        &store,
        QuantityUpdate {
            food_id: FoodId::parse(1).expect("id"),
            quantity: -4,
        },
    )
    .expect_err("negative quantity");
    assert_eq!(err.code, QueryErrorCode::Validation);

    // Nothing was written.
    let count = store
        .query("SELECT COUNT(*) AS n FROM Food_Listings", &[])
        .expect("count");
    assert_eq!(count.value(0, "n"), Some(&Value::Integer(5)));
    let rice = store
        .query(
            "SELECT Quantity FROM Food_Listings WHERE Food_ID = 1",
            &[],
        )
        .expect("rice");
    assert_eq!(rice.value(0, "Quantity"), Some(&Value::Integer(10)));
}

#[test]
fn add_provider_and_receiver_insert_single_rows() {
    let (_dir, store) = fixture_store();

    let outcome = add_provider(
        &store,
        &NewProvider {
            name: "Night Catering".to_string(),
            provider_type: "Catering Service".to_string(),
            address: "9 Station Rd".to_string(),
            city: "Delhi".to_string(),
            contact: "555-0104".to_string(),
        },
    )
    .expect("add provider");
    assert_eq!(outcome.rows_affected, 1);

    // Duplicates are allowed and become new rows with fresh identities.
    add_provider(
        &store,
        &NewProvider {
            name: "Night Catering".to_string(),
            provider_type: "Catering Service".to_string(),
            address: "9 Station Rd".to_string(),
            city: "Delhi".to_string(),
            contact: "555-0104".to_string(),
        },
    )
    .expect("duplicate provider");

    let dupes = fetch_providers(
        &store,
        &ProviderFilter {
            provider_id: None,
            name: Some("Night Catering".to_string()),
        },
    )
    .expect("lookup");
    assert_eq!(dupes.table().len(), 2);

    let outcome = add_receiver(
        &store,
        &foodshare_model::NewReceiver {
            name: "North Family".to_string(),
            receiver_type: "Family".to_string(),
            city: "Delhi".to_string(),
            contact: "555-0203".to_string(),
        },
    )
    .expect("add receiver");
    assert_eq!(outcome.rows_affected, 1);

    let receivers = fetch_receivers(&store, &ReceiverFilter::default()).expect("receivers");
    assert_eq!(receivers.table().len(), 3);
}

#[test]
fn report_catalog_is_well_formed() {
    assert_eq!(report_catalog().len(), 15);
    assert_eq!(trend_reports().len(), 2);

    let mut keys: Vec<&str> = report_catalog()
        .iter()
        .chain(trend_reports())
        .map(|r| r.key)
        .collect();
    keys.sort_unstable();
    let before = keys.len();
    keys.dedup();
    assert_eq!(keys.len(), before, "report keys must be unique");

    for report in report_catalog().iter().chain(trend_reports()) {
        let placeholders = report.sql.matches('?').count();
        let expected = match report.arity {
            ReportArity::None => 0,
            ReportArity::City => 1,
        };
        assert_eq!(placeholders, expected, "arity mismatch for {}", report.key);
        assert!(find_report(report.key).is_some());
    }
}
