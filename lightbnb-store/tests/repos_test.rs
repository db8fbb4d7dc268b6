//! Repository behavior against in-memory stores (no database required)

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lightbnb_store::{
    BuiltQuery, Cents, DbError, NewProperty, NewUser, PropertyFilter, PropertyRepo,
    ReservationRepo, Row, SqlValue, Store, StoreError, UserRepo, ValidationError,
};
use serde_json::{json, Value};
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Replays canned responses and records every statement it receives.
#[derive(Default)]
struct RecordingStore {
    responses: Mutex<VecDeque<Result<Vec<Row>, StoreError>>>,
    executed: Mutex<Vec<BuiltQuery>>,
}

impl RecordingStore {
    fn respond(self, rows: Vec<Value>) -> Self {
        let rows = rows
            .into_iter()
            .map(|v| match v {
                Value::Object(map) => map,
                other => panic!("row must be an object, got {other}"),
            })
            .collect();
        self.responses.lock().unwrap().push_back(Ok(rows));
        self
    }

    fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(StoreError::Backend(message.to_owned())));
        self
    }

    fn executed(&self) -> Vec<BuiltQuery> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Store for RecordingStore {
    async fn execute(&self, query: &BuiltQuery) -> Result<Vec<Row>, StoreError> {
        self.executed.lock().unwrap().push(query.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Keeps inserted properties and serves them back to listings.
#[derive(Default)]
struct PropertyTable {
    rows: Mutex<Vec<Row>>,
}

const PROPERTY_COLUMNS: [&str; 14] = [
    "owner_id",
    "title",
    "description",
    "thumbnail_photo_url",
    "cover_photo_url",
    "cost_per_night",
    "street",
    "city",
    "province",
    "post_code",
    "country",
    "parking_spaces",
    "number_of_bathrooms",
    "number_of_bedrooms",
];

#[async_trait]
impl Store for PropertyTable {
    async fn execute(&self, query: &BuiltQuery) -> Result<Vec<Row>, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        if query.text().starts_with("INSERT INTO properties") {
            let mut row = Row::new();
            row.insert("id".into(), json!(rows.len() + 1));
            for (column, value) in PROPERTY_COLUMNS.iter().zip(query.params()) {
                row.insert((*column).into(), serde_json::to_value(value).unwrap());
            }
            rows.push(row.clone());
            Ok(vec![row])
        } else if query.text().starts_with("SELECT properties.*") {
            Ok(rows
                .iter()
                .cloned()
                .map(|mut r| {
                    r.insert("average_rating".into(), json!(4.5));
                    r
                })
                .collect())
        } else {
            Err(StoreError::Backend(format!("unexpected statement: {}", query.text())))
        }
    }
}

fn user_row(id: i64, email: &str) -> Value {
    json!({ "id": id, "name": "Devin Sanders", "email": email, "password": "$2a$10$hash" })
}

fn property_row(id: i64, cents: i64) -> Value {
    json!({
        "id": id,
        "owner_id": 1,
        "title": "Speed lamp",
        "description": "description",
        "thumbnail_photo_url": "t.jpg",
        "cover_photo_url": "c.jpg",
        "cost_per_night": cents,
        "street": "536 Namsub Highway",
        "city": "Vancouver",
        "province": "BC",
        "post_code": "28142",
        "country": "Canada",
        "parking_spaces": 3,
        "number_of_bathrooms": 1,
        "number_of_bedrooms": 2,
        "active": true,
        "average_rating": 4.2
    })
}

fn new_property(cost: f64) -> NewProperty {
    NewProperty {
        owner_id: 1,
        title: "Speed lamp".into(),
        description: Some("description".into()),
        thumbnail_photo_url: "t.jpg".into(),
        cover_photo_url: "c.jpg".into(),
        cost_per_night: cost,
        street: "536 Namsub Highway".into(),
        city: "Vancouver".into(),
        province: "BC".into(),
        post_code: "28142".into(),
        country: "Canada".into(),
        parking_spaces: 3,
        number_of_bathrooms: 1,
        number_of_bedrooms: 2,
    }
}

// === Users ===

#[tokio::test]
async fn find_by_email_returns_first_row() {
    let store = RecordingStore::default().respond(vec![user_row(4, "devin@example.com")]);
    let user = UserRepo::new(&store)
        .find_by_email("devin@example.com")
        .await
        .unwrap()
        .expect("user should be found");

    assert_eq!(user.id, 4);
    assert_eq!(user.email, "devin@example.com");

    let executed = store.executed();
    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].params(), &[SqlValue::Text("devin@example.com".into())]);
}

#[tokio::test]
async fn missing_user_is_none() {
    let store = RecordingStore::default();
    let repo = UserRepo::new(&store);

    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    assert!(repo.find_by_id(999).await.unwrap().is_none());
    assert_eq!(store.executed()[1].params(), &[SqlValue::Int(999)]);
}

#[tokio::test]
async fn malformed_email_never_reaches_store() {
    let store = RecordingStore::default();
    let err = UserRepo::new(&store).find_by_email("not-an-email").await.unwrap_err();

    assert!(err.is_invalid_argument());
    assert!(store.executed().is_empty());
}

#[tokio::test]
async fn create_user_returns_inserted_row() {
    let store = RecordingStore::default().respond(vec![user_row(11, "new@example.com")]);
    let user = UserRepo::new(&store)
        .create(&NewUser {
            name: "New Person".into(),
            email: "new@example.com".into(),
            password: "$2a$10$hash".into(),
        })
        .await
        .unwrap();

    assert_eq!(user.id, 11);
    assert!(store.executed()[0].text().starts_with("INSERT INTO users"));
}

#[tokio::test]
async fn create_user_without_returned_row_is_error() {
    let store = RecordingStore::default();
    let err = UserRepo::new(&store)
        .create(&NewUser {
            name: "New Person".into(),
            email: "new@example.com".into(),
            password: "pw".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::MissingRow { op: "insert user" }));
}

#[tokio::test]
async fn create_user_propagates_constraint_violation() {
    let store = RecordingStore::default().fail("duplicate key value violates unique constraint");
    let err = UserRepo::new(&store)
        .create(&NewUser {
            name: "Dup".into(),
            email: "dup@example.com".into(),
            password: "pw".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::Store(_)));
    assert!(err.to_string().contains("duplicate key"));
}

// === Reservations ===

#[tokio::test]
async fn reservations_decode_joined_rows() {
    let mut row = property_row(2, 85234);
    row["reservation_id"] = json!(41);
    row["start_date"] = json!("2018-09-11");
    row["end_date"] = json!("2018-09-26");
    row["guest_id"] = json!(1);

    let store = RecordingStore::default().respond(vec![row]);
    let reservations = ReservationRepo::new(&store).list_for_guest(1, 10).await.unwrap();

    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0].reservation_id, 41);
    assert_eq!(reservations[0].property.id, 2);
    assert_eq!(reservations[0].average_rating, Some(4.2));
    assert_eq!(store.executed()[0].params(), &[SqlValue::Int(1), SqlValue::Int(10)]);
}

#[tokio::test]
async fn reservations_empty_for_unknown_guest() {
    let store = RecordingStore::default();
    let reservations = ReservationRepo::new(&store).list_for_guest(404, 10).await.unwrap();
    assert!(reservations.is_empty());
}

#[tokio::test]
async fn reservation_store_failure_is_returned() {
    let store = RecordingStore::default().fail("connection refused");
    let err = ReservationRepo::new(&store).list_for_guest(1, 10).await.unwrap_err();
    assert!(matches!(err, DbError::Store(StoreError::Backend(_))));
}

// === Properties ===

#[tokio::test]
async fn list_properties_binds_city_rating_limit() {
    let store = RecordingStore::default().respond(vec![property_row(1, 15000)]);
    let filter = PropertyFilter::default().city("Van").min_rating(4.0);

    let listings = PropertyRepo::new(&store).list(&filter, 5).await.unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].property.cost_per_night, Cents::new(15000));

    let executed = store.executed();
    assert_eq!(
        executed[0].params(),
        &[
            SqlValue::Text("%Van%".into()),
            SqlValue::Float(4.0),
            SqlValue::Int(5)
        ]
    );
    assert!(executed[0].text().contains("WHERE properties.city ILIKE $1"));
    assert!(executed[0].text().contains("HAVING"));
}

#[tokio::test]
async fn list_properties_rejects_bad_filter_before_store() {
    let store = RecordingStore::default();
    let repo = PropertyRepo::new(&store);

    let err = repo
        .list(&PropertyFilter::default().min_price(-10.0), 10)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DbError::InvalidArgument(ValidationError::OutOfRange {
            field: "minimum_price_per_night",
            ..
        })
    ));

    let err = repo.list(&PropertyFilter::default(), 0).await.unwrap_err();
    assert!(err.is_invalid_argument());

    assert!(store.executed().is_empty());
}

#[tokio::test]
async fn list_properties_failure_is_not_swallowed() {
    let store = RecordingStore::default().fail("syntax error at or near \"HAVING\"");
    let err = PropertyRepo::new(&store)
        .list(&PropertyFilter::default(), 10)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Store(_)));
}

#[tokio::test]
async fn malformed_row_is_decode_error() {
    let store = RecordingStore::default().respond(vec![json!({ "id": "not a number" })]);
    let err = PropertyRepo::new(&store)
        .list(&PropertyFilter::default(), 10)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Decode(_)));
}

#[tokio::test]
async fn add_property_rejects_invalid_payload() {
    let store = RecordingStore::default();
    let mut property = new_property(120.0);
    property.title = " ".into();

    let err = PropertyRepo::new(&store).create(&property).await.unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(store.executed().is_empty());
}

#[tokio::test]
async fn property_cost_round_trips_through_cents() {
    let store = PropertyTable::default();
    let repo = PropertyRepo::new(&store);

    let created = repo.create(&new_property(99.99)).await.unwrap();
    assert_eq!(created.cost_per_night.cents(), 9999);
    assert_eq!(created.cost_per_night_dollars(), 99.99);

    let listed = repo.list(&PropertyFilter::default(), 10).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].property.cost_per_night, Cents::new(9999));
    assert_eq!(listed[0].property.cost_per_night_dollars(), 99.99);
    assert_eq!(listed[0].property.id, created.id);

    let printed = serde_json::to_value(&listed[0]).unwrap();
    assert_eq!(printed["cost_per_night"], json!(99.99));
}

// === Tracing ===

/// Collects every span and event field as `name=value` text.
#[derive(Clone, Default)]
struct FieldCapture(Arc<Mutex<Vec<String>>>);

impl Visit for FieldCapture {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.lock().unwrap().push(format!("{}={:?}", field.name(), value));
    }
}

impl<S: tracing::Subscriber> Layer<S> for FieldCapture {
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: Context<'_, S>,
    ) {
        attrs.record(&mut self.clone());
    }

    fn on_record(
        &self,
        _id: &tracing::span::Id,
        values: &tracing::span::Record<'_>,
        _ctx: Context<'_, S>,
    ) {
        values.record(&mut self.clone());
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        event.record(&mut self.clone());
    }
}

#[tokio::test]
async fn repository_spans_omit_search_and_guest_values() {
    let capture = FieldCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let store = RecordingStore::default()
        .respond(vec![property_row(1, 15000)])
        .respond(vec![]);
    let filter = PropertyFilter::default().city("Zanzibarville").min_rating(4.0);
    PropertyRepo::new(&store).list(&filter, 7).await.unwrap();
    ReservationRepo::new(&store).list_for_guest(918_273, 3).await.unwrap();

    let fields = capture.0.lock().unwrap().clone();
    assert!(fields.iter().any(|f| f == "predicates=1"), "{fields:?}");
    assert!(fields.iter().any(|f| f == "limit=7"), "{fields:?}");
    assert!(fields.iter().any(|f| f == "limit=3"), "{fields:?}");
    assert!(!fields.iter().any(|f| f.contains("Zanzibarville")), "{fields:?}");
    assert!(!fields.iter().any(|f| f.contains("918273")), "{fields:?}");
}
