//! Tests for `RestStore` against a mock PostgREST server.

use std::time::Duration;

use chrono::NaiveDate;
use httpmock::prelude::*;
use serde_json::json;
use tramites_core::{
  Error as CoreError,
  case::CaseRecord,
  catalog::CatalogKind,
  follow_up::NewFollowUp,
  id::{CaseId, CatalogId},
  repo::{CaseRepository, CatalogStore, FollowUpRepository},
  store::RecordStore,
};

use crate::{Error, RestConfig, RestStore};

const KEY: &str = "service-key";
const BEARER: &str = "Bearer service-key";

fn store(server: &MockServer) -> RestStore {
  RestStore::new(RestConfig {
    base_url: server.base_url(),
    api_key:  KEY.into(),
    timeout:  Duration::from_secs(5),
  })
  .expect("rest store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn case_json(id: i64, parent: Option<i64>) -> serde_json::Value {
  json!({
    "id": id,
    "asunto_principal": "Renovación",
    "asunto_secundario": null,
    "fecha_recibido": "2024-05-06",
    "fecha_vencimiento": "2024-05-14",
    "tipo_id": 1,
    "pais_id": 2,
    "estado_id": 3,
    "observaciones": null,
    "tramite_padre_id": parent
  })
}

// ─── Configuration ───────────────────────────────────────────────────────────

#[test]
fn missing_secrets_are_rejected() {
  let empty_url = RestStore::new(RestConfig {
    base_url: " ".into(),
    api_key:  KEY.into(),
    timeout:  Duration::from_secs(5),
  });
  assert!(matches!(empty_url, Err(Error::Config(_))));

  let empty_key = RestStore::new(RestConfig {
    base_url: "https://example.supabase.co".into(),
    api_key:  String::new(),
    timeout:  Duration::from_secs(5),
  });
  assert!(matches!(empty_key, Err(Error::Config(_))));
}

// ─── Catalogs ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_catalog_sends_credentials_and_maps_rows() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when
        .method(GET)
        .path("/rest/v1/cat_paises")
        .query_param("select", "*")
        .query_param("order", "id.asc")
        .header("apikey", KEY)
        .header("authorization", BEARER);
      then.status(200).json_body(json!([
        {"id": 1, "nombre": "México"},
        {"id": 2, "nombre": "Chile"}
      ]));
    })
    .await;

  let entries = store(&server).list_catalog(CatalogKind::Country).await.unwrap();
  mock.assert_async().await;
  assert_eq!(entries.len(), 2);
  assert_eq!(entries[1].id, CatalogId(2));
  assert_eq!(entries[1].name, "Chile");
}

#[tokio::test]
async fn append_catalog_posts_name_and_returns_representation() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when
        .method(POST)
        .path("/rest/v1/cat_estados")
        .header("prefer", "return=representation")
        .json_body(json!({"nombre": "En trámite"}));
      then.status(201).json_body(json!([{"id": 7, "nombre": "En trámite"}]));
    })
    .await;

  let entry = CatalogStore::new(store(&server))
    .append(CatalogKind::Status, " En trámite ")
    .await
    .unwrap();
  mock.assert_async().await;
  assert_eq!(entry.id, CatalogId(7));
}

#[tokio::test]
async fn server_error_surfaces_as_store_unavailable() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/rest/v1/cat_tipos");
      then.status(503).body("upstream down");
    })
    .await;

  let s = store(&server);
  let raw = s.list_catalog(CatalogKind::CaseType).await.unwrap_err();
  assert!(matches!(raw, Error::Status { status, .. } if status.as_u16() == 503));

  let err = CatalogStore::new(s).list_all(CatalogKind::CaseType).await.unwrap_err();
  assert!(matches!(err, CoreError::StoreUnavailable(_)));
}

#[tokio::test]
async fn unreachable_service_is_store_unavailable() {
  let s = RestStore::new(RestConfig {
    base_url: "http://127.0.0.1:9".into(),
    api_key:  KEY.into(),
    timeout:  Duration::from_secs(2),
  })
  .unwrap();
  let err = CatalogStore::new(s).list_all(CatalogKind::Country).await.unwrap_err();
  assert!(matches!(err, CoreError::StoreUnavailable(_)));
}

// ─── Cases ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_cases_maps_null_text_to_empty() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/rest/v1/tramites");
      then
        .status(200)
        .json_body(json!([case_json(1, None), case_json(2, Some(1))]));
    })
    .await;

  let cases = store(&server).list_cases().await.unwrap();
  assert_eq!(cases.len(), 2);
  assert_eq!(cases[0].secondary_subject, "");
  assert_eq!(cases[0].notes, "");
  assert_eq!(cases[0].due_date, date(2024, 5, 14));
  assert_eq!(cases[1].parent_id, Some(CaseId(1)));
}

#[tokio::test]
async fn get_case_filters_by_id() {
  let server = MockServer::start_async().await;
  let found = server
    .mock_async(|when, then| {
      when.method(GET).path("/rest/v1/tramites").query_param("id", "eq.4");
      then.status(200).json_body(json!([case_json(4, None)]));
    })
    .await;
  let missing = server
    .mock_async(|when, then| {
      when.method(GET).path("/rest/v1/tramites").query_param("id", "eq.5");
      then.status(200).json_body(json!([]));
    })
    .await;

  let s = store(&server);
  assert_eq!(s.get_case(CaseId(4)).await.unwrap().unwrap().id, CaseId(4));
  assert!(s.get_case(CaseId(5)).await.unwrap().is_none());
  found.assert_async().await;
  missing.assert_async().await;
}

#[tokio::test]
async fn insert_case_writes_original_columns() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when.method(POST).path("/rest/v1/tramites").json_body(json!({
        "asunto_principal": "Renovación",
        "asunto_secundario": "",
        "fecha_recibido": "2024-05-06",
        "fecha_vencimiento": "2024-05-14",
        "tipo_id": 1,
        "pais_id": 2,
        "estado_id": 3,
        "observaciones": "",
        "tramite_padre_id": null
      }));
      then.status(201).json_body(json!([case_json(9, None)]));
    })
    .await;

  let case = store(&server)
    .insert_case(CaseRecord {
      primary_subject:   "Renovación".into(),
      secondary_subject: String::new(),
      received_date:     date(2024, 5, 6),
      due_date:          date(2024, 5, 14),
      case_type_id:      CatalogId(1),
      country_id:        CatalogId(2),
      status_id:         CatalogId(3),
      notes:             String::new(),
      parent_id:         None,
    })
    .await
    .unwrap();
  mock.assert_async().await;
  assert_eq!(case.id, CaseId(9));
}

#[tokio::test]
async fn empty_insert_representation_is_an_error() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(POST).path("/rest/v1/cat_paises");
      then.status(201).json_body(json!([]));
    })
    .await;

  let err = store(&server)
    .insert_catalog(CatalogKind::Country, "Chile".into())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::EmptyInsert(_)));
}

#[tokio::test]
async fn repository_rejects_dangling_parent_before_posting() {
  let server = MockServer::start_async().await;
  for (table, id) in [("cat_paises", 2), ("cat_tipos", 1), ("cat_estados", 3)] {
    server
      .mock_async(move |when, then| {
        when.method(GET).path(format!("/rest/v1/{table}"));
        then.status(200).json_body(json!([{"id": id, "nombre": "x"}]));
      })
      .await;
  }
  server
    .mock_async(|when, then| {
      when.method(GET).path("/rest/v1/tramites");
      then.status(200).json_body(json!([case_json(1, None)]));
    })
    .await;
  let post = server
    .mock_async(|when, then| {
      when.method(POST).path("/rest/v1/tramites");
      then.status(201).json_body(json!([case_json(2, Some(99))]));
    })
    .await;

  let mut input = tramites_core::case::NewCase::new(
    "Subtarea",
    date(2024, 5, 6),
    CatalogId(1),
    CatalogId(2),
    CatalogId(3),
  );
  input.parent_id = Some(CaseId(99));

  let err = CaseRepository::new(store(&server)).create(input).await.unwrap_err();
  assert!(matches!(err, CoreError::Reference(_)));
  post.assert_hits_async(0).await;
}

// ─── Follow-ups ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_follow_ups_filters_and_orders_explicitly() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when
        .method(GET)
        .path("/rest/v1/seguimientos")
        .query_param("tramite_id", "eq.3")
        .query_param("order", "id.asc");
      then.status(200).json_body(json!([
        {
          "id": 11,
          "tramite_id": 3,
          "fecha_seguimiento": "2024-05-08",
          "anotaciones": "Llamada",
          "creado_en": "2024-05-06T15:00:00Z"
        },
        {
          "id": 10,
          "tramite_id": 3,
          "fecha_seguimiento": "2024-05-07",
          "anotaciones": null,
          "creado_en": "2024-05-07T09:30:00+00:00"
        }
      ]));
    })
    .await;

  let listed = FollowUpRepository::new(store(&server))
    .list_by_case(CaseId(3))
    .await
    .unwrap();
  mock.assert_async().await;

  // Insertion (id) order, even against the response order and a clock that
  // stepped back between the two inserts.
  assert_eq!(listed[0].id.0, 10);
  assert_eq!(listed[0].annotation, "");
  assert_eq!(listed[1].annotation, "Llamada");
}

#[tokio::test]
async fn insert_follow_up_stamps_creation_time() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when
        .method(POST)
        .path("/rest/v1/seguimientos")
        .json_body_partial(r#"{"tramite_id": 3, "fecha_seguimiento": "2024-05-09", "anotaciones": ""}"#)
        .body_contains("creado_en");
      then.status(201).json_body(json!([{
        "id": 12,
        "tramite_id": 3,
        "fecha_seguimiento": "2024-05-09",
        "anotaciones": "",
        "creado_en": "2024-05-09T10:00:00Z"
      }]));
    })
    .await;

  let follow_up = store(&server)
    .insert_follow_up(NewFollowUp {
      case_id:        CaseId(3),
      follow_up_date: date(2024, 5, 9),
      annotation:     String::new(),
    })
    .await
    .unwrap();
  mock.assert_async().await;
  assert_eq!(follow_up.case_id, CaseId(3));
}
