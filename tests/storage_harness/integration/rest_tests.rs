//! REST integration test macro for storage backends.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that validate
//! a `ProductStorage` through full REST round-trips:
//! JSON → HTTP request → handler → ProductModel → storage → envelope.

/// Generate a REST integration test suite for a storage backend.
///
/// `$storage_factory` must produce an `impl ProductStorage + 'static`.
///
/// # Generated Tests
///
/// ## CRUD
/// - `test_rest_create` — POST 201, normalized record in the envelope
/// - `test_rest_get` — create then GET returns the same record
/// - `test_rest_list` — GET 200 with `data` and `count`
/// - `test_rest_update_put` / `test_rest_update_patch`
/// - `test_rest_delete` — DELETE 200 with the record, then GET 404
///
/// ## Request checks (400)
/// - missing fields, negative or non-numeric price, empty update set,
///   malformed JSON body
///
/// ## Model failures
/// - unknown id → 404, malformed id → 500, schema violation → 500
/// - id segment that is not valid UTF-8 → 400 envelope
macro_rules! rest_integration_tests {
    ($storage_factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use serde_json::{Value, json};
            use std::sync::Arc;

            async fn make_server() -> TestServer {
                let storage = $storage_factory;
                storage_harness::integration::build_test_server(Arc::new(storage))
            }

            async fn create_tv(server: &TestServer) -> Value {
                let response = server.post("/products").json(&tv_body()).await;
                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                body["data"].clone()
            }

            // ==============================================================
            // CRUD — Create
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create() {
                let server = make_server().await;

                let response = server.post("/products").json(&tv_body()).await;
                response.assert_status(StatusCode::CREATED);

                let body: Value = response.json();
                assert_eq!(body["success"], true);
                assert_eq!(body["message"], "Producto creado exitosamente");

                let data = &body["data"];
                assert_eq!(data["name"], "Tv");
                assert_eq!(data["description"], "a flat screen tv");
                assert_eq!(data["price"], 200.0);
                assert_eq!(data["stock"], 0);
                assert_eq!(data["totalValue"], 0.0);
                assert!(data["createdAt"].is_string());
                assert!(data.get("_id").is_none());
                uuid::Uuid::parse_str(data["id"].as_str().unwrap()).unwrap();
            }

            #[tokio::test]
            async fn test_rest_create_with_stock() {
                let server = make_server().await;

                let response = server
                    .post("/products")
                    .json(&json!({
                        "name": "  radio  ",
                        "description": "a portable radio",
                        "price": 10,
                        "stock": 3
                    }))
                    .await;
                response.assert_status(StatusCode::CREATED);

                let body: Value = response.json();
                assert_eq!(body["data"]["name"], "Radio");
                assert_eq!(body["data"]["stock"], 3);
                assert_eq!(body["data"]["totalValue"], 30.0);
            }

            // ==============================================================
            // CRUD — Get
            // ==============================================================

            #[tokio::test]
            async fn test_rest_get() {
                let server = make_server().await;
                let created = create_tv(&server).await;
                let id = created["id"].as_str().unwrap();

                let response = server.get(&format!("/products/{}", id)).await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert_eq!(body["success"], true);
                assert_eq!(body["data"], created);
                assert!(body.get("message").is_none());
            }

            // ==============================================================
            // CRUD — List
            // ==============================================================

            #[tokio::test]
            async fn test_rest_list() {
                let server = make_server().await;

                let empty: Value = server.get("/products").await.json();
                assert_eq!(empty["count"], 0);
                assert_eq!(empty["data"], json!([]));

                create_tv(&server).await;
                create_tv(&server).await;

                let response = server.get("/products").await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert_eq!(body["success"], true);
                assert_eq!(body["count"], 2);
                assert_eq!(body["data"].as_array().unwrap().len(), 2);
            }

            // ==============================================================
            // CRUD — Update
            // ==============================================================

            #[tokio::test]
            async fn test_rest_update_put() {
                let server = make_server().await;
                let created = create_tv(&server).await;
                let id = created["id"].as_str().unwrap();

                let response = server
                    .put(&format!("/products/{}", id))
                    .json(&json!({"price": 149.994, "stock": 12}))
                    .await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert_eq!(body["message"], "Producto actualizado exitosamente");
                assert_eq!(body["data"]["price"], 149.99);
                assert_eq!(body["data"]["name"], "Tv");
                // stock is not an updatable field
                assert_eq!(body["data"]["stock"], 0);
                assert_eq!(body["data"]["createdAt"], created["createdAt"]);
            }

            #[tokio::test]
            async fn test_rest_update_patch() {
                let server = make_server().await;
                let created = create_tv(&server).await;
                let id = created["id"].as_str().unwrap();

                let response = server
                    .patch(&format!("/products/{}", id))
                    .json(&json!({"name": "sMART tv"}))
                    .await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert_eq!(body["data"]["name"], "Smart tv");
                assert_eq!(body["data"]["price"], 200.0);
            }

            #[tokio::test]
            async fn test_rest_update_negative_price_leaves_record_unchanged() {
                let server = make_server().await;
                let created = create_tv(&server).await;
                let id = created["id"].as_str().unwrap();

                let response = server
                    .put(&format!("/products/{}", id))
                    .json(&json!({"price": -5}))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                assert_eq!(body["success"], false);
                assert_eq!(body["message"], "El precio debe ser un número positivo");

                let stored: Value = server.get(&format!("/products/{}", id)).await.json();
                assert_eq!(stored["data"], created);
            }

            #[tokio::test]
            async fn test_rest_update_empty_set() {
                let server = make_server().await;
                let created = create_tv(&server).await;
                let id = created["id"].as_str().unwrap();

                let response = server
                    .put(&format!("/products/{}", id))
                    .json(&json!({"stock": 3}))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                assert_eq!(
                    body["message"],
                    "Debe proporcionar al menos un campo para actualizar"
                );
            }

            #[tokio::test]
            async fn test_rest_update_null_field_is_internal_error() {
                let server = make_server().await;
                let created = create_tv(&server).await;
                let id = created["id"].as_str().unwrap();

                let response = server
                    .put(&format!("/products/{}", id))
                    .json(&json!({"name": null}))
                    .await;
                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

                let body: Value = response.json();
                assert_eq!(body["message"], "Error al actualizar el producto");
                assert!(body["error"].as_str().unwrap().contains("name"));
            }

            #[tokio::test]
            async fn test_rest_update_unknown_id() {
                let server = make_server().await;

                let response = server
                    .put(&format!("/products/{}", uuid::Uuid::new_v4()))
                    .json(&json!({"name": "Radio"}))
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);

                let body: Value = response.json();
                assert_eq!(body["message"], "Producto no encontrado");
            }

            // ==============================================================
            // CRUD — Delete
            // ==============================================================

            #[tokio::test]
            async fn test_rest_delete() {
                let server = make_server().await;
                let created = create_tv(&server).await;
                let id = created["id"].as_str().unwrap();

                let response = server.delete(&format!("/products/{}", id)).await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert_eq!(body["message"], "Producto eliminado exitosamente");
                assert_eq!(body["data"], created);

                server
                    .get(&format!("/products/{}", id))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_delete_unknown_id() {
                let server = make_server().await;

                let response = server
                    .delete(&format!("/products/{}", uuid::Uuid::new_v4()))
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);

                let body: Value = response.json();
                assert_eq!(
                    body,
                    json!({"success": false, "message": "Producto no encontrado"})
                );
            }

            // ==============================================================
            // Create — request checks
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create_missing_fields() {
                let server = make_server().await;

                for payload in [
                    json!({"description": "a flat screen tv", "price": 10}),
                    json!({"name": "", "description": "a flat screen tv", "price": 10}),
                    json!({"name": "tv", "description": "a flat screen tv"}),
                    json!({}),
                ] {
                    let response = server.post("/products").json(&payload).await;
                    response.assert_status(StatusCode::BAD_REQUEST);

                    let body: Value = response.json();
                    assert_eq!(
                        body["message"],
                        "Todos los campos (name, description, price) son requeridos"
                    );
                }

                let list: Value = server.get("/products").await.json();
                assert_eq!(list["count"], 0);
            }

            #[tokio::test]
            async fn test_rest_create_invalid_price() {
                let server = make_server().await;

                for price in [json!(-5), json!("10"), json!(null)] {
                    let response = server
                        .post("/products")
                        .json(&json!({
                            "name": "tv",
                            "description": "a flat screen tv",
                            "price": price
                        }))
                        .await;
                    response.assert_status(StatusCode::BAD_REQUEST);

                    let body: Value = response.json();
                    assert_eq!(body["message"], "El precio debe ser un número positivo");
                }

                let list: Value = server.get("/products").await.json();
                assert_eq!(list["count"], 0);
            }

            #[tokio::test]
            async fn test_rest_create_schema_violation_is_internal_error() {
                let server = make_server().await;

                let response = server
                    .post("/products")
                    .json(&json!({"name": "tv", "description": "short", "price": 10}))
                    .await;
                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

                let body: Value = response.json();
                assert_eq!(body["success"], false);
                assert_eq!(body["message"], "Error al crear el producto");
                assert!(
                    body["error"]
                        .as_str()
                        .unwrap()
                        .contains("La descripción debe tener al menos 10 caracteres")
                );
            }

            #[tokio::test]
            async fn test_rest_malformed_body() {
                let server = make_server().await;

                let response = server.post("/products").text("{not json").await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                assert_eq!(
                    body["message"],
                    "El cuerpo de la petición no es un JSON válido"
                );
            }

            #[tokio::test]
            async fn test_rest_empty_body() {
                let server = make_server().await;

                let response = server.post("/products").await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                assert_eq!(
                    body["message"],
                    "Todos los campos (name, description, price) son requeridos"
                );
            }

            // ==============================================================
            // Identifiers
            // ==============================================================

            #[tokio::test]
            async fn test_rest_get_unknown_id() {
                let server = make_server().await;

                let response = server
                    .get(&format!("/products/{}", uuid::Uuid::new_v4()))
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);

                let body: Value = response.json();
                assert_eq!(
                    body,
                    json!({"success": false, "message": "Producto no encontrado"})
                );
            }

            #[tokio::test]
            async fn test_rest_get_malformed_id() {
                let server = make_server().await;

                let response = server.get("/products/not-an-id").await;
                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

                let body: Value = response.json();
                assert_eq!(body["message"], "Error al obtener el producto");
                assert!(body["error"].as_str().unwrap().contains("not-an-id"));
            }

            #[tokio::test]
            async fn test_rest_undecodable_id_is_bad_request_envelope() {
                let server = make_server().await;

                for response in [
                    server.get("/products/%FF").await,
                    server.delete("/products/%FF").await,
                    server.patch("/products/%FF").json(&json!({"price": 5})).await,
                ] {
                    response.assert_status(StatusCode::BAD_REQUEST);

                    let body: Value = response.json();
                    assert_eq!(body["success"], false);
                    assert!(body["message"].as_str().unwrap().contains("UTF-8"));
                }
            }

            // ==============================================================
            // Health
            // ==============================================================

            #[tokio::test]
            async fn test_rest_health() {
                let server = make_server().await;

                for path in ["/health", "/healthz"] {
                    let response = server.get(path).await;
                    response.assert_status(StatusCode::OK);

                    let body: Value = response.json();
                    assert_eq!(body, json!({"status": "ok", "service": "products-api"}));
                }
            }
        }
    };
}
