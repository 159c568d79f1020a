//! Element and bucket operations against the scripted transport.

mod support;

use serde_json::json;

use client::{BucketName, Client, Element, ElementId, Error, Field, Method, SpaceName};
use support::{error_body, test_config, FakeTransport};

fn client_over(transport: &std::sync::Arc<FakeTransport>) -> Client {
    Client::with_transport(test_config(), transport.clone()).unwrap()
}

fn space() -> SpaceName {
    SpaceName::new("exampleSpace").unwrap()
}

fn users() -> BucketName {
    BucketName::new("users").unwrap()
}

#[tokio::test]
async fn added_element_round_trips_with_field_order_preserved() {
    let transport = FakeTransport::new();
    transport.respond(
        200,
        json!({
            "id": "exampleElementId",
            "fields": [
                {"name": "firstName", "value": "John"},
                {"name": "lastName", "value": "Smith"}
            ]
        }),
    );
    let cubby = client_over(&transport);

    let fields = vec![Field::new("firstName", "John"), Field::new("lastName", "Smith")];
    let element = cubby.add_element(&space(), &users(), fields.clone()).await.unwrap();

    let expected = Element::new(ElementId::new("exampleElementId").unwrap(), fields.clone());
    assert_eq!(element, expected);

    let request = transport.only_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "http://cubby.test/api/v1/exampleSpace/users");
    assert_eq!(request.body, Some(json!({"fields": fields})));
}

#[tokio::test]
async fn duplicate_field_names_survive_the_round_trip() {
    let transport = FakeTransport::new();
    transport.respond(
        200,
        json!({
            "id": "e1",
            "fields": [
                {"name": "tag", "value": "x"},
                {"name": "tag", "value": "y"}
            ]
        }),
    );
    let cubby = client_over(&transport);

    let fields = vec![Field::new("tag", "x"), Field::new("tag", "y")];
    let element = cubby.add_element(&space(), &users(), fields.clone()).await.unwrap();

    assert_eq!(element.fields, fields);
}

#[tokio::test]
async fn gets_an_element_by_id() {
    let transport = FakeTransport::new();
    transport.respond(
        200,
        json!({"id": "e1", "fields": [{"name": "username", "value": "Heniek"}]}),
    );
    let cubby = client_over(&transport);
    let id = ElementId::new("e1").unwrap();

    let element = cubby.get_element(&space(), &users(), &id).await.unwrap();

    assert_eq!(element.id, id);
    let request = transport.only_request();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.url, "http://cubby.test/api/v1/exampleSpace/users/e1");
}

#[tokio::test]
async fn updates_an_element_with_a_fields_payload() {
    let transport = FakeTransport::new();
    transport.respond_empty(200);
    let cubby = client_over(&transport);
    let id = ElementId::new("e1").unwrap();
    let fields = vec![Field::new("username", "Mirek")];

    cubby.update_element(&space(), &users(), &id, fields.clone()).await.unwrap();

    let request = transport.only_request();
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.url, "http://cubby.test/api/v1/exampleSpace/users/e1");
    assert_eq!(request.body, Some(json!({"fields": fields})));
}

#[tokio::test]
async fn deletes_an_element() {
    let transport = FakeTransport::new();
    transport.respond_empty(200);
    let cubby = client_over(&transport);
    let id = ElementId::new("e1").unwrap();

    cubby.delete_element(&space(), &users(), &id).await.unwrap();

    let request = transport.only_request();
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.url, "http://cubby.test/api/v1/exampleSpace/users/e1");
}

#[tokio::test]
async fn deletes_a_bucket() {
    let transport = FakeTransport::new();
    transport.respond_empty(200);
    let cubby = client_over(&transport);

    cubby.delete_bucket(&space(), &users()).await.unwrap();

    let request = transport.only_request();
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.url, "http://cubby.test/api/v1/exampleSpace/users");
}

#[tokio::test]
async fn missing_element_surfaces_bucket_and_element_context() {
    let transport = FakeTransport::new();
    transport.respond(404, error_body("ELEMENT_DOES_NOT_EXIST"));
    let cubby = client_over(&transport);
    let id = ElementId::new("notExistingElement").unwrap();

    let err = cubby.get_element(&space(), &users(), &id).await.unwrap_err();

    assert!(matches!(
        err,
        Error::ElementNotFound { space: Some(s), bucket, element, transaction: None }
            if s.as_str() == "exampleSpace"
                && bucket.as_str() == "users"
                && element.as_str() == "notExistingElement"
    ));
}

#[tokio::test]
async fn missing_bucket_surfaces_space_and_bucket_context() {
    let transport = FakeTransport::new();
    transport.respond(404, error_body("BUCKET_DOES_NOT_EXIST"));
    let cubby = client_over(&transport);

    let err = cubby.add_element(&space(), &users(), Vec::new()).await.unwrap_err();

    assert!(matches!(
        err,
        Error::BucketNotFound { space: Some(s), bucket, transaction: None }
            if s.as_str() == "exampleSpace" && bucket.as_str() == "users"
    ));
}

#[tokio::test]
async fn names_are_percent_encoded_in_paths() {
    let transport = FakeTransport::new();
    transport.respond_empty(200);
    let cubby = client_over(&transport);
    let spaced = BucketName::new("user records").unwrap();

    cubby.delete_bucket(&space(), &spaced).await.unwrap();

    let request = transport.only_request();
    assert_eq!(request.url, "http://cubby.test/api/v1/exampleSpace/user%20records");
}
