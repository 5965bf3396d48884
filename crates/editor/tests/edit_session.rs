use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use storefront_core::{CategoryId, ProductId};
use storefront_editor::{
    Category, CollaboratorError, EditSession, EditorConfig, EditorError, ImageUpload, InMemoryCatalog,
    InMemoryImageStore, ProductCatalog,
};
use storefront_products::{AxisName, ProductRecord, VariantKey};

/// Red/Blue × S/M tee as the catalog would return it.
fn seeded_tee(catalog: &InMemoryCatalog) -> ProductRecord {
    let id = ProductId::new();
    let category = CategoryId::new();
    let variant = |color: &str, size: &str, price: f64, stock: i64| {
        json!({
            "id": storefront_core::VariantId::new(),
            "sku": format!("TEE_{}_{}", color.to_uppercase(), size),
            "price": price,
            "stock": stock,
            "optionValues": { "COLOR": color, "SIZE": size },
        })
    };

    let record: ProductRecord = serde_json::from_value(json!({
        "id": id,
        "name": "Tee",
        "description": "Heavyweight cotton tee",
        "imageUrl": "https://images.local/tee.png",
        "basePrice": 25.0,
        "categoryId": category,
        "options": [
            {
                "id": storefront_core::OptionAxisId::new(),
                "name": "COLOR",
                "values": [
                    { "id": storefront_core::OptionValueId::new(), "label": "Red" },
                    { "id": storefront_core::OptionValueId::new(), "label": "Blue" },
                ],
            },
            {
                "id": storefront_core::OptionAxisId::new(),
                "name": "SIZE",
                "values": [
                    { "id": storefront_core::OptionValueId::new(), "label": "S" },
                    { "id": storefront_core::OptionValueId::new(), "label": "M" },
                ],
            },
        ],
        "variants": [
            variant("Red", "S", 25.0, 10),
            variant("Red", "M", 27.5, 4),
            variant("Blue", "S", 25.0, 0),
            variant("Blue", "M", 25.0, 7),
        ],
    }))
    .unwrap();

    catalog.insert_product(record.clone()).unwrap();
    record
}

fn png(name: &str) -> ImageUpload {
    ImageUpload {
        file_name: name.to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0x89, b'P', b'N', b'G'],
    }
}

fn skus<C: ProductCatalog>(session: &EditSession<C>) -> Vec<&str> {
    session.draft().variants().iter().map(|v| v.sku.as_str()).collect()
}

async fn open_tee() -> (Arc<InMemoryCatalog>, ProductRecord, EditSession<InMemoryCatalog>) {
    storefront_observability::init();
    let catalog = Arc::new(InMemoryCatalog::new());
    let record = seeded_tee(&catalog);
    let session = EditSession::open(Arc::clone(&catalog), record.id, EditorConfig::default())
        .await
        .unwrap();
    (catalog, record, session)
}

#[tokio::test]
async fn seeded_session_follows_option_edits() {
    let (_catalog, record, mut session) = open_tee().await;
    assert_eq!(skus(&session), ["TEE_RED_S", "TEE_RED_M", "TEE_BLUE_S", "TEE_BLUE_M"]);

    session.draft_mut().remove_value(AxisName::Color, 1).unwrap();
    assert_eq!(skus(&session), ["TEE_RED_S", "TEE_RED_M"]);

    let renamed = session.draft_mut().rename_value(AxisName::Color, 0, "Crimson").unwrap();
    assert_eq!(renamed.propagation.rekeyed, 2);
    assert_eq!(skus(&session), ["TEE_CRIMSON_S", "TEE_CRIMSON_M"]);

    for (variant, seeded) in session.draft().variants().iter().zip(&record.variants[..2]) {
        assert_eq!(variant.id, seeded.id);
        assert_eq!(variant.price, seeded.price);
        assert_eq!(variant.stock, seeded.stock);
    }
}

#[tokio::test]
async fn submit_sends_new_rows_without_ids_and_adopts_assigned_ones() {
    let (catalog, record, mut session) = open_tee().await;
    session.draft_mut().add_value(AxisName::Color, "Green");
    assert_eq!(session.draft().variants().len(), 6);

    session.submit().await.unwrap();

    let payloads = catalog.saved_payloads().unwrap();
    assert_eq!(payloads.len(), 1);
    let variants = payloads[0]["variants"].as_array().unwrap();
    assert_eq!(payloads[0]["productId"], json!(record.id));
    assert_eq!(variants.len(), 6);
    assert!(variants[..4].iter().all(|v| !v["id"].is_null()));
    assert!(variants[4..].iter().all(|v| v["id"].is_null()));
    assert_eq!(variants[4]["sku"], "TEE_GREEN_S");
    assert_eq!(variants[4]["price"], 25.0);

    let draft = session.draft();
    assert!(!session.is_submitting());
    assert!(draft.variants().iter().all(|v| v.id.is_some()));
    assert_eq!(draft.variants()[0].id, record.variants[0].id);
    assert!(draft.axis(AxisName::Color).values()[2].id.is_some());

    let stored = catalog.product(record.id).unwrap().unwrap();
    assert_eq!(stored.variants, draft.variants());
}

#[tokio::test]
async fn new_product_is_created_on_first_submit() {
    storefront_observability::init();
    let catalog = Arc::new(InMemoryCatalog::new());
    let mut session = EditSession::create(Arc::clone(&catalog), EditorConfig::default());

    let draft = session.draft_mut();
    draft.set_name("Café Crème Hoodie");
    draft.set_description("Brushed fleece");
    draft.set_image_url("https://images.local/hoodie.png");
    draft.set_category(Some(CategoryId::new()));
    draft.set_base_price(49.0);
    draft.add_value(AxisName::Color, "Navy Blue");
    draft.add_value(AxisName::Size, "XL");
    assert_eq!(skus(&session), ["CAFE-CREME-HOODIE_NAVY-BLUE_XL"]);

    session.submit().await.unwrap();

    let product_id = session.draft().product_id().unwrap();
    let stored = catalog.product(product_id).unwrap().unwrap();
    assert_eq!(stored.name, "Café Crème Hoodie");
    assert_eq!(stored.variants[0].id, session.draft().variants()[0].id);
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_catalog() {
    storefront_observability::init();
    let catalog = Arc::new(InMemoryCatalog::new());
    let mut session = EditSession::create(Arc::clone(&catalog), EditorConfig::default());
    session.draft_mut().set_name("Tee");

    let err = session.submit().await.unwrap_err();

    assert!(matches!(err, EditorError::Validation(_)));
    assert!(!session.is_submitting());
    assert!(catalog.saved_payloads().unwrap().is_empty());
}

#[tokio::test]
async fn failed_save_leaves_the_draft_untouched() {
    let (catalog, _record, mut session) = open_tee().await;
    session.draft_mut().add_value(AxisName::Size, "L");
    let before = session.draft().clone();

    catalog
        .fail_with(CollaboratorError::Rejected("sku TEE_RED_L already exists".into()))
        .unwrap();
    let err = session.submit().await.unwrap_err();

    assert_eq!(err.to_string(), "sku TEE_RED_L already exists");
    assert_eq!(session.draft(), &before);
    assert!(!session.is_submitting());

    catalog.recover().unwrap();
    session.submit().await.unwrap();
    assert!(session.draft().variants().iter().all(|v| v.id.is_some()));
}

#[tokio::test]
async fn only_one_save_may_be_in_flight() {
    let (_catalog, _record, mut session) = open_tee().await;

    let pending = session.begin_submit().unwrap();
    assert!(session.is_submitting());
    assert!(matches!(session.begin_submit(), Err(EditorError::SubmitInFlight)));

    let outcome = pending.send().await;
    session.finish_submit(outcome).unwrap();
    let late = session.finish_submit(Err(CollaboratorError::Network("late".into())));
    assert!(matches!(late, Err(EditorError::NoSubmitInFlight)));
}

#[tokio::test]
async fn edits_during_a_save_are_kept_but_not_sent() {
    storefront_observability::init();
    let catalog = Arc::new(InMemoryCatalog::new().with_latency(Duration::from_millis(20)));
    let record = seeded_tee(&catalog);
    let mut session = EditSession::open(Arc::clone(&catalog), record.id, EditorConfig::default())
        .await
        .unwrap();

    let pending = session.begin_submit().unwrap();
    assert_eq!(pending.request().variants.len(), 4);
    let save = tokio::spawn(pending.send());

    session.draft_mut().add_value(AxisName::Size, "L");
    session
        .draft_mut()
        .set_variant_stock(&VariantKey::new("Red", "S"), 99)
        .unwrap();

    let outcome = save.await.unwrap();
    session.finish_submit(outcome).unwrap();

    let stored = catalog.product(record.id).unwrap().unwrap();
    assert_eq!(stored.variants.len(), 4);
    assert_eq!(stored.variants[0].stock, 10);

    let draft = session.draft();
    assert_eq!(draft.variants().len(), 6);
    assert_eq!(draft.variant(&VariantKey::new("Red", "S")).unwrap().stock, 99);
    assert!(draft.variant(&VariantKey::new("Red", "L")).unwrap().is_new());
}

#[tokio::test]
async fn uploaded_images_are_attached_to_option_values() {
    let (_catalog, _record, mut session) = open_tee().await;
    let store = InMemoryImageStore::default();

    let url = session
        .upload_value_image(&store, AxisName::Color, 1, png("blue.png"))
        .await
        .unwrap();
    assert_eq!(url, "https://images.local/1/blue.png");
    assert_eq!(session.draft().axis(AxisName::Color).values()[1].images, [url]);

    let missing = session
        .upload_value_image(&store, AxisName::Color, 5, png("ghost.png"))
        .await
        .unwrap_err();
    assert!(matches!(missing, EditorError::Domain(_)));
    assert_eq!(store.upload_count().unwrap(), 1);

    store.fail_with(CollaboratorError::Network("connection reset".into())).unwrap();
    let before = session.draft().clone();
    let err = session
        .upload_value_image(&store, AxisName::Size, 0, png("s.png"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "connection reset");
    assert_eq!(session.draft(), &before);
}

#[tokio::test]
async fn product_image_upload_sets_the_image_url() {
    let (_catalog, _record, mut session) = open_tee().await;
    let store = InMemoryImageStore::new("https://cdn.example.test");

    let url = session.upload_product_image(&store, png("front.png")).await.unwrap();

    assert_eq!(url, "https://cdn.example.test/1/front.png");
    assert_eq!(session.draft().image_url(), url);
}

#[tokio::test]
async fn categories_are_loaded_from_the_catalog() {
    let (catalog, _record, mut session) = open_tee().await;
    for name in ["Tops", "Outerwear"] {
        catalog
            .insert_category(Category {
                id: CategoryId::new(),
                name: name.to_string(),
            })
            .unwrap();
    }

    assert!(session.categories().is_empty());
    let names: Vec<_> = session
        .load_categories()
        .await
        .unwrap()
        .iter()
        .map(|c| c.name.clone())
        .collect();

    assert_eq!(names, ["Tops", "Outerwear"]);
    assert_eq!(session.categories().len(), 2);
}

#[tokio::test]
async fn opening_an_unknown_product_fails() {
    storefront_observability::init();
    let catalog = Arc::new(InMemoryCatalog::new());

    let product_id = ProductId::new();
    let err = EditSession::open(catalog, product_id, EditorConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), format!("product {product_id} not found"));
    assert!(matches!(err, EditorError::Collaborator(CollaboratorError::NotFound(_))));
}
