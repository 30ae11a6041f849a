use super::*;

#[test]
fn server_message_prefers_message_field() {
    let v = serde_json::json!({ "message": "Item out of stock", "error": "ignored" });
    assert_eq!(server_message(&v).as_deref(), Some("Item out of stock"));
}

#[test]
fn server_message_falls_back_to_error_field() {
    let v = serde_json::json!({ "error": "cart locked" });
    assert_eq!(server_message(&v).as_deref(), Some("cart locked"));
}

#[test]
fn server_message_ignores_blank_and_non_string_values() {
    assert_eq!(server_message(&serde_json::json!({ "message": "  " })), None);
    assert_eq!(server_message(&serde_json::json!({ "message": 42 })), None);
    assert_eq!(server_message(&serde_json::json!({ "detail": "x" })), None);
}

#[test]
fn server_message_survives_context_for_downcast() {
    let err = anyhow::Error::new(ServerMessage("Item out of stock".to_string()))
        .context("add to cart status 400");
    assert_eq!(
        err.downcast_ref::<ServerMessage>(),
        Some(&ServerMessage("Item out of stock".to_string()))
    );
}

#[test]
fn url_joins_without_double_slash() -> Result<()> {
    let client = RemoteClient::new(
        RemoteConfig {
            base_url: "http://localhost:5000/".to_string(),
        },
        "t".to_string(),
    )?;
    assert_eq!(
        client.url("/api/cart"),
        "http://localhost:5000/api/cart".to_string()
    );
    assert_eq!(client.auth(), "Bearer t");
    Ok(())
}

#[test]
fn item_dto_maps_wire_names_and_rounds_rating() -> Result<()> {
    let dto: ItemDto = serde_json::from_value(serde_json::json!({
        "_id": "i1",
        "dishname": "Dosa",
        "dishphoto": "dosa.png",
        "restaurantid": { "restaurantname": "Court1" },
        "category": "South Indian",
        "dineinPrice": 40.0,
        "description": "crispy",
        "availability": true,
        "rating": 4.26
    }))?;
    let item = CatalogItem::from(dto);
    assert_eq!(item.id, ItemId::new("i1"));
    assert_eq!(item.vendor, "Court1");
    assert_eq!(item.rating, 4.3);
    assert!(item.is_available);
    Ok(())
}

#[test]
fn item_dto_without_vendor_ref_or_rating_defaults() -> Result<()> {
    let dto: ItemDto = serde_json::from_value(serde_json::json!({
        "_id": "i2",
        "dishname": "Tea"
    }))?;
    let item = CatalogItem::from(dto);
    assert_eq!(item.vendor, "");
    assert_eq!(item.rating, 0.0);
    assert!(!item.is_available);
    Ok(())
}
