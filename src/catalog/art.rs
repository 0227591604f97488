// src/catalog/art.rs
use serde_json::Value;

use crate::fetch::error::ShapeError;
use crate::fetch::extract::{field, text, text_or, url};
use crate::fetch::types::{CredentialPlacement, EndpointDescriptor, Fact};

pub fn entries() -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor::json(
            "met_object",
            "https://collectionapi.metmuseum.org/public/collection/v1/objects/{object_id}",
            met_object,
        )
        .summary("Artwork by object id (Metropolitan Museum of Art)"),
        EndpointDescriptor::json(
            "artic_artwork",
            "https://api.artic.edu/api/v1/artworks/{id}?fields=id,title,artist_display,date_display",
            artic_artwork,
        )
        .summary("Artwork by id (Art Institute of Chicago)"),
        EndpointDescriptor::json(
            "nasa_apod",
            "https://api.nasa.gov/planetary/apod?api_key={api_key}",
            nasa_apod,
        )
        .summary("Astronomy picture of the day (NASA)")
        .with_credential("NASA_API_KEY", CredentialPlacement::Url),
    ]
}

pub(crate) fn met_object(v: &Value) -> Result<Fact, ShapeError> {
    Ok(Fact::record([
        ("title", Fact::Text(text(v, "/title")?)),
        (
            "artist",
            Fact::Text(text_or(v, "/artistDisplayName", "Unknown artist")),
        ),
        ("date", Fact::Text(text_or(v, "/objectDate", "undated"))),
    ]))
}

pub(crate) fn artic_artwork(v: &Value) -> Result<Fact, ShapeError> {
    let data = field(v, "/data")?;
    Ok(Fact::record([
        ("title", Fact::Text(text(data, "/title")?)),
        (
            "artist",
            Fact::Text(text_or(data, "/artist_display", "Unknown artist")),
        ),
        ("date", Fact::Text(text_or(data, "/date_display", "undated"))),
    ]))
}

pub(crate) fn nasa_apod(v: &Value) -> Result<Fact, ShapeError> {
    Ok(Fact::record([
        ("title", Fact::Text(text(v, "/title")?)),
        ("date", Fact::Text(text(v, "/date")?)),
        ("url", Fact::Text(url(v, "/url")?)),
    ]))
}
