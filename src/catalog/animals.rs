// src/catalog/animals.rs
use serde_json::{json, Value};

use crate::fetch::error::ShapeError;
use crate::fetch::extract::{expect_eq, first, text_fact, url, url_fact};
use crate::fetch::types::{EndpointDescriptor, Fact};

pub fn entries() -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor::json("cat_fact", "https://catfact.ninja/fact", |v| {
            text_fact(v, "/fact")
        })
        .summary("Random cat fact (catfact.ninja)"),
        EndpointDescriptor::json(
            "meow_fact",
            "https://meowfacts.herokuapp.com/",
            meow_fact,
        )
        .summary("Random cat fact (meowfacts)"),
        EndpointDescriptor::json(
            "dog_image",
            "https://dog.ceo/api/breeds/image/random",
            dog_ceo_image,
        )
        .summary("Random dog picture URL (dog.ceo)"),
        EndpointDescriptor::json(
            "dog_breed_image",
            "https://dog.ceo/api/breed/{breed}/images/random",
            dog_ceo_image,
        )
        .summary("Random picture of a given breed (dog.ceo)"),
        EndpointDescriptor::json("fox_image", "https://randomfox.ca/floof/", |v| {
            url_fact(v, "/image")
        })
        .summary("Random fox picture URL (randomfox.ca)"),
    ]
}

pub(crate) fn meow_fact(v: &Value) -> Result<Fact, ShapeError> {
    let item = first(v, "/data")?;
    let s = item
        .as_str()
        .ok_or_else(|| ShapeError::new("`/data/0` is not a string"))?;
    Ok(Fact::Text(crate::text::clean_text(s)))
}

/// dog.ceo reports failures in-band with `"status": "error"` (and a 404 status).
pub(crate) fn dog_ceo_image(v: &Value) -> Result<Fact, ShapeError> {
    expect_eq(v, "/status", &json!("success"))?;
    Ok(Fact::Text(url(v, "/message")?))
}
