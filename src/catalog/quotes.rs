// src/catalog/quotes.rs
use serde_json::Value;

use crate::fetch::error::ShapeError;
use crate::fetch::extract::{first, text, text_fact, text_or};
use crate::fetch::types::{EndpointDescriptor, Fact};

pub fn entries() -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor::json("random_quote", "https://api.quotable.io/random", quotable)
            .summary("Random quote with author (quotable.io)"),
        EndpointDescriptor::json("zen_quote", "https://zenquotes.io/api/random", zen_quote)
            .summary("Random quote with author (zenquotes.io)"),
        EndpointDescriptor::json("kanye_quote", "https://api.kanye.rest", |v| {
            text_fact(v, "/quote")
        })
        .summary("Random Kanye West quote (kanye.rest)"),
        EndpointDescriptor::json("advice", "https://api.adviceslip.com/advice", |v| {
            text_fact(v, "/slip/advice")
        })
        .summary("Random piece of advice (adviceslip)"),
        EndpointDescriptor::json(
            "joke",
            "https://official-joke-api.appspot.com/random_joke",
            setup_punchline,
        )
        .summary("Random two-part joke"),
        EndpointDescriptor::json("dad_joke", "https://icanhazdadjoke.com/", |v| {
            text_fact(v, "/joke")
        })
        .summary("Random dad joke (icanhazdadjoke)")
        .with_header("Accept", "application/json"),
        EndpointDescriptor::json(
            "chuck_norris",
            "https://api.chucknorris.io/jokes/random",
            |v| text_fact(v, "/value"),
        )
        .summary("Random Chuck Norris joke"),
    ]
}

pub(crate) fn quotable(v: &Value) -> Result<Fact, ShapeError> {
    Ok(Fact::record([
        ("text", Fact::Text(text(v, "/content")?)),
        ("author", Fact::Text(text_or(v, "/author", "Unknown"))),
    ]))
}

/// zenquotes answers with a one-element array at the root.
pub(crate) fn zen_quote(v: &Value) -> Result<Fact, ShapeError> {
    let q = first(v, "")?;
    Ok(Fact::record([
        ("text", Fact::Text(text(q, "/q")?)),
        ("author", Fact::Text(text_or(q, "/a", "Unknown"))),
    ]))
}

pub(crate) fn setup_punchline(v: &Value) -> Result<Fact, ShapeError> {
    Ok(Fact::record([
        ("setup", Fact::Text(text(v, "/setup")?)),
        ("punchline", Fact::Text(text(v, "/punchline")?)),
    ]))
}
