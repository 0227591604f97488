// src/catalog/knowledge.rs
use serde_json::{json, Value};

use crate::fetch::error::ShapeError;
use crate::fetch::extract::{expect_eq, first, number, text, text_fact, text_or};
use crate::fetch::types::{EndpointDescriptor, Fact};
use crate::text::clean_text;

pub fn entries() -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor::json(
            "trivia",
            "https://opentdb.com/api.php?amount=1&type={kind}",
            open_trivia,
        )
        .summary("One trivia question with its answer (Open Trivia DB)")
        .with_default("kind", "multiple"),
        EndpointDescriptor::text("number_fact", "http://numbersapi.com/{number}", plain_fact)
            .summary("Fact about a number (numbersapi, plain text)")
            .with_default("number", "random"),
        EndpointDescriptor::json(
            "country",
            "https://restcountries.com/v3.1/name/{country}",
            rest_country,
        )
        .summary("Capital, region and population of a country (REST Countries)"),
        EndpointDescriptor::json(
            "next_holiday",
            "https://date.nager.at/api/v3/NextPublicHolidays/{country_code}",
            next_holiday,
        )
        .summary("Next public holiday for an ISO country code (Nager.Date)"),
        EndpointDescriptor::json(
            "activity",
            "https://bored-api.appbrewery.com/random",
            |v| text_fact(v, "/activity"),
        )
        .summary("Something to do when bored"),
        EndpointDescriptor::json(
            "useless_fact",
            "https://uselessfacts.jsph.pl/api/v2/facts/random?language={lang}",
            |v| text_fact(v, "/text"),
        )
        .summary("Random useless fact")
        .with_default("lang", "en"),
    ]
}

/// Open Trivia DB signals "no results" with `response_code != 0` and an empty list.
pub(crate) fn open_trivia(v: &Value) -> Result<Fact, ShapeError> {
    expect_eq(v, "/response_code", &json!(0))?;
    let q = first(v, "/results")?;
    Ok(Fact::record([
        ("category", Fact::Text(text_or(q, "/category", "General"))),
        ("question", Fact::Text(text(q, "/question")?)),
        ("answer", Fact::Text(text(q, "/correct_answer")?)),
    ]))
}

pub(crate) fn plain_fact(body: &str) -> Result<Fact, ShapeError> {
    let s = clean_text(body);
    if s.is_empty() {
        return Err(ShapeError::new("empty text body"));
    }
    Ok(Fact::Text(s))
}

pub(crate) fn rest_country(v: &Value) -> Result<Fact, ShapeError> {
    let c = first(v, "")?;
    let capital = first(c, "/capital")
        .ok()
        .and_then(Value::as_str)
        .map(clean_text)
        .unwrap_or_else(|| "none".to_string());
    Ok(Fact::record([
        ("name", Fact::Text(text(c, "/name/common")?)),
        ("capital", Fact::Text(capital)),
        ("region", Fact::Text(text_or(c, "/region", "unknown"))),
        ("population", Fact::Number(number(c, "/population")?)),
    ]))
}

pub(crate) fn next_holiday(v: &Value) -> Result<Fact, ShapeError> {
    let h = first(v, "")?;
    Ok(Fact::record([
        ("date", Fact::Text(text(h, "/date")?)),
        ("name", Fact::Text(text(h, "/name")?)),
    ]))
}
