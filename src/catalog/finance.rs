// src/catalog/finance.rs
use serde_json::Value;

use crate::fetch::error::ShapeError;
use crate::fetch::extract::{field, only_entry};
use crate::fetch::types::{EndpointDescriptor, Fact};

pub fn entries() -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor::json(
            "crypto_price",
            "https://api.coingecko.com/api/v3/simple/price?ids={coin}&vs_currencies={currency}",
            coingecko_price,
        )
        .summary("Spot price of a coin (CoinGecko)")
        .with_default("coin", "bitcoin")
        .with_default("currency", "usd"),
        EndpointDescriptor::json(
            "exchange_rate",
            "https://api.frankfurter.app/latest?from={base}&to={target}",
            frankfurter_rate,
        )
        .summary("Latest FX rate between two currencies (Frankfurter)"),
    ]
}

/// `{"<coin>": {"<currency>": price}}`; unknown coins come back as `{}`.
pub(crate) fn coingecko_price(v: &Value) -> Result<Fact, ShapeError> {
    let (_, quotes) = only_entry(v, "")?;
    let (_, price) = only_entry(quotes, "")?;
    price
        .as_f64()
        .map(Fact::Number)
        .ok_or_else(|| ShapeError::new("price is not a number"))
}

pub(crate) fn frankfurter_rate(v: &Value) -> Result<Fact, ShapeError> {
    let rates = field(v, "/rates")?;
    let (_, rate) = only_entry(rates, "")?;
    rate.as_f64()
        .map(Fact::Number)
        .ok_or_else(|| ShapeError::new("rate is not a number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coingecko_unknown_coin_is_shape_error() {
        assert_eq!(
            coingecko_price(&json!({"bitcoin": {"usd": 64000.5}})).unwrap(),
            Fact::Number(64000.5)
        );
        assert!(coingecko_price(&json!({})).unwrap_err().0.contains("was empty"));
    }

    #[test]
    fn frankfurter_single_rate() {
        let body = json!({"amount": 1.0, "base": "USD", "date": "2024-05-01", "rates": {"EUR": 0.93}});
        assert_eq!(frankfurter_rate(&body).unwrap(), Fact::Number(0.93));
    }
}
