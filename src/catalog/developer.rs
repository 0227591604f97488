// src/catalog/developer.rs
use serde_json::Value;

use crate::fetch::error::ShapeError;
use crate::fetch::extract::{first, number, text, text_or};
use crate::fetch::types::{EndpointDescriptor, Fact};

pub fn entries() -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor::text("public_ip", "https://api.ipify.org", public_ip)
            .summary("Caller's public IP address (ipify, plain text)"),
        EndpointDescriptor::json(
            "github_user",
            "https://api.github.com/users/{username}",
            github_user,
        )
        .summary("Public profile summary of a GitHub user")
        .with_header("Accept", "application/vnd.github+json"),
        EndpointDescriptor::json("random_user", "https://randomuser.me/api/", random_user)
            .summary("Randomly generated user profile (randomuser.me)"),
        EndpointDescriptor::json("age_guess", "https://api.agify.io?name={name}", agify)
            .summary("Estimated age for a first name (agify.io)"),
    ]
}

pub(crate) fn public_ip(body: &str) -> Result<Fact, ShapeError> {
    let ip = body.trim();
    ip.parse::<std::net::IpAddr>()
        .map_err(|_| ShapeError::new(format!("not an IP address: `{ip}`")))?;
    Ok(Fact::text(ip))
}

pub(crate) fn github_user(v: &Value) -> Result<Fact, ShapeError> {
    let login = text(v, "/login")?;
    Ok(Fact::record([
        ("name", Fact::Text(text_or(v, "/name", &login))),
        ("public_repos", Fact::Number(number(v, "/public_repos")?)),
        ("followers", Fact::Number(number(v, "/followers")?)),
        ("login", Fact::Text(login)),
    ]))
}

pub(crate) fn random_user(v: &Value) -> Result<Fact, ShapeError> {
    let u = first(v, "/results")?;
    let name = format!("{} {}", text(u, "/name/first")?, text(u, "/name/last")?);
    Ok(Fact::record([
        ("name", Fact::Text(name)),
        ("email", Fact::Text(text(u, "/email")?)),
        ("country", Fact::Text(text_or(u, "/location/country", "unknown"))),
    ]))
}

/// agify returns `"age": null` for names it has never seen.
pub(crate) fn agify(v: &Value) -> Result<Fact, ShapeError> {
    number(v, "/age")
        .map(Fact::Number)
        .map_err(|_| ShapeError::new("no age estimate for this name"))
}
