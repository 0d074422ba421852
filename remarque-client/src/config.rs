use std::str::FromStr;

/// Where new comments are written
///
/// Listing, editing and deleting always go through the comment endpoint, but
/// creation can either go there too or straight to the store.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum InsertRoute {
    #[default]
    DirectToStore,
    ViaEndpoint,
}

impl FromStr for InsertRoute {
    type Err = String;

    fn from_str(s: &str) -> Result<InsertRoute, String> {
        match &s.to_ascii_lowercase() as &str {
            "store" | "direct" => Ok(InsertRoute::DirectToStore),
            "endpoint" | "api" => Ok(InsertRoute::ViaEndpoint),
            _ => Err(format!("unknown insert route {s:?}")),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Full url of the comment endpoint, also used as the cache key
    pub endpoint_url: String,

    /// Base url of the store
    pub store_url: String,

    /// Access key sent to the store
    pub store_key: String,

    /// Name attached to every new comment
    pub username: String,

    pub insert_route: InsertRoute,
}

pub const ENV_ENDPOINT_URL: &str = "REMARQUE_ENDPOINT_URL";
pub const ENV_STORE_URL: &str = "REMARQUE_STORE_URL";
pub const ENV_STORE_KEY: &str = "REMARQUE_STORE_KEY";
pub const ENV_USERNAME: &str = "REMARQUE_USERNAME";
pub const ENV_INSERT_ROUTE: &str = "REMARQUE_INSERT_ROUTE";

impl Config {
    pub const DEFAULT_USERNAME: &'static str = "cp@email.com";

    pub fn from_env() -> Config {
        Config::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a configuration out of named values
    ///
    /// Missing values never fail: urls and keys become empty strings, and any
    /// request made with them fails when it is sent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Config {
        let insert_route = match lookup(ENV_INSERT_ROUTE) {
            None => InsertRoute::default(),
            Some(r) => r.parse().unwrap_or_else(|err| {
                tracing::warn!(%err, "falling back to the default insert route");
                InsertRoute::default()
            }),
        };
        Config {
            endpoint_url: lookup(ENV_ENDPOINT_URL).unwrap_or_default(),
            store_url: lookup(ENV_STORE_URL).unwrap_or_default(),
            store_key: lookup(ENV_STORE_KEY).unwrap_or_default(),
            username: lookup(ENV_USERNAME)
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| String::from(Config::DEFAULT_USERNAME)),
            insert_route,
        }
    }

    pub fn list_key(&self) -> &str {
        &self.endpoint_url
    }
}
