//! The raw URL query of an announce request.
//!
//! Unlike a regular query parser it keeps the original text of every
//! parameter, so a single value can be replaced without touching the rest of
//! the query: the order of the parameters, unknown parameters and their
//! percent-encoding are kept byte for byte.
use std::str::FromStr;

/// A URL query split in its `&`-separated parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw_params: Vec<String>,
}

impl Query {
    /// Returns the raw value of the first parameter named `name`. Parameters
    /// without `=` have an empty value.
    ///
    /// ```rust
    /// use greedy_proxy::servers::proxy::v1::query::Query;
    ///
    /// let query = "left=0&uploaded=5&uploaded=6".parse::<Query>().unwrap();
    ///
    /// assert_eq!(query.get_param("uploaded"), Some("5"));
    /// assert_eq!(query.get_param("downloaded"), None);
    /// ```
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.raw_params
            .iter()
            .map(|raw_param| split_param(raw_param))
            .find(|(param_name, _)| *param_name == name)
            .map(|(_, value)| value)
    }

    /// Returns the query with the value of the first parameter named `name`
    /// replaced. The query is returned unchanged if there is no such
    /// parameter.
    #[must_use]
    pub fn with_replaced_param(&self, name: &str, value: &str) -> String {
        let mut replaced = false;

        self.raw_params
            .iter()
            .map(|raw_param| {
                if !replaced && split_param(raw_param).0 == name {
                    replaced = true;
                    format!("{name}={value}")
                } else {
                    raw_param.clone()
                }
            })
            .collect::<Vec<String>>()
            .join("&")
    }
}

impl From<&str> for Query {
    fn from(raw_query: &str) -> Self {
        let raw_params = raw_query.split('&').map(ToOwned::to_owned).collect();

        Self { raw_params }
    }
}

impl FromStr for Query {
    type Err = std::convert::Infallible;

    fn from_str(raw_query: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(raw_query))
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw_params.join("&"))
    }
}

fn split_param(raw_param: &str) -> (&str, &str) {
    raw_param.split_once('=').unwrap_or((raw_param, ""))
}
