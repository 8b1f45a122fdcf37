use thiserror::Error;

/// Failure of a single extraction call.
///
/// Either the catalog fetch failed or a record carries a `regex:` alias that
/// does not compile. There are no partial results in either case.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid regex alias '{alias}': {source}")]
    InvalidPattern {
        alias: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to fetch {kind} from catalog: {source}")]
    Fetch {
        kind: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
