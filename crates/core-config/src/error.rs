use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("Failed to fetch remote configuration: {source}"))]
    Fetch { source: reqwest::Error },

    #[snafu(display("Remote configuration endpoint {url} returned status {status}"))]
    Status { url: String, status: u16 },

    #[snafu(display("Remote configuration has no key {key}"))]
    MissingKey { key: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
