use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Not a valid URL: `{0}`")]
    UrlParse(String, #[source] url::ParseError),
}
