use thiserror::Error;

/// Configuration errors. Runtime conditions (detached anchors, scroll races,
/// rapid open/close) are absorbed by the controller and never surface here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OverlayError {
    #[error("unknown placement `{0}`; expected `<side>` or `<side>-<alignment>`, e.g. `bottom-start`")]
    UnknownPlacement(String),

    #[error("unknown placement side `{0}`; expected one of top, right, bottom, left")]
    UnknownSide(String),

    #[error("unknown placement alignment `{0}`; expected one of start, center, end")]
    UnknownAlignment(String),
}
