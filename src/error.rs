#![warn(missing_docs)]
//! PARAX specific error structures
use std::{error::Error, fmt::Display};

/// PARAX application specific Result type
pub type ParaxResult<T> = std::result::Result<T, ParaxError>;

/// Errors that can be returned by various PARAX functions.
#[derive(Debug, PartialEq, Eq)]
pub enum ParaxError {
    /// error while constructing an optical element (non-physical parameters)
    Element(String),
    /// error while building or applying an [`OpticsSystem`](crate::system::OpticsSystem)
    System(String),
    /// error while generating a ray bundle from a source
    Source(String),
    /// malformed color specification (hex strings, RGB components)
    Color(String),
    /// error while rendering a plot or sensor image
    Plot(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for ParaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Element(m) => {
                write!(f, "Element:{m}")
            }
            Self::System(m) => {
                write!(f, "System:{m}")
            }
            Self::Source(m) => {
                write!(f, "Source:{m}")
            }
            Self::Color(m) => {
                write!(f, "Color:{m}")
            }
            Self::Plot(m) => {
                write!(f, "Plot:{m}")
            }
            Self::Other(m) => write!(f, "Parax Error:Other:{m}"),
        }
    }
}
impl Error for ParaxError {}

impl std::convert::From<String> for ParaxError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn from() {
        let error = ParaxError::from("test".to_string());
        assert_eq!(error, ParaxError::Other("test".to_string()));
    }
    #[test]
    fn display() {
        assert_eq!(
            format!("{}", ParaxError::Element("test".to_string())),
            "Element:test"
        );
        assert_eq!(
            format!("{}", ParaxError::System("test".to_string())),
            "System:test"
        );
        assert_eq!(
            format!("{}", ParaxError::Source("test".to_string())),
            "Source:test"
        );
        assert_eq!(
            format!("{}", ParaxError::Color("test".to_string())),
            "Color:test"
        );
        assert_eq!(
            format!("{}", ParaxError::Plot("test".to_string())),
            "Plot:test"
        );
        assert_eq!(
            format!("{}", ParaxError::Other("test".to_string())),
            "Parax Error:Other:test"
        );
    }
    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", ParaxError::Element("test".to_string())),
            "Element(\"test\")"
        );
    }
}
