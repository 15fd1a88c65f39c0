// A tiny error type so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Updating the window buffer failed
    Asset(String),        // Loading/decoding an image asset failed
    MaskSize(String),     // Original and mask images differ in size
    Deck(String),         // Quiz deck is empty, unreadable or malformed
    Config(String),       // Environment/config value could not be parsed
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::Asset(s) => write!(f, "Asset error: {s}"),
            Error::MaskSize(s) => write!(f, "Mask size error: {s}"),
            Error::Deck(s) => write!(f, "Deck error: {s}"),
            Error::Config(s) => write!(f, "Config error: {s}"),
        }
    }
}

// main() returns Result<(), Error>, so the process prints it via Debug/Display.
impl std::error::Error for Error {}
