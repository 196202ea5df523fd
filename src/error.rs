#[cfg(target_os = "windows")]
use windows::core::Error as WinError;

/*
 * Errors raised inside the chrome layer.
 *
 * None of these reach the host as a panic: the controller logs them and keeps
 * going, so the worst visible outcome is a window without custom chrome.
 */
#[derive(Debug, Clone)]
pub enum ChromeError {
    /// A bridge or handle operation was attempted outside the installed phase.
    NotInstalled(String),
    /// No native decoration bridge exists for this OS or architecture.
    UnsupportedPlatform(String),
    /// A property change carried a payload of the wrong kind.
    InvalidPropertyValue(String),
    /// Text in a color value field could not be parsed or is out of range.
    InvalidFormat(String),
    /// A requested operation could not be completed.
    OperationFailed(String),
    /// An error originating from the Windows API.
    #[cfg(target_os = "windows")]
    Win32(WinError),
}

#[cfg(target_os = "windows")]
impl From<WinError> for ChromeError {
    fn from(err: WinError) -> Self {
        ChromeError::Win32(err)
    }
}

impl std::fmt::Display for ChromeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChromeError::NotInstalled(s) => write!(f, "Not Installed: {s}"),
            ChromeError::UnsupportedPlatform(s) => write!(f, "Unsupported Platform: {s}"),
            ChromeError::InvalidPropertyValue(s) => write!(f, "Invalid Property Value: {s}"),
            ChromeError::InvalidFormat(s) => write!(f, "Invalid Format: {s}"),
            ChromeError::OperationFailed(s) => write!(f, "Operation Failed: {s}"),
            #[cfg(target_os = "windows")]
            ChromeError::Win32(e) => write!(f, "Win32 Error: {e}"),
        }
    }
}

impl std::error::Error for ChromeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(target_os = "windows")]
            ChromeError::Win32(e) => Some(e),
            _ => None,
        }
    }
}

/// A specialized `Result` type for chrome operations.
pub type Result<T> = std::result::Result<T, ChromeError>;
