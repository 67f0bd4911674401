// MViewer -- Interactive image viewing engine built with Rust, glib and cairo
//
// Copyright (c) 2024-2025 Martin van der Werff <github (at) newinnovations.nl>
//
// This file is part of MViewer.
//
// MViewer is free software: you can redistribute it and/or modify it under the terms of
// the GNU Affero General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR
// IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND
// FITNESS FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY
// DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT
// LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR
// BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
// STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use thiserror::Error;

pub type ViewerResult<T> = std::result::Result<T, ViewerError>;

#[derive(Debug, Error)]
pub enum ViewerError {
    /// A parameter string attached to an action could not be used.
    #[error("Invalid {what}: \"{value}\"")]
    InvalidParameter { what: &'static str, value: String },

    #[error("Unknown action: \"{0}\"")]
    UnknownAction(String),

    #[error("Invalid color: \"{0}\"")]
    InvalidColor(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Cairo(#[from] cairo::Error),

    #[error(transparent)]
    CairoIo(#[from] cairo::IoError),

    #[error("{0}")]
    Other(String),
}

impl ViewerError {
    pub fn invalid(what: &'static str, value: &str) -> Self {
        ViewerError::InvalidParameter {
            what,
            value: value.to_string(),
        }
    }
}

impl From<&str> for ViewerError {
    fn from(message: &str) -> Self {
        ViewerError::Other(message.to_string())
    }
}

impl From<String> for ViewerError {
    fn from(message: String) -> Self {
        ViewerError::Other(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let error = ViewerError::invalid("move step", "abc");
        assert_eq!(error.to_string(), "Invalid move step: \"abc\"");
    }

    #[test]
    fn test_from_str() {
        let error: ViewerError = "frame list is empty".into();
        assert!(matches!(error, ViewerError::Other(_)));
        assert_eq!(error.to_string(), "frame list is empty");
    }
}
