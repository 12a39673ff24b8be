//! # Errors
//! Errors emitted by ``sunrot_core``.
//!
//! All failures in this crate are programmer or input errors, they are raised at
//! the point where they are detected and are never retried.
//!
// BSD 3-Clause License
//
// Copyright (c) 2026, The sunrot developers
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use std::{error, fmt, sync::PoisonError};

/// Result type used throughout ``sunrot_core``.
pub type SunrotResult<T> = Result<T, Error>;

/// Possible errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A rotated frame was constructed without a base frame.
    MissingBase(String),

    /// The provided frame is not a member of the supported base frame family.
    InvalidBase(String),

    /// A frame which requires an observation time does not have one.
    MissingObstime(String),

    /// The requested differential rotation model is not registered.
    UnknownModel(String),

    /// Input value was not valid.
    ValueError(String),

    /// No path exists in the transform graph between two frames.
    NoTransform(String),

    /// A global registry lock was poisoned by a panicking writer.
    LockPoisoned(String),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBase(s)
            | Self::InvalidBase(s)
            | Self::MissingObstime(s)
            | Self::UnknownModel(s)
            | Self::ValueError(s)
            | Self::NoTransform(s)
            | Self::LockPoisoned(s) => {
                write!(f, "{s}")
            }
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::ValueError(error.to_string())
    }
}

impl<T> From<PoisonError<T>> for Error {
    fn from(error: PoisonError<T>) -> Self {
        Self::LockPoisoned(error.to_string())
    }
}
