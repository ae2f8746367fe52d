// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

mod charwithposition;
mod emitter;
mod escape;
mod location;
mod peekableiter;
mod printer;

pub mod ast;
pub mod compiler;
pub mod error;
pub mod host;
pub mod modifier;
pub mod xsd;

pub use compiler::{compile, parse, CompiledPattern};
pub use error::{ErrorKind, RegexError};
pub use escape::RangeSet;
pub use host::HostRegex;
pub use location::Location;
pub use modifier::Flags;
