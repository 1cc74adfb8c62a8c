// Copyright 2025 HelixDB Inc.
// SPDX-License-Identifier: AGPL-3.0

pub mod error;
pub mod request;
pub mod value;

pub use error::GremlinError;
pub use request::RenderedQuery;
pub use value::Value;
