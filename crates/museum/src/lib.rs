#![deny(rust_2018_idioms)]
#![deny(clippy::all)]
#![allow(clippy::module_inception)]

pub mod build;
pub mod cmark;
pub mod config;
pub mod date;
pub mod gallery;
pub mod load;
pub mod model;
pub mod progress;
pub mod route;
pub mod tracker;

pub mod error {
    pub use anyhow::{Error, Result};
}
