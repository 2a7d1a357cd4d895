//! Documentation model builder for Gherkin feature files.
//!
//! This crate turns a parsed `.feature` document into a model meant for
//! documentation rendering. On top of a plain copy of the parse tree it adds
//! keyword categories, scenario slugs, comments attached to the steps they
//! describe, and classification tags derived from reference numbers written
//! in those comments.
//!
//! # Overview
//!
//! - [`source`] parses feature text with the `gherkin` crate and recovers the
//!   comments that parser drops.
//! - [`assembler`] runs the single assembly pass over a parsed [`ast::Document`].
//! - [`config`] holds tag hiding, tag exclusion and the comment mode.
//! - [`model`] is the resulting documentation model.
//!
//! # Configuration
//!
//! [`config::Configuration::from_env`] reads:
//!
//! - `FEATUREDOC_HIDE_TAGS`: tags removed from visible output
//! - `FEATUREDOC_EXCLUDE_TAGS`: tags that suppress scenarios or features
//! - `FEATUREDOC_KEEP_COMMENTS`: keep comments for rendering
//! - `FEATUREDOC_COMMENT_PARSING`: `RCIS.CIMax` derives tags from comments
//! - `FEATUREDOC_LOG_LEVEL`: verbosity for [`logging::init_logging`]
//!
//! # Example
//!
//! ```
//! use featuredoc::assembler::FeatureAssembler;
//! use featuredoc::config::{CommentMode, Configuration};
//! use featuredoc::source::assemble_source;
//!
//! let text = "\
//! Feature: Ordering
//!   #24.01.00 RI:102069-03 (B-12010) enter specflow
//!   Scenario: Place an order
//!     Given a basket
//!     Then the order is placed
//! ";
//! let assembler = FeatureAssembler::new(
//!     Configuration::default().with_comment_mode(CommentMode::DeriveTags),
//! );
//! let feature = assemble_source(text, &assembler)
//!     .expect("valid feature")
//!     .expect("not excluded");
//! let scenario = feature.element("Place an order").expect("scenario");
//! assert_eq!(scenario.tags(), ["@T_102069_03", "@B_12010"]);
//! ```

pub mod assembler;
pub mod ast;
pub mod comments;
pub mod config;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod model;
pub mod source;

pub use assembler::FeatureAssembler;
pub use config::{CommentMode, Configuration, TagSet};
pub use error::{ConfigError, MapError, SourceError};
pub use model::{Feature, FeatureElement};
