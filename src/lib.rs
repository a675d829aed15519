// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Read and write `.project` project descriptions.
//!
//! A __project description__ names a project, lists the projects it refers
//! to, the builders that run over it with their arguments, the natures
//! attached to it, the resources linked in from outside of its default
//! storage location, and the filters that hide resources from it.
//!
//! Reading is best-effort: broken entries are dropped or kept in degraded
//! form, while the rest of the description survives. Only a root element other
//! than `<projectDescription>` makes a read come back empty. Writing is
//! deterministic: the same description always produces the same bytes for a
//! given line separator.
//!
//! ```no_run
//! use dotproject::{read, write};
//! use std::fs::File;
//!
//! let description = read(File::open(".project")?)?.unwrap_or_default();
//! write(&description, File::create(".project")?, "\n")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod location;
pub mod model;
pub mod path;
pub mod reader;
pub mod writer;

mod tag;

#[doc(inline)]
pub use crate::{
    config::{CodecConfig, LineSeparator},
    model::{
        BuildCommand, FilterDescription, FilterMatcher, LinkDescription, ProjectDescription,
        ResourceType,
    },
    reader::{read, ProjectDescriptionReader, ReadError, ReadProblem},
    writer::{write, ProjectDescriptionWriter, WriteError},
};
