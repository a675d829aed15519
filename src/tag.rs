// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Element names of the project description dialect.

pub(crate) const PROJECT_DESCRIPTION: &str = "projectDescription";
pub(crate) const NAME: &str = "name";
pub(crate) const COMMENT: &str = "comment";
pub(crate) const PROJECTS: &str = "projects";
pub(crate) const PROJECT: &str = "project";
pub(crate) const BUILD_SPEC: &str = "buildSpec";
pub(crate) const BUILD_COMMAND: &str = "buildCommand";
pub(crate) const ARGUMENTS: &str = "arguments";
pub(crate) const DICTIONARY: &str = "dictionary";
pub(crate) const KEY: &str = "key";
pub(crate) const VALUE: &str = "value";
pub(crate) const NATURES: &str = "natures";
pub(crate) const NATURE: &str = "nature";
pub(crate) const LINKED_RESOURCES: &str = "linkedResources";
pub(crate) const LINK: &str = "link";
pub(crate) const TYPE: &str = "type";
pub(crate) const LOCATION: &str = "location";
pub(crate) const LOCATION_URI: &str = "locationURI";
pub(crate) const FILTERED_RESOURCES: &str = "filteredResources";
pub(crate) const FILTER: &str = "filter";
pub(crate) const ID: &str = "id";
pub(crate) const MATCHER: &str = "matcher";
