// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Project description layout.
//!
//! In-memory form of a `.project` file. Every project carries a
//! __project description__ that names the project, lists the projects it
//! references, the builders that run over it, the natures attached to it, and
//! any resources that live outside of the project's default storage location.
//!
//! The types here only hold data. Turning them into XML and back is the job of
//! the [`reader`](crate::reader) and [`writer`](crate::writer) modules.

use indexmap::IndexMap;
use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};
use url::Url;

/// Project description.
///
/// # General Layout
///
/// A project description is made of a name, a free form comment, references
/// to other projects, an ordered build specification, nature identifiers,
/// linked resources, and resource filters. The location of the description is
/// known to the caller only, and is never written out with the rest of the
/// fields.
///
/// # Invariants
///
/// - Comment is never absent. An empty comment is an empty string.
/// - Linked resources are keyed by their project-relative path, so iteration
///   order is always path order. The map is only reachable through
///   [`ProjectDescription::set_link`] and friends, so a key always equals the
///   path of the link stored under it.
///
/// # Round Trips
///
/// Writing a description and reading it back yields an equal description,
/// apart from these normalizations:
///
/// - An absent argument value reads back as an empty string.
/// - Leading and trailing whitespace of every text value is trimmed, e.g., a
///   comment of `"  padded\r\n"` reads back as `"padded"`.
/// - A blank name reads back as absent.
/// - The location is never written, so it reads back as absent.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct ProjectDescription {
    /// Name of the project, unique within a workspace.
    pub name: Option<String>,

    /// Free form comment about the project.
    pub comment: String,

    /// Location of the description file itself.
    pub location: Option<Url>,

    /// Names of referenced projects in listing order.
    pub referenced_projects: Vec<String>,

    /// Nature identifiers in listing order.
    pub nature_ids: Vec<String>,

    /// Ordered build specification.
    pub build_spec: Vec<BuildCommand>,

    links: BTreeMap<String, LinkDescription>,

    /// Resource filters passed through untouched.
    pub filters: Vec<FilterDescription>,
}

impl ProjectDescription {
    /// Construct new empty project description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct new project description with a name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Add or replace linked resource at its project-relative path.
    ///
    /// Returns the link that was previously stored at the same path, if any.
    pub fn set_link(&mut self, link: LinkDescription) -> Option<LinkDescription> {
        self.links.insert(link.path.clone(), link)
    }

    /// Remove linked resource at project-relative path.
    pub fn remove_link(&mut self, path: impl AsRef<str>) -> Option<LinkDescription> {
        self.links.remove(path.as_ref())
    }

    /// Linked resource at project-relative path.
    pub fn link(&self, path: impl AsRef<str>) -> Option<&LinkDescription> {
        self.links.get(path.as_ref())
    }

    /// Iterate over linked resources in path order.
    pub fn links(&self) -> impl ExactSizeIterator<Item = &LinkDescription> + '_ {
        self.links.values()
    }

    /// Check if any linked resource is stored.
    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    /// Location of linked resource at project-relative path.
    pub fn link_location(&self, path: impl AsRef<str>) -> Option<&Url> {
        self.links.get(path.as_ref()).map(|link| &link.location)
    }

    /// Check if description carries any usable data.
    ///
    /// The location is not considered, because it never comes from the
    /// serialized form.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.comment.is_empty()
            && self.referenced_projects.is_empty()
            && self.nature_ids.is_empty()
            && self.build_spec.is_empty()
            && self.links.is_empty()
            && self.filters.is_empty()
    }
}

/// Named build step with string keyed arguments.
///
/// Arguments keep their insertion order. Values may be absent, which is
/// written out as an empty value.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct BuildCommand {
    /// Identifier of the builder to run.
    pub builder_name: String,

    /// Builder arguments in insertion order.
    pub arguments: IndexMap<String, Option<String>>,
}

impl BuildCommand {
    /// Construct new build command without arguments.
    pub fn new(builder_name: impl Into<String>) -> Self {
        Self {
            builder_name: builder_name.into(),
            arguments: IndexMap::new(),
        }
    }

    /// Append argument, consuming and returning the command.
    pub fn with_argument(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
        self.set_argument(key, value);
        self
    }

    /// Set argument value.
    ///
    /// Replacing the value of an existing key keeps the key's position.
    pub fn set_argument(&mut self, key: impl Into<String>, value: Option<&str>) {
        self.arguments.insert(key.into(), value.map(str::to_owned));
    }

    /// Value of argument, flattening absent values to [`None`].
    pub fn argument(&self, key: impl AsRef<str>) -> Option<&str> {
        self.arguments.get(key.as_ref()).and_then(Option::as_deref)
    }
}

/// Linked resource.
///
/// A project member whose content lives outside of the project's default
/// storage location.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LinkDescription {
    /// Project-relative path of the member.
    pub path: String,

    /// Kind of resource, absent if the stored type code could not be parsed.
    pub resource_type: Option<ResourceType>,

    /// Absolute location of the linked content.
    pub location: Url,
}

impl LinkDescription {
    /// Construct new linked resource description.
    pub fn new(path: impl Into<String>, resource_type: ResourceType, location: Url) -> Self {
        Self {
            path: path.into(),
            resource_type: Some(resource_type),
            location,
        }
    }
}

/// Kind of linked resource.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ResourceType {
    File,
    Folder,
}

impl ResourceType {
    /// Integer code used in the serialized form.
    pub fn code(self) -> u32 {
        match self {
            Self::File => 1,
            Self::Folder => 2,
        }
    }

    /// Map integer code back to resource type.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::File),
            2 => Some(Self::Folder),
            _ => None,
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::File => fmt.write_str("file"),
            Self::Folder => fmt.write_str("folder"),
        }
    }
}

/// Resource filter.
///
/// Declarative rule limiting which file system entries show up as project
/// members. Filters are carried through reads and writes verbatim, nothing in
/// here interprets them.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct FilterDescription {
    /// Filter identifier.
    pub id: String,

    /// Project-relative path the filter applies to, empty for project root.
    pub name: String,

    /// Filter type flags as stored.
    pub filter_type: String,

    /// Matcher that decides which entries the filter applies to.
    pub matcher: Option<FilterMatcher>,
}

/// Matcher of a resource filter.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct FilterMatcher {
    /// Matcher identifier.
    pub id: String,

    /// Matcher arguments as stored.
    pub arguments: String,
}
