//! Model configuration.
//!
//! ```ignore
//! use flexuml::config::{DependencyOption, ModelConfig};
//!
//! let config = ModelConfig::default()
//!     .with_dependencies(true)
//!     .with_option(DependencyOption::SelfReferences, true);
//! ```

use crate::symbols::SearchScope;

/// One filter toggle for dependency edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DependencyOption {
    /// A class depending on itself.
    SelfReferences,
    OneToOne,
    OneToMany,
    /// Plain usages.
    Usages,
    /// Object creation.
    Creation,
}

impl DependencyOption {
    pub const ALL: [DependencyOption; 5] = [
        Self::SelfReferences,
        Self::OneToOne,
        Self::OneToMany,
        Self::Usages,
        Self::Creation,
    ];
}

/// The set of enabled dependency filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DependencyOptions {
    pub self_references: bool,
    pub one_to_one: bool,
    pub one_to_many: bool,
    pub usages: bool,
    pub creation: bool,
}

impl Default for DependencyOptions {
    /// Everything except self-references.
    fn default() -> Self {
        Self {
            self_references: false,
            one_to_one: true,
            one_to_many: true,
            usages: true,
            creation: true,
        }
    }
}

impl DependencyOptions {
    /// Every option enabled.
    pub fn all() -> Self {
        Self {
            self_references: true,
            one_to_one: true,
            one_to_many: true,
            usages: true,
            creation: true,
        }
    }

    /// Every option disabled.
    pub fn none() -> Self {
        Self {
            self_references: false,
            one_to_one: false,
            one_to_many: false,
            usages: false,
            creation: false,
        }
    }

    pub fn contains(&self, option: DependencyOption) -> bool {
        match option {
            DependencyOption::SelfReferences => self.self_references,
            DependencyOption::OneToOne => self.one_to_one,
            DependencyOption::OneToMany => self.one_to_many,
            DependencyOption::Usages => self.usages,
            DependencyOption::Creation => self.creation,
        }
    }

    pub fn set(&mut self, option: DependencyOption, enabled: bool) {
        let slot = match option {
            DependencyOption::SelfReferences => &mut self.self_references,
            DependencyOption::OneToOne => &mut self.one_to_one,
            DependencyOption::OneToMany => &mut self.one_to_many,
            DependencyOption::Usages => &mut self.usages,
            DependencyOption::Creation => &mut self.creation,
        };
        *slot = enabled;
    }

    pub fn with(mut self, option: DependencyOption, enabled: bool) -> Self {
        self.set(option, enabled);
        self
    }

    /// The enabled options, in declaration order.
    pub fn enabled(&self) -> Vec<DependencyOption> {
        DependencyOption::ALL
            .into_iter()
            .filter(|option| self.contains(*option))
            .collect()
    }
}

/// Configuration for a [`UmlDataModel`](crate::model::UmlDataModel).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModelConfig {
    /// Scope for every index query and resolution.
    pub scope: SearchScope,
    /// Whether dependency edges are computed and shown.
    pub show_dependencies: bool,
    /// Filters applied to dependency edges.
    pub dependency_options: DependencyOptions,
}

impl ModelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_dependencies(mut self, show: bool) -> Self {
        self.show_dependencies = show;
        self
    }

    pub fn with_dependency_options(mut self, options: DependencyOptions) -> Self {
        self.dependency_options = options;
        self
    }

    pub fn with_option(mut self, option: DependencyOption, enabled: bool) -> Self {
        self.dependency_options.set(option, enabled);
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, crate::error::UmlError> {
        Ok(serde_json::from_str(json)?)
    }
}
