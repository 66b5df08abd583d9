//! The parameter catalog: which operations exist, which axes they take, and
//! how display labels map to wire values.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use hashdash_types::{DashboardError, IndexKind, Operation, ParameterAxis, ResolverId, SelectedArgument, Selection};
use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{CATALOG_PATH_ENV, DashboardConfig};

/// Catalog shipped with the binary.
const EMBEDDED_CATALOG: &str = include_str!("../catalog/hashrateindex.yaml");

/// Reasons a catalog document is rejected at load time.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog defines no operations")]
    Empty,
    #[error("operation '{0}' is defined more than once")]
    DuplicateOperation(String),
    #[error("operation '{operation}' has an empty api_method")]
    MissingApiMethod { operation: String },
    #[error("operation '{operation}' references unknown resolver '{resolver}'")]
    UnknownResolver { operation: String, resolver: String },
    #[error("operation '{operation}' declares axis '{axis}' more than once")]
    DuplicateAxis { operation: String, axis: String },
    #[error("axis '{axis}' of operation '{operation}' has no choices")]
    EmptyAxis { operation: String, axis: String },
    #[error("axis '{axis}' of operation '{operation}' repeats label '{label}'")]
    DuplicateLabel { operation: String, axis: String, label: String },
    #[error("axis '{axis}' of operation '{operation}' repeats wire value '{value}'")]
    DuplicateValue { operation: String, axis: String, value: String },
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    operations: Vec<OperationEntry>,
}

/// Operation as written in the catalog file, before validation.
#[derive(Debug, Deserialize)]
struct OperationEntry {
    name: String,
    api_method: String,
    resolver: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    index: IndexKind,
    #[serde(default)]
    axes: Vec<ParameterAxis>,
}

impl OperationEntry {
    fn into_operation(self) -> Result<Operation, CatalogError> {
        let resolver = self
            .resolver
            .parse::<ResolverId>()
            .map_err(|_| CatalogError::UnknownResolver {
                operation: self.name.clone(),
                resolver: self.resolver.clone(),
            })?;
        Ok(Operation {
            name: self.name,
            api_method: self.api_method,
            resolver,
            description: self.description,
            index: self.index,
            axes: self.axes,
        })
    }
}

/// Immutable, validated set of operations in menu order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterCatalog {
    operations: IndexMap<String, Operation>,
}

impl ParameterCatalog {
    /// Loads the catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_yaml_str(EMBEDDED_CATALOG)
    }

    /// Loads the catalog honoring, in order: an explicit path, the
    /// `HASHDASH_CATALOG_PATH` environment variable, the configured
    /// `catalog_path`, and finally the embedded catalog.
    pub fn load(config: &DashboardConfig, explicit_path: Option<&Path>) -> Result<Self, CatalogError> {
        let env_path = std::env::var(CATALOG_PATH_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(|value| hashdash_util::expand_tilde(&value));
        let path = explicit_path
            .map(Path::to_path_buf)
            .or(env_path)
            .or_else(|| config.catalog_path.clone());

        match path {
            Some(path) => {
                info!(path = %path.display(), "loading catalog override");
                Self::from_path(&path)
            }
            None => Self::embedded(),
        }
    }

    /// Reads a catalog file; `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        if is_json { Self::from_json_str(&content) } else { Self::from_yaml_str(&content) }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_yaml::from_str(content)?;
        Self::from_document(document)
    }

    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(content)?;
        Self::from_document(document)
    }

    fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        let operations = document
            .operations
            .into_iter()
            .map(OperationEntry::into_operation)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_operations(operations)
    }

    /// Validates and indexes operations, keeping their order.
    pub fn from_operations(operations: Vec<Operation>) -> Result<Self, CatalogError> {
        if operations.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut indexed = IndexMap::with_capacity(operations.len());
        for operation in operations {
            validate_operation(&operation)?;
            if indexed.contains_key(&operation.name) {
                return Err(CatalogError::DuplicateOperation(operation.name));
            }
            indexed.insert(operation.name.clone(), operation);
        }
        debug!(operation_count = indexed.len(), "catalog validated");
        Ok(Self { operations: indexed })
    }

    /// Operation names in registration order.
    pub fn list_operations(&self) -> Vec<&str> {
        self.operations.keys().map(String::as_str).collect()
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn get_operation(&self, name: &str) -> Result<&Operation, DashboardError> {
        self.operations
            .get(name)
            .ok_or_else(|| DashboardError::not_found("operation", name))
    }

    /// Maps a display label to its wire value for one axis of an operation.
    pub fn resolve_axis_value(&self, operation: &str, axis: &str, label: &str) -> Result<&str, DashboardError> {
        let operation = self.get_operation(operation)?;
        let axis_spec = operation
            .axis(axis)
            .ok_or_else(|| DashboardError::not_found("axis", format!("{} / {}", operation.name, axis)))?;
        axis_spec
            .wire_value(label)
            .ok_or_else(|| DashboardError::not_found("choice", format!("{} / {} / {}", operation.name, axis, label)))
    }

    /// Builds the immutable [`Selection`] for one fetch.
    ///
    /// `labels` pairs axis names with display labels. Every axis of the
    /// operation needs a label, and every label must belong to one of its
    /// axes.
    pub fn resolve_selection(&self, operation: &str, labels: &[(&str, &str)]) -> Result<Selection, DashboardError> {
        let operation = self.get_operation(operation)?;

        if let Some((unknown_axis, _)) = labels.iter().find(|(axis, _)| !operation.has_axis(axis)) {
            return Err(DashboardError::not_found("axis", format!("{} / {}", operation.name, unknown_axis)));
        }

        let mut arguments = Vec::with_capacity(operation.axes.len());
        for axis in &operation.axes {
            let (_, label) = labels
                .iter()
                .find(|(name, _)| *name == axis.name)
                .ok_or_else(|| DashboardError::not_found("value for axis", format!("{} / {}", operation.name, axis.name)))?;
            let value = self.resolve_axis_value(&operation.name, &axis.name, label)?;
            arguments.push(SelectedArgument {
                axis: axis.name.clone(),
                label: (*label).to_string(),
                value: value.to_string(),
            });
        }
        Ok(Selection::new(operation.clone(), arguments))
    }
}

fn validate_operation(operation: &Operation) -> Result<(), CatalogError> {
    if operation.api_method.trim().is_empty() {
        return Err(CatalogError::MissingApiMethod {
            operation: operation.name.clone(),
        });
    }

    let mut axis_names = HashSet::new();
    for axis in &operation.axes {
        if !axis_names.insert(axis.name.as_str()) {
            return Err(CatalogError::DuplicateAxis {
                operation: operation.name.clone(),
                axis: axis.name.clone(),
            });
        }
        validate_axis(&operation.name, axis)?;
    }
    Ok(())
}

fn validate_axis(operation: &str, axis: &ParameterAxis) -> Result<(), CatalogError> {
    if axis.choices.is_empty() {
        return Err(CatalogError::EmptyAxis {
            operation: operation.to_string(),
            axis: axis.name.clone(),
        });
    }
    let mut labels = HashSet::new();
    let mut values = HashSet::new();
    for choice in &axis.choices {
        if !labels.insert(choice.label.as_str()) {
            return Err(CatalogError::DuplicateLabel {
                operation: operation.to_string(),
                axis: axis.name.clone(),
                label: choice.label.clone(),
            });
        }
        if !values.insert(choice.value.as_str()) {
            return Err(CatalogError::DuplicateValue {
                operation: operation.to_string(),
                axis: axis.name.clone(),
                value: choice.value.clone(),
            });
        }
    }
    Ok(())
}
