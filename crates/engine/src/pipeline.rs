//! Fetch pipeline: transport, resolver, table builder, presentation.

use std::sync::Arc;

use hashdash_api::Transport;
use hashdash_registry::ParameterCatalog;
use hashdash_types::{DashboardError, PresentationMode, Selection, Table, View};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    presentation::choose_presentation,
    resolve::resolve,
    stats::{Statistics, describe},
    table_builder::build_table,
};

/// Everything one successful fetch produced.
#[derive(Debug, Clone, Serialize)]
pub struct FetchOutcome {
    pub selection: Selection,
    pub table: Table,
    pub mode: PresentationMode,
    /// Present for timeseries results only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Statistics>,
}

impl FetchOutcome {
    pub fn views(&self) -> &'static [View] {
        self.mode.views()
    }
}

/// Catalog plus transport, checked against each other once.
#[derive(Clone)]
pub struct Dashboard {
    catalog: Arc<ParameterCatalog>,
    transport: Arc<dyn Transport>,
}

impl Dashboard {
    /// Fails with [`DashboardError::NotFound`] if the transport cannot serve
    /// one of the catalog's operations with its axis variables in axis order.
    pub fn new(catalog: ParameterCatalog, transport: Arc<dyn Transport>) -> Result<Self, DashboardError> {
        for operation in catalog.operations() {
            let variables: Vec<&str> = operation.axes.iter().map(|axis| axis.variable.as_str()).collect();
            if !transport.supports(&operation.api_method, &variables) {
                return Err(DashboardError::not_found(
                    "api method",
                    format!("{}({}) for {}", operation.api_method, variables.join(", "), operation.name),
                ));
            }
        }
        Ok(Self {
            catalog: Arc::new(catalog),
            transport,
        })
    }

    pub fn catalog(&self) -> &ParameterCatalog {
        &self.catalog
    }

    /// Runs one fetch to completion. Any failure aborts the run; there is no
    /// partial outcome.
    pub async fn fetch(&self, selection: &Selection) -> Result<FetchOutcome, DashboardError> {
        let result = self.run(selection).await;
        if let Err(error) = &result {
            warn!(selection = %selection.describe(), %error, "fetch failed");
        }
        result
    }

    async fn run(&self, selection: &Selection) -> Result<FetchOutcome, DashboardError> {
        let operation = selection.operation();
        let args = selection.wire_values();
        debug!(api_method = %operation.api_method, ?args, "executing remote call");
        let raw = self.transport.execute(&operation.api_method, &args).await?;

        debug!(resolver = %operation.resolver, "resolving response");
        let records = resolve(operation.resolver, &raw)?;

        debug!(record_count = records.len(), "building table");
        let table = build_table(&records, operation.index)?;

        let mode = choose_presentation(operation);
        let statistics = (mode == PresentationMode::Timeseries).then(|| describe(&table));
        info!(
            selection = %selection.describe(),
            row_count = table.row_count(),
            mode = ?mode,
            "fetch complete"
        );
        Ok(FetchOutcome {
            selection: selection.clone(),
            table,
            mode,
            statistics,
        })
    }
}
