//! Catalog model: operations, their parameter axes, and resolved selections.

use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

/// Axis name that marks an operation as producing a timeseries.
pub const INTERVAL_AXIS: &str = "interval";
/// Axis name used for the quote currency of price-like operations.
pub const CURRENCY_AXIS: &str = "currency";

/// One entry of a [`ParameterAxis`]: what the user sees and what is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisChoice {
    /// Menu label, e.g. `"7 Days"`
    pub label: String,
    /// Wire value passed to the remote call, e.g. `"_7_DAYS"`
    pub value: String,
}

/// A user-facing choice dimension of an [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterAxis {
    /// Symbolic role of the axis (`interval`, `currency`, ...)
    pub name: String,
    /// Remote variable name the wire value binds to (e.g. `inputInterval`)
    pub variable: String,
    /// Ordered choices; order drives menu order
    pub choices: Vec<AxisChoice>,
}

impl ParameterAxis {
    /// Display labels in menu order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|choice| choice.label.as_str())
    }

    /// Wire value bound to `label`, if the label exists on this axis.
    pub fn wire_value(&self, label: &str) -> Option<&str> {
        self.choices
            .iter()
            .find(|choice| choice.label == label)
            .map(|choice| choice.value.as_str())
    }

    pub fn is_interval(&self) -> bool {
        self.name == INTERVAL_AXIS
    }
}

/// How the first column of a result is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Values must parse as points in time.
    #[default]
    Temporal,
    /// Values are kept as received.
    Identity,
}

/// Closed set of response resolvers; one per remote operation.
///
/// Catalog entries reference a resolver by its string id (see
/// [`ResolverId::as_str`]); unknown ids are rejected when the catalog loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolverId {
    BitcoinOverview,
    Hashprice,
    NetworkHashrate,
    NetworkDifficulty,
    OhlcPrices,
    AsicPriceIndex,
}

impl ResolverId {
    pub const ALL: [ResolverId; 6] = [
        ResolverId::BitcoinOverview,
        ResolverId::Hashprice,
        ResolverId::NetworkHashrate,
        ResolverId::NetworkDifficulty,
        ResolverId::OhlcPrices,
        ResolverId::AsicPriceIndex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BitcoinOverview => "resolve_get_bitcoin_overview",
            Self::Hashprice => "resolve_get_hashprice",
            Self::NetworkHashrate => "resolve_get_network_hashrate",
            Self::NetworkDifficulty => "resolve_get_network_difficulty",
            Self::OhlcPrices => "resolve_get_ohlc_prices",
            Self::AsicPriceIndex => "resolve_get_asic_price_index",
        }
    }
}

impl fmt::Display for ResolverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolverId {
    type Err = ParseResolverIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|resolver| resolver.as_str() == s)
            .ok_or_else(|| ParseResolverIdError(s.to_string()))
    }
}

impl Serialize for ResolverId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResolverIdError(pub String);

impl fmt::Display for ParseResolverIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resolver id '{}'", self.0)
    }
}

impl Error for ParseResolverIdError {}

/// One selectable analytics capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    /// Display label; unique within the catalog
    pub name: String,
    /// Identifier of the remote call to invoke
    pub api_method: String,
    /// Resolver applied to the raw response
    pub resolver: ResolverId,
    /// Short description shown next to the menu
    pub description: String,
    /// Interpretation of the first result column
    pub index: IndexKind,
    /// Ordered parameter axes; order is positional argument order
    pub axes: Vec<ParameterAxis>,
}

impl Operation {
    pub fn axis(&self, name: &str) -> Option<&ParameterAxis> {
        self.axes.iter().find(|axis| axis.name == name)
    }

    pub fn has_axis(&self, name: &str) -> bool {
        self.axis(name).is_some()
    }
}

/// A resolved axis value inside a [`Selection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedArgument {
    pub axis: String,
    pub label: String,
    pub value: String,
}

/// Immutable input of one pipeline run: an operation plus one resolved
/// value per axis, in axis order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    operation: Operation,
    arguments: Vec<SelectedArgument>,
}

impl Selection {
    /// Callers are expected to go through the catalog, which guarantees one
    /// argument per axis in axis order.
    pub fn new(operation: Operation, arguments: Vec<SelectedArgument>) -> Self {
        Self { operation, arguments }
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn arguments(&self) -> &[SelectedArgument] {
        &self.arguments
    }

    /// Positional wire values passed to the remote call.
    pub fn wire_values(&self) -> Vec<String> {
        self.arguments.iter().map(|argument| argument.value.clone()).collect()
    }

    /// Human-readable summary, e.g. `Hashprice (7 Days, USD)`.
    pub fn describe(&self) -> String {
        if self.arguments.is_empty() {
            return self.operation.name.clone();
        }
        let labels: Vec<&str> = self.arguments.iter().map(|argument| argument.label.as_str()).collect();
        format!("{} ({})", self.operation.name, labels.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval_axis() -> ParameterAxis {
        ParameterAxis {
            name: INTERVAL_AXIS.into(),
            variable: "inputInterval".into(),
            choices: vec![
                AxisChoice {
                    label: "1 Day".into(),
                    value: "_1_DAY".into(),
                },
                AxisChoice {
                    label: "7 Days".into(),
                    value: "_7_DAYS".into(),
                },
            ],
        }
    }

    #[test]
    fn resolver_ids_round_trip_through_strings() {
        for resolver in ResolverId::ALL {
            assert_eq!(resolver.as_str().parse::<ResolverId>(), Ok(resolver));
        }
        let error = "resolve_get_everything".parse::<ResolverId>().unwrap_err();
        assert!(error.to_string().contains("resolve_get_everything"));
    }

    #[test]
    fn axis_lookup_keeps_menu_order() {
        let axis = interval_axis();
        assert_eq!(axis.labels().collect::<Vec<_>>(), vec!["1 Day", "7 Days"]);
        assert_eq!(axis.wire_value("7 Days"), Some("_7_DAYS"));
        assert_eq!(axis.wire_value("7 days"), None);
        assert!(axis.is_interval());
    }

    #[test]
    fn selection_describes_itself_with_labels() {
        let operation = Operation {
            name: "Network Hashrate".into(),
            api_method: "get_network_hashrate".into(),
            resolver: ResolverId::NetworkHashrate,
            description: String::new(),
            index: IndexKind::Temporal,
            axes: vec![interval_axis()],
        };
        let selection = Selection::new(
            operation,
            vec![SelectedArgument {
                axis: INTERVAL_AXIS.into(),
                label: "7 Days".into(),
                value: "_7_DAYS".into(),
            }],
        );
        assert_eq!(selection.describe(), "Network Hashrate (7 Days)");
        assert_eq!(selection.wire_values(), vec!["_7_DAYS".to_string()]);
    }

    #[test]
    fn resolver_serializes_as_catalog_string() {
        let json = serde_json::to_string(&ResolverId::OhlcPrices).unwrap();
        assert_eq!(json, "\"resolve_get_ohlc_prices\"");
    }
}
